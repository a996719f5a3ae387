use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/slots",
        post(handlers::slots::create_slots).get(handlers::slots::list_slots),
    )
}
