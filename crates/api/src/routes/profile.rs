use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/profiles/register", post(handlers::profile::register))
        .route("/api/profiles/me", get(handlers::profile::me))
}
