use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedule/day/:date",
            get(handlers::schedule::my_day_schedule),
        )
        .route(
            "/api/admin/schedule/day/:date",
            get(handlers::schedule::admin_day_schedule),
        )
        .route(
            "/api/schedule/month/:year/:month",
            get(handlers::schedule::month_schedule),
        )
}
