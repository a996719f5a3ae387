use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots/:id/book", post(handlers::bookings::book_slot))
        .route("/api/slots/:id/cancel", post(handlers::bookings::cancel_slot))
        .route("/api/bookings/me", get(handlers::bookings::my_bookings))
        .route(
            "/api/slots/:id/calendar.ics",
            get(handlers::bookings::calendar_ics),
        )
        .route(
            "/api/slots/:id/calendar/google",
            get(handlers::bookings::calendar_google),
        )
}
