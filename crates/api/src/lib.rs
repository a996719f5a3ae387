//! # Slotbook API
//!
//! The API crate provides the web server for the slotbook booking
//! service: slot publication by administrators, day/month schedule
//! views, and the customer booking/cancellation flow.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Booking**: The slot state-machine boundary (book/cancel)
//! - **Middleware**: Identity extraction, role gate, error mapping
//! - **Notify**: Post-commit notification hooks and the mail relay
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database
//! interactions. Identity is supplied by the fronting auth provider as
//! trusted request headers; this service only resolves roles.

/// Booking state-machine boundary (book, cancel, export authorization)
pub mod booking;
/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Post-commit notification hooks and mail delivery
pub mod notify;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::notify::{BookingHook, EmailBookingHook, RelayMailer};

/// Shared application state that is accessible to all request handlers.
///
/// Everything a handler needs is threaded through here explicitly;
/// there is no ambient client or global connection.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Email address seeded as administrator at registration
    pub admin_email: String,
    /// Hooks fired after a booking commits; each is fault-isolated
    pub booking_hooks: Vec<Arc<dyn BookingHook>>,
}

/// Starts the API server with the provided configuration and database
/// connection: installs logging, wires the notification hooks, builds
/// the router, and serves.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Booking notifications only fire when a relay is configured.
    let mut booking_hooks: Vec<Arc<dyn BookingHook>> = Vec::new();
    if let Some(relay_url) = &config.mail_relay_url {
        let mailer = RelayMailer::new(relay_url.clone(), config.mail_from.clone());
        booking_hooks.push(Arc::new(EmailBookingHook::new(
            Arc::new(mailer),
            config.admin_email.clone(),
        )));
    } else {
        info!("MAIL_RELAY_URL not set; booking notifications disabled");
    }

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        admin_email: config.admin_email.clone(),
        booking_hooks,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Profile registration and lookup
        .merge(routes::profile::routes())
        // Admin slot management
        .merge(routes::slots::routes())
        // Day and month schedule views
        .merge(routes::schedule::routes())
        // Booking, cancellation, and calendar export
        .merge(routes::bookings::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(tower_http::cors::AllowOrigin::list(origins))
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
