//! Router configuration for the API.

use axum::{Router, middleware};

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Last added runs first:
/// 1. Request ID - generates or propagates `x-request-id`
/// 2. Logging - logs the request with its id
/// 3. Error handler - turns bare error responses into envelopes
///
/// # Routes
/// - `/users`, `/users/{id}` - User CRUD
/// - `/health` - Store reachability
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::users::user_routes())
        .merge(handlers::health::health_routes())
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
