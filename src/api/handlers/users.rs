//! User CRUD request handlers.
//!
//! Every handler answers with an `Envelope`. Failures go through `ApiError`
//! so the status code and message follow the operation that failed.
//!
//! Bodies are read as raw bytes and decoded as JSON whatever the
//! `Content-Type` header says.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::{get, put},
};

use crate::api::dto::{
    Envelope, PagedResponse, PaginationParams, UserAction, UserRequest, UserResponse,
};
use crate::api::middleware::ApiError;
use crate::error::AppError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

/// Creates user-related routes.
///
/// - GET    /users       - List users, paginated
/// - POST   /users       - Create a user
/// - PUT    /users/{id}  - Replace a user's fields
/// - DELETE /users/{id}  - Delete a user
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(add_user))
        .route("/users/{id}", put(edit_user).delete(delete_user))
}

/// GET /users?page=&perPage=
async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<PaginationParams>, QueryRejection>,
) -> ApiResult<Json<Envelope<PagedResponse<UserResponse>>>> {
    let action = UserAction::List;
    let Query(params) = query.map_err(|r| ApiError::from_query_rejection(action, r))?;

    let page = state
        .services
        .users
        .list_users(params.page_request())
        .await
        .map_err(|e| ApiError::new(action, e))?;

    Ok(Json(Envelope::success(
        action,
        PagedResponse::from(page.map(UserResponse::from)),
    )))
}

/// POST /users
///
/// Returns 201 with the stored user, including its assigned id.
async fn add_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Envelope<UserResponse>>)> {
    let action = UserAction::Create;
    let payload = UserRequest::from_json(&body).map_err(|e| ApiError::new(action, e))?;

    let user = state
        .services
        .users
        .create_user(payload.into())
        .await
        .map_err(|e| ApiError::new(action, e))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(action, UserResponse::from(user))),
    ))
}

/// PUT /users/{id}
///
/// Overwrites every field; an id with no row still succeeds.
async fn edit_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Envelope<UserResponse>>> {
    let action = UserAction::Update;
    let id = parse_user_id(&raw_id).map_err(|e| ApiError::new(action, e))?;
    let payload = UserRequest::from_json(&body).map_err(|e| ApiError::new(action, e))?;

    let user = state
        .services
        .users
        .update_user(id, payload.into())
        .await
        .map_err(|e| ApiError::new(action, e))?;

    Ok(Json(Envelope::success(action, UserResponse::from(user))))
}

/// DELETE /users/{id}
///
/// Deleting an id with no row still succeeds.
async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let action = UserAction::Delete;
    let id = parse_user_id(&raw_id).map_err(|e| ApiError::new(action, e))?;

    state
        .services
        .users
        .delete_user(id)
        .await
        .map_err(|e| ApiError::new(action, e))?;

    Ok(Json(Envelope::done(action)))
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|e| AppError::InvalidId {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
