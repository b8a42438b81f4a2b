//! User registration and listing handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, UserResponse};
use crate::errors::AppResult;

/// User creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Given name
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name (optional)
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// Unique username
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "ada")]
    pub user_name: String,
    /// Unique email address
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "ada@x.com")]
    pub email: String,
    /// Plaintext password, hashed before storage and never persisted
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", post(create_user).get(list_users))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let candidate = NewUser {
        first_name: payload.first_name,
        last_name: payload.last_name,
        user_name: payload.user_name,
        email: payload.email,
    };

    let user = state.registry.register(candidate, payload.password).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All registered users", body = [UserResponse]),
        (status = 500, description = "Internal error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.registry.list_users().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
