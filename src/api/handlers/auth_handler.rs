//! Registration and token issuance.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{ValidatedForm, ValidatedJson};
use crate::api::AppState;
use crate::config::{MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH};
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::{Created, MessageResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH, message = "Username must be 1-30 characters"))]
    #[schema(example = "andy")]
    pub username: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = MAX_EMAIL_LENGTH, message = "Email is too long")
    )]
    #[schema(example = "andy@example.com")]
    pub email: String,
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

/// OAuth2 password-flow form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "andy")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Public account routes, relative to the API prefix
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/token", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<MessageResponse>> {
    let user = state
        .auth_service
        .register(payload.username, payload.email, payload.password)
        .await?;

    tracing::info!("Registered user {}", user.id);
    Ok(Created(MessageResponse::new("created.")))
}

/// Exchange username and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/users/token",
    tag = "Users",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.login(form.username, form.password).await?;

    Ok(Json(token))
}
