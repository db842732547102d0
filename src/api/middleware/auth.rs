//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Authenticated user resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Resolve the `Authorization: Bearer <token>` header to a [`CurrentUser`]
/// and store it in the request extensions.
///
/// A valid token whose user no longer exists is rejected like a bad token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;
    let user = load_user(&state, claims.sub).await?;

    request.extensions_mut().insert(CurrentUser::from(user));

    Ok(next.run(request).await)
}

async fn load_user(state: &AppState, id: i32) -> AppResult<User> {
    match state.user_service.get_user(id).await {
        Err(AppError::NotFound) => {
            tracing::debug!("Token subject {} no longer exists", id);
            Err(AppError::Unauthorized)
        }
        other => other,
    }
}
