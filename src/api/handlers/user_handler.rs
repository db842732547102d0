//! Current-user profile and saved restaurants.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, put},
    Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{RestaurantResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::NoContent;

/// Routes that act on the authenticated user; mounted behind the auth layer
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_current_user).delete(delete_current_user))
        .route("/users/me/restaurants", get(list_saved_restaurants))
        .route(
            "/users/me/restaurants/:restaurant_id",
            put(save_restaurant).delete(unsave_restaurant),
        )
}

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the authenticated user together with their OAuth record and saved links
#[utoipa::path(
    delete,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(current_user.id).await?;

    tracing::info!("User {} deleted their account", current_user.username);
    Ok(NoContent)
}

/// List restaurants saved by the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/users/me/restaurants",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved restaurants", body = Vec<RestaurantResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_saved_restaurants(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RestaurantResponse>>> {
    let restaurants = state.user_service.list_restaurants(current_user.id).await?;

    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}

/// Save a restaurant; saving twice is a no-op
#[utoipa::path(
    put,
    path = "/api/v1/users/me/restaurants/{restaurant_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("restaurant_id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 204, description = "Restaurant saved"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn save_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .user_service
        .save_restaurant(current_user.id, restaurant_id)
        .await?;

    Ok(NoContent)
}

/// Remove a restaurant from the saved list
#[utoipa::path(
    delete,
    path = "/api/v1/users/me/restaurants/{restaurant_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("restaurant_id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 204, description = "Restaurant removed from the saved list"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn unsave_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .user_service
        .unsave_restaurant(current_user.id, restaurant_id)
        .await?;

    Ok(NoContent)
}
