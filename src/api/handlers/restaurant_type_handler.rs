//! Restaurant type (cuisine tag) handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::MAX_TYPE_NAME_LENGTH;
use crate::domain::RestaurantTypeResponse;
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantTypeRequest {
    #[validate(length(min = 1, max = MAX_TYPE_NAME_LENGTH, message = "Name must be 1-30 characters"))]
    #[schema(example = "noodles")]
    pub name: String,
    pub desc: Option<String>,
}

pub fn restaurant_type_routes() -> Router<AppState> {
    Router::new().route("/restaurant-types", get(list_types))
}

pub fn protected_restaurant_type_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurant-types", post(create_type))
        .route(
            "/restaurants/:id/types/:type_id",
            put(tag_restaurant).delete(untag_restaurant),
        )
}

/// List all restaurant types by name
#[utoipa::path(
    get,
    path = "/api/v1/restaurant-types",
    tag = "Restaurant types",
    responses((status = 200, description = "All types", body = Vec<RestaurantTypeResponse>))
)]
pub async fn list_types(State(state): State<AppState>) -> AppResult<Json<Vec<RestaurantTypeResponse>>> {
    let types = state.restaurant_type_service.list_types().await?;

    Ok(Json(types.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/restaurant-types",
    tag = "Restaurant types",
    security(("bearer_auth" = [])),
    request_body = CreateRestaurantTypeRequest,
    responses(
        (status = 201, description = "Type created", body = RestaurantTypeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A type with this name already exists")
    )
)]
pub async fn create_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRestaurantTypeRequest>,
) -> AppResult<Created<RestaurantTypeResponse>> {
    let kind = state
        .restaurant_type_service
        .create_type(payload.name, payload.desc)
        .await?;

    Ok(Created(kind.into()))
}

/// Tag an owned restaurant with a type
#[utoipa::path(
    put,
    path = "/api/v1/restaurants/{id}/types/{type_id}",
    tag = "Restaurant types",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Restaurant ID"),
        ("type_id" = i32, Path, description = "Restaurant type ID")
    ),
    responses(
        (status = 204, description = "Restaurant tagged"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Restaurant or type not found")
    )
)]
pub async fn tag_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((restaurant_id, type_id)): Path<(i32, i32)>,
) -> AppResult<NoContent> {
    state
        .restaurant_type_service
        .tag_restaurant(current_user.id, restaurant_id, type_id)
        .await?;

    Ok(NoContent)
}

#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/{id}/types/{type_id}",
    tag = "Restaurant types",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Restaurant ID"),
        ("type_id" = i32, Path, description = "Restaurant type ID")
    ),
    responses(
        (status = 204, description = "Tag removed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Restaurant or type not found")
    )
)]
pub async fn untag_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path((restaurant_id, type_id)): Path<(i32, i32)>,
) -> AppResult<NoContent> {
    state
        .restaurant_type_service
        .untag_restaurant(current_user.id, restaurant_id, type_id)
        .await?;

    Ok(NoContent)
}
