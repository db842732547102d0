//! Restaurant handlers, including the random nearby pick.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{
    DEFAULT_PICK_LIMIT, MAX_PHONE_LENGTH, MAX_PICK_LIMIT, MAX_RESTAURANT_NAME_LENGTH,
    MIN_PICK_LIMIT,
};
use crate::domain::{
    parse_clock_time, Coordinate, NearbyQuery, PickedRestaurantResponse,
    RestaurantDetailResponse, RestaurantDraft, RestaurantPatch, RestaurantResponse,
};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PaginatedRestaurants, PaginationParams};

/// Restaurant creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRestaurantRequest {
    #[validate(length(min = 1, max = MAX_RESTAURANT_NAME_LENGTH, message = "Name must be 1-100 characters"))]
    #[schema(example = "Din Tai Fung")]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "No. 139, Sec. 2, Zhongshan E. Rd., Zhongli Dist., Taoyuan City")]
    pub address: String,
    #[validate(length(max = MAX_PHONE_LENGTH, message = "Phone is too long"))]
    #[schema(example = "034256789")]
    pub phone: Option<String>,
    pub desc: Option<String>,
    #[schema(example = 2)]
    pub price: Option<i32>,
    /// Used together with `lng`; when either is missing the address is geocoded
    #[schema(example = 24.94519)]
    pub lat: Option<f64>,
    #[schema(example = 121.21892)]
    pub lng: Option<f64>,
}

impl From<CreateRestaurantRequest> for RestaurantDraft {
    fn from(req: CreateRestaurantRequest) -> Self {
        let coordinate = req.lat.zip(req.lng).map(|(lat, lng)| Coordinate::new(lat, lng));
        Self {
            name: req.name,
            address: req.address,
            phone: req.phone,
            desc: req.desc,
            price: req.price,
            coordinate,
        }
    }
}

/// Partial restaurant update; absent fields stay as they are
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRestaurantRequest {
    #[validate(length(min = 1, max = MAX_RESTAURANT_NAME_LENGTH, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    #[validate(length(max = MAX_PHONE_LENGTH, message = "Phone is too long"))]
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub desc: Option<String>,
    pub price: Option<i32>,
}

impl From<UpdateRestaurantRequest> for RestaurantPatch {
    fn from(req: UpdateRestaurantRequest) -> Self {
        Self {
            name: req.name,
            address: req.address,
            phone: req.phone,
            lat: req.lat,
            lng: req.lng,
            desc: req.desc,
            price: req.price,
        }
    }
}

/// Query of the random nearby pick
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct RandomRestaurantParams {
    /// Observer latitude
    pub lat: f64,
    /// Observer longitude
    pub lng: f64,
    /// Search radius in km
    #[validate(range(min = 0.0, message = "distance must not be negative"))]
    pub distance: f64,
    /// How many restaurants to pick
    #[serde(default = "default_pick_limit")]
    #[validate(range(min = MIN_PICK_LIMIT, max = MAX_PICK_LIMIT, message = "limit must be between 1 and 10"))]
    pub limit: u64,
    /// 1 = Monday ... 7 = Sunday; only used together with `current_time`
    pub day_of_week: Option<i32>,
    /// `HH:MM`; only used together with `day_of_week`
    pub current_time: Option<String>,
}

fn default_pick_limit() -> u64 {
    DEFAULT_PICK_LIMIT
}

impl RandomRestaurantParams {
    fn into_query(self) -> AppResult<NearbyQuery> {
        let current_time = self.current_time.as_deref().map(parse_clock_time).transpose()?;
        let query = NearbyQuery::new(
            Coordinate::new(self.lat, self.lng),
            self.distance,
            self.limit as usize,
        );
        Ok(query.open_at(self.day_of_week, current_time))
    }
}

/// Public restaurant routes
pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/random", get(random_restaurants))
        .route("/restaurants/:id", get(get_restaurant))
}

/// Restaurant routes that need a bearer token
pub fn protected_restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", post(create_restaurant))
        .route(
            "/restaurants/:id",
            patch(update_restaurant).delete(delete_restaurant),
        )
}

/// List restaurants page by page
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    tag = "Restaurants",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of restaurants", body = PaginatedRestaurants),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PaginatedRestaurants>> {
    let page = state.restaurant_service.list_restaurants(params).await?;

    Ok(Json(page.map(RestaurantResponse::from)))
}

/// Pick random restaurants within `distance` km, optionally open at a given time
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/random",
    tag = "Restaurants",
    params(RandomRestaurantParams),
    responses(
        (status = 200, description = "Picked restaurants, possibly empty", body = Vec<PickedRestaurantResponse>),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn random_restaurants(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<RandomRestaurantParams>,
) -> AppResult<Json<Vec<PickedRestaurantResponse>>> {
    let picked = state
        .restaurant_service
        .select_nearby(params.into_query()?)
        .await?;

    Ok(Json(picked.into_iter().map(Into::into).collect()))
}

/// Get a restaurant with its opening hours and types
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Restaurant detail", body = RestaurantDetailResponse),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RestaurantDetailResponse>> {
    let detail = state.restaurant_service.get_restaurant(id).await?;

    Ok(Json(detail.into()))
}

/// Create a restaurant; the creator becomes its owner
#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    tag = "Restaurants",
    security(("bearer_auth" = [])),
    request_body = CreateRestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = RestaurantResponse),
        (status = 400, description = "Validation error or address could not be located"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRestaurantRequest>,
) -> AppResult<Created<RestaurantResponse>> {
    let restaurant = state
        .restaurant_service
        .create_restaurant(current_user.id, payload.into())
        .await?;

    Ok(Created(restaurant.into()))
}

/// Update the given fields of an owned restaurant
#[utoipa::path(
    patch,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = UpdateRestaurantRequest,
    responses(
        (status = 200, description = "Restaurant after the update", body = RestaurantResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn update_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateRestaurantRequest>,
) -> AppResult<Json<RestaurantResponse>> {
    let restaurant = state
        .restaurant_service
        .update_restaurant(current_user.id, id, payload.into())
        .await?;

    Ok(Json(restaurant.into()))
}

/// Delete an owned restaurant with its opening hours and links
#[utoipa::path(
    delete,
    path = "/api/v1/restaurants/{id}",
    tag = "Restaurants",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 204, description = "Restaurant deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn delete_restaurant(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .restaurant_service
        .delete_restaurant(current_user.id, id)
        .await?;

    Ok(NoContent)
}
