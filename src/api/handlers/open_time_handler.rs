//! Opening-hours handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{OpenTimeDraft, OpenTimeInput, OpenTimePatchInput, OpenTimeResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// Batch of opening hours for one restaurant
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOpenTimesRequest {
    #[validate(length(min = 1, message = "At least one opening-hours entry is required"))]
    pub open_times: Vec<OpenTimeInput>,
}

/// Patch body; fields that are absent stay unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOpenTimeRequest {
    #[serde(flatten)]
    pub patch: OpenTimePatchInput,
}

pub fn open_time_routes() -> Router<AppState> {
    Router::new().route("/restaurants/:id/open-times", get(list_open_times))
}

pub fn protected_open_time_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants/:id/open-times", post(create_open_times))
        .route(
            "/open-times/:id",
            patch(update_open_time).delete(delete_open_time),
        )
}

/// List the opening hours of a restaurant
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}/open-times",
    tag = "Open times",
    params(("id" = i32, Path, description = "Restaurant ID")),
    responses(
        (status = 200, description = "Opening hours", body = Vec<OpenTimeResponse>),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn list_open_times(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> AppResult<Json<Vec<OpenTimeResponse>>> {
    let entries = state.open_time_service.list_open_times(restaurant_id).await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Add opening hours to an owned restaurant; one malformed entry rejects the batch
#[utoipa::path(
    post,
    path = "/api/v1/restaurants/{id}/open-times",
    tag = "Open times",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Restaurant ID")),
    request_body = CreateOpenTimesRequest,
    responses(
        (status = 201, description = "Entries created", body = Vec<OpenTimeResponse>),
        (status = 400, description = "Malformed day or clock time"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Restaurant not found")
    )
)]
pub async fn create_open_times(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateOpenTimesRequest>,
) -> AppResult<Created<Vec<OpenTimeResponse>>> {
    let drafts = OpenTimeDraft::parse_batch(&payload.open_times)?;

    let created = state
        .open_time_service
        .create_open_times(current_user.id, restaurant_id, drafts)
        .await?;

    Ok(Created(created.into_iter().map(Into::into).collect()))
}

/// Update an opening-hours entry of an owned restaurant
#[utoipa::path(
    patch,
    path = "/api/v1/open-times/{id}",
    tag = "Open times",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Opening-hours entry ID")),
    request_body = OpenTimePatchInput,
    responses(
        (status = 200, description = "Entry after the update", body = OpenTimeResponse),
        (status = 400, description = "Malformed day or clock time"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_open_time(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateOpenTimeRequest>,
) -> AppResult<Json<OpenTimeResponse>> {
    let patch = payload.patch.parse()?;

    let updated = state
        .open_time_service
        .update_open_time(current_user.id, id, patch)
        .await?;

    Ok(Json(updated.into()))
}

/// Delete an opening-hours entry; the restaurant is kept
#[utoipa::path(
    delete,
    path = "/api/v1/open-times/{id}",
    tag = "Open times",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Opening-hours entry ID")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Restaurant not saved by the caller"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn delete_open_time(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<NoContent> {
    state
        .open_time_service
        .delete_open_time(current_user.id, id)
        .await?;

    Ok(NoContent)
}
