//! Restaurant repository: CRUD plus the two candidate queries behind the
//! nearby picker.

use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::{open_time, restaurant, restaurant_type_link, user_restaurant};
use super::entities::{OpenTimeEntity, RestaurantEntity};
use crate::domain::{Coordinate, NewRestaurant, Restaurant, RestaurantPatch};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Page through restaurants ordered by id; returns the page and the total count
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Restaurant>, u64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Restaurant>>;

    async fn create(&self, new: NewRestaurant) -> AppResult<Restaurant>;

    /// Apply a partial update. An empty patch writes nothing.
    /// Returns `None` when the restaurant does not exist.
    async fn update(&self, id: i32, patch: RestaurantPatch) -> AppResult<Option<Restaurant>>;

    /// Every restaurant within `radius_km` of `origin`
    async fn list_within(&self, origin: Coordinate, radius_km: f64) -> AppResult<Vec<Restaurant>>;

    /// Restaurants within `radius_km` of `origin` having an opening-hours row
    /// that covers `time` on `day_of_week`.
    ///
    /// One entry per matching opening-hours row: a restaurant with two
    /// overlapping intervals appears twice.
    async fn list_within_open_at(
        &self,
        origin: Coordinate,
        radius_km: f64,
        day_of_week: i32,
        time: NaiveTime,
    ) -> AppResult<Vec<Restaurant>>;
}

/// Concrete implementation of RestaurantRepository
pub struct RestaurantStore {
    db: DatabaseConnection,
}

impl RestaurantStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RestaurantRepository for RestaurantStore {
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Restaurant>, u64)> {
        let paginator = RestaurantEntity::find()
            .order_by_asc(restaurant::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page_index()).await?;

        Ok((models.into_iter().map(Restaurant::from).collect(), total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Restaurant>> {
        let result = RestaurantEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Restaurant::from))
    }

    async fn create(&self, new: NewRestaurant) -> AppResult<Restaurant> {
        insert(&self.db, new).await
    }

    async fn update(&self, id: i32, patch: RestaurantPatch) -> AppResult<Option<Restaurant>> {
        let Some(model) = RestaurantEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(Restaurant::from(model)));
        }

        let mut patched = Restaurant::from(model.clone());
        patch.apply_to(&mut patched);

        let mut active: restaurant::ActiveModel = model.into();
        active.name = Set(patched.name);
        active.address = Set(patched.address);
        active.phone = Set(patched.phone);
        active.lat = Set(patched.lat);
        active.lng = Set(patched.lng);
        active.desc = Set(patched.desc);
        active.price = Set(patched.price);
        active.update_at = Set(Some(chrono::Utc::now()));

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(Restaurant::from(model)))
    }

    async fn list_within(&self, origin: Coordinate, radius_km: f64) -> AppResult<Vec<Restaurant>> {
        let models = RestaurantEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models
            .into_iter()
            .map(Restaurant::from)
            .filter(|r| origin.within(&r.coordinate(), radius_km))
            .collect())
    }

    async fn list_within_open_at(
        &self,
        origin: Coordinate,
        radius_km: f64,
        day_of_week: i32,
        time: NaiveTime,
    ) -> AppResult<Vec<Restaurant>> {
        let rows = RestaurantEntity::find()
            .find_also_related(OpenTimeEntity)
            .filter(open_time::Column::DayOfWeek.eq(day_of_week))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .filter_map(|(model, hours)| {
                let hours = crate::domain::OpenTime::from(hours?);
                hours
                    .is_open_at(day_of_week, time)
                    .then(|| Restaurant::from(model))
            })
            .filter(|r| origin.within(&r.coordinate(), radius_km))
            .collect())
    }
}

/// Insert a restaurant with a fresh creation timestamp and no update timestamp.
pub(crate) async fn insert<C: ConnectionTrait>(db: &C, new: NewRestaurant) -> AppResult<Restaurant> {
    let active_model = restaurant::ActiveModel {
        name: Set(new.name),
        address: Set(new.address),
        phone: Set(new.phone),
        lat: Set(new.coordinate.lat),
        lng: Set(new.coordinate.lng),
        desc: Set(new.desc),
        price: Set(new.price),
        is_enable: Set(true),
        create_at: Set(chrono::Utc::now()),
        update_at: Set(None),
        ..Default::default()
    };

    let model = active_model.insert(db).await.map_err(AppError::from)?;
    Ok(Restaurant::from(model))
}

/// Delete a restaurant together with its opening hours, favorites and tags.
/// Returns false when the restaurant does not exist.
pub(crate) async fn delete_cascade<C: ConnectionTrait>(db: &C, id: i32) -> AppResult<bool> {
    open_time::Entity::delete_many()
        .filter(open_time::Column::RestaurantId.eq(id))
        .exec(db)
        .await?;
    user_restaurant::Entity::delete_many()
        .filter(user_restaurant::Column::RestaurantId.eq(id))
        .exec(db)
        .await?;
    restaurant_type_link::Entity::delete_many()
        .filter(restaurant_type_link::Column::RestaurantId.eq(id))
        .exec(db)
        .await?;

    let result = RestaurantEntity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
