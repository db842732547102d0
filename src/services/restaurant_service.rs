//! Restaurant service: CRUD with ownership checks and the nearby picker.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use super::user_service::owned_restaurant;
use crate::domain::{
    selection, NearbyQuery, PickedRestaurant, Restaurant, RestaurantDetail, RestaurantDraft,
    RestaurantPatch,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Geocoder, UnitOfWork};
use crate::types::{Paginated, PaginationParams};
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RestaurantService: Send + Sync {
    async fn list_restaurants(&self, params: PaginationParams) -> AppResult<Paginated<Restaurant>>;

    /// Restaurant with its opening hours and types
    async fn get_restaurant(&self, id: i32) -> AppResult<RestaurantDetail>;

    /// Create a restaurant and save it for its creator.
    ///
    /// Without a coordinate in the draft the address is geocoded; an address
    /// that cannot be resolved is a validation error and nothing is written.
    async fn create_restaurant(&self, owner_id: i32, draft: RestaurantDraft) -> AppResult<Restaurant>;

    async fn update_restaurant(
        &self,
        owner_id: i32,
        id: i32,
        patch: RestaurantPatch,
    ) -> AppResult<Restaurant>;

    /// Delete a restaurant with its opening hours, favorites and tags
    async fn delete_restaurant(&self, owner_id: i32, id: i32) -> AppResult<()>;

    /// Pick up to `query.limit` restaurants at random within the radius,
    /// optionally only those open at the given day and time.
    async fn select_nearby(&self, query: NearbyQuery) -> AppResult<Vec<PickedRestaurant>>;
}

pub struct RestaurantManager<U: UnitOfWork> {
    uow: Arc<U>,
    geocoder: Arc<dyn Geocoder>,
}

impl<U: UnitOfWork> RestaurantManager<U> {
    pub fn new(uow: Arc<U>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { uow, geocoder }
    }
}

#[async_trait]
impl<U: UnitOfWork> RestaurantService for RestaurantManager<U> {
    async fn list_restaurants(&self, params: PaginationParams) -> AppResult<Paginated<Restaurant>> {
        let (restaurants, total) = self.uow.restaurants().list_paginated(&params).await?;
        Ok(Paginated::new(restaurants, &params, total))
    }

    async fn get_restaurant(&self, id: i32) -> AppResult<RestaurantDetail> {
        let restaurant = self
            .uow
            .restaurants()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        let open_times = self.uow.open_times();
        let types = self.uow.restaurant_types();
        let (open_times, types) = parallel::join2(
            open_times.list_by_restaurant(id),
            types.list_by_restaurant(id),
        )
        .await?;

        Ok(RestaurantDetail {
            restaurant,
            open_times,
            types,
        })
    }

    async fn create_restaurant(&self, owner_id: i32, draft: RestaurantDraft) -> AppResult<Restaurant> {
        let coordinate = match draft.coordinate {
            Some(coordinate) => coordinate,
            None => self.geocoder.locate(&draft.address).await.ok_or_else(|| {
                AppError::validation("Address could not be resolved to a coordinate")
            })?,
        };

        let new = draft.located_at(coordinate);
        let restaurant = with_transaction!(self.uow, |ctx| {
            let restaurant = ctx.restaurants().create(new).await?;
            ctx.users().save_restaurant(owner_id, restaurant.id).await?;
            Ok::<_, AppError>(restaurant)
        })?;

        tracing::info!(restaurant_id = restaurant.id, owner_id, "Restaurant created");
        Ok(restaurant)
    }

    async fn update_restaurant(
        &self,
        owner_id: i32,
        id: i32,
        patch: RestaurantPatch,
    ) -> AppResult<Restaurant> {
        owned_restaurant(self.uow.as_ref(), owner_id, id).await?;

        self.uow
            .restaurants()
            .update(id, patch)
            .await?
            .ok_or_not_found()
    }

    async fn delete_restaurant(&self, owner_id: i32, id: i32) -> AppResult<()> {
        owned_restaurant(self.uow.as_ref(), owner_id, id).await?;

        let deleted = with_transaction!(self.uow, |ctx| ctx.restaurants().delete(id).await)?;
        if !deleted {
            return Err(AppError::NotFound);
        }

        tracing::info!(restaurant_id = id, owner_id, "Restaurant deleted");
        Ok(())
    }

    async fn select_nearby(&self, query: NearbyQuery) -> AppResult<Vec<PickedRestaurant>> {
        let repo = self.uow.restaurants();

        let candidates = match query.open_filter() {
            Some((day_of_week, time)) => {
                repo.list_within_open_at(query.origin, query.radius_km, day_of_week, time)
                    .await?
            }
            None => {
                if query.day_of_week.is_some() || query.current_time.is_some() {
                    tracing::debug!("Opening-hours filter needs both day_of_week and current_time; ignoring it");
                }
                repo.list_within(query.origin, query.radius_km).await?
            }
        };

        tracing::debug!(candidates = candidates.len(), limit = query.limit, "Picking restaurants");

        let picked = selection::sample(candidates, query.limit, &mut rand::rng());

        // Every candidate passed the filter, or no filter was requested
        Ok(picked
            .into_iter()
            .map(|restaurant| PickedRestaurant {
                restaurant,
                is_open: true,
            })
            .collect())
    }
}
