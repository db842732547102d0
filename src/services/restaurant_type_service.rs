//! Restaurant types and tagging.

use async_trait::async_trait;
use std::sync::Arc;

use super::user_service::owned_restaurant;
use crate::domain::RestaurantType;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RestaurantTypeService: Send + Sync {
    async fn list_types(&self) -> AppResult<Vec<RestaurantType>>;

    /// Create a type; names are unique
    async fn create_type(&self, name: String, desc: Option<String>) -> AppResult<RestaurantType>;

    /// Tag a restaurant the user owns; tagging twice is a no-op
    async fn tag_restaurant(&self, owner_id: i32, restaurant_id: i32, type_id: i32) -> AppResult<()>;

    async fn untag_restaurant(&self, owner_id: i32, restaurant_id: i32, type_id: i32)
        -> AppResult<()>;
}

pub struct RestaurantTypeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RestaurantTypeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn existing_type(&self, type_id: i32) -> AppResult<RestaurantType> {
        self.uow
            .restaurant_types()
            .find_by_id(type_id)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> RestaurantTypeService for RestaurantTypeManager<U> {
    async fn list_types(&self) -> AppResult<Vec<RestaurantType>> {
        self.uow.restaurant_types().list().await
    }

    async fn create_type(&self, name: String, desc: Option<String>) -> AppResult<RestaurantType> {
        let types = self.uow.restaurant_types();

        if types.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Restaurant type"));
        }

        types.create(name, desc).await
    }

    async fn tag_restaurant(&self, owner_id: i32, restaurant_id: i32, type_id: i32) -> AppResult<()> {
        owned_restaurant(self.uow.as_ref(), owner_id, restaurant_id).await?;
        self.existing_type(type_id).await?;

        self.uow.restaurant_types().tag(restaurant_id, type_id).await
    }

    async fn untag_restaurant(
        &self,
        owner_id: i32,
        restaurant_id: i32,
        type_id: i32,
    ) -> AppResult<()> {
        owned_restaurant(self.uow.as_ref(), owner_id, restaurant_id).await?;
        self.existing_type(type_id).await?;

        self.uow.restaurant_types().untag(restaurant_id, type_id).await?;
        Ok(())
    }
}
