//! Opening-hours service.

use async_trait::async_trait;
use std::sync::Arc;

use super::user_service::owned_restaurant;
use crate::domain::{OpenTime, OpenTimeDraft, OpenTimePatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OpenTimeService: Send + Sync {
    /// Store a batch of opening hours for a restaurant in one transaction
    async fn create_open_times(
        &self,
        owner_id: i32,
        restaurant_id: i32,
        drafts: Vec<OpenTimeDraft>,
    ) -> AppResult<Vec<OpenTime>>;

    async fn list_open_times(&self, restaurant_id: i32) -> AppResult<Vec<OpenTime>>;

    async fn update_open_time(&self, owner_id: i32, id: i32, patch: OpenTimePatch)
        -> AppResult<OpenTime>;

    /// Delete one entry; the restaurant itself is kept
    async fn delete_open_time(&self, owner_id: i32, id: i32) -> AppResult<()>;
}

pub struct OpenTimeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OpenTimeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load an entry whose restaurant the user may modify
    async fn owned_open_time(&self, owner_id: i32, id: i32) -> AppResult<OpenTime> {
        let open_time = self.uow.open_times().find_by_id(id).await?.ok_or_not_found()?;
        owned_restaurant(self.uow.as_ref(), owner_id, open_time.restaurant_id).await?;
        Ok(open_time)
    }
}

#[async_trait]
impl<U: UnitOfWork> OpenTimeService for OpenTimeManager<U> {
    async fn create_open_times(
        &self,
        owner_id: i32,
        restaurant_id: i32,
        drafts: Vec<OpenTimeDraft>,
    ) -> AppResult<Vec<OpenTime>> {
        owned_restaurant(self.uow.as_ref(), owner_id, restaurant_id).await?;

        let created = with_transaction!(self.uow, |ctx| {
            ctx.open_times().create_many(restaurant_id, &drafts).await
        })?;

        tracing::info!(restaurant_id, count = created.len(), "Opening hours created");
        Ok(created)
    }

    async fn list_open_times(&self, restaurant_id: i32) -> AppResult<Vec<OpenTime>> {
        self.uow
            .restaurants()
            .find_by_id(restaurant_id)
            .await?
            .ok_or_not_found()?;

        self.uow.open_times().list_by_restaurant(restaurant_id).await
    }

    async fn update_open_time(
        &self,
        owner_id: i32,
        id: i32,
        patch: OpenTimePatch,
    ) -> AppResult<OpenTime> {
        self.owned_open_time(owner_id, id).await?;

        self.uow.open_times().update(id, patch).await?.ok_or_not_found()
    }

    async fn delete_open_time(&self, owner_id: i32, id: i32) -> AppResult<()> {
        self.owned_open_time(owner_id, id).await?;

        if !self.uow.open_times().delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockOpenTimeRepository, MockRestaurantRepository, MockUserRepository};
    use crate::services::test_support::{test_restaurant, TestUnitOfWork};
    use chrono::{NaiveTime, Utc};
    use mockall::predicate::eq;

    fn entry(id: i32, restaurant_id: i32) -> OpenTime {
        OpenTime {
            id,
            restaurant_id,
            day_of_week: 3,
            open_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(20, 30, 0).unwrap(),
            create_at: Utc::now(),
            update_at: None,
        }
    }

    fn restaurants() -> MockRestaurantRepository {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_restaurant(id, 24.9, 121.2))));
        restaurants
    }

    #[tokio::test]
    async fn test_update_checks_owner_of_parent_restaurant() {
        let mut open_times = MockOpenTimeRepository::new();
        open_times
            .expect_find_by_id()
            .with(eq(11))
            .returning(|id| Ok(Some(entry(id, 4))));
        open_times.expect_update().never();
        let mut users = MockUserRepository::new();
        users
            .expect_has_restaurant()
            .with(eq(2), eq(4))
            .returning(|_, _| Ok(false));

        let uow = TestUnitOfWork::builder()
            .open_times(open_times)
            .restaurants(restaurants())
            .users(users)
            .build();
        let service = OpenTimeManager::new(Arc::new(uow));

        let result = service
            .update_open_time(2, 11, OpenTimePatch::default())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_unknown_entry_is_not_found() {
        let mut open_times = MockOpenTimeRepository::new();
        open_times.expect_find_by_id().returning(|_| Ok(None));
        open_times.expect_delete().never();

        let uow = TestUnitOfWork::builder().open_times(open_times).build();
        let service = OpenTimeManager::new(Arc::new(uow));

        assert!(matches!(
            service.delete_open_time(1, 99).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut open_times = MockOpenTimeRepository::new();
        open_times
            .expect_find_by_id()
            .returning(|id| Ok(Some(entry(id, 4))));
        open_times
            .expect_delete()
            .with(eq(11))
            .times(1)
            .returning(|_| Ok(true));
        let mut users = MockUserRepository::new();
        users.expect_has_restaurant().returning(|_, _| Ok(true));

        let uow = TestUnitOfWork::builder()
            .open_times(open_times)
            .restaurants(restaurants())
            .users(users)
            .build();
        let service = OpenTimeManager::new(Arc::new(uow));

        assert!(service.delete_open_time(1, 11).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_for_unknown_restaurant_is_not_found() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|_| Ok(None));

        let uow = TestUnitOfWork::builder().restaurants(restaurants).build();
        let service = OpenTimeManager::new(Arc::new(uow));

        assert!(matches!(
            service.list_open_times(5).await,
            Err(AppError::NotFound)
        ));
    }
}
