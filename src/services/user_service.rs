//! User service: account lookup and deletion, saved restaurants and the
//! ownership check used by every restaurant mutation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Restaurant, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Delete the account along with its OAuth record and saved restaurants
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    async fn list_restaurants(&self, user_id: i32) -> AppResult<Vec<Restaurant>>;

    /// Save an existing restaurant; saving twice is a no-op
    async fn save_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()>;

    /// Forget a saved restaurant; forgetting an unsaved one is a no-op
    async fn unsave_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()>;

    /// True iff the user has saved the restaurant. Unknown ids yield false.
    async fn check_is_user_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool>;
}

/// Load a restaurant the user is allowed to modify.
///
/// Existence is checked first (NotFound), then the saved link (Forbidden).
pub(crate) async fn owned_restaurant<U: UnitOfWork>(
    uow: &U,
    user_id: i32,
    restaurant_id: i32,
) -> AppResult<Restaurant> {
    let restaurant = uow
        .restaurants()
        .find_by_id(restaurant_id)
        .await?
        .ok_or_not_found()?;

    if !uow.users().has_restaurant(user_id, restaurant_id).await? {
        tracing::debug!(user_id, restaurant_id, "Restaurant not saved by user");
        return Err(AppError::Forbidden);
    }

    Ok(restaurant)
}

pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn existing_restaurant(&self, restaurant_id: i32) -> AppResult<Restaurant> {
        self.uow
            .restaurants()
            .find_by_id(restaurant_id)
            .await?
            .ok_or_not_found()
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let deleted = with_transaction!(self.uow, |ctx| ctx.users().delete(id).await)?;

        if !deleted {
            return Err(AppError::NotFound);
        }

        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn list_restaurants(&self, user_id: i32) -> AppResult<Vec<Restaurant>> {
        self.uow.users().list_restaurants(user_id).await
    }

    async fn save_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()> {
        self.existing_restaurant(restaurant_id).await?;
        self.uow.users().save_restaurant(user_id, restaurant_id).await
    }

    async fn unsave_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<()> {
        self.existing_restaurant(restaurant_id).await?;
        self.uow
            .users()
            .unsave_restaurant(user_id, restaurant_id)
            .await?;
        Ok(())
    }

    async fn check_is_user_restaurant(&self, user_id: i32, restaurant_id: i32) -> AppResult<bool> {
        self.uow.users().has_restaurant(user_id, restaurant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockRestaurantRepository, MockUserRepository};
    use crate::services::test_support::{test_restaurant, test_user, TestUnitOfWork};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn restaurants_with(id: i32) -> MockRestaurantRepository {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_find_by_id()
            .returning(move |rid| Ok((rid == id).then(|| test_restaurant(rid, 24.9, 121.2))));
        restaurants
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().with(eq(9)).returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(TestUnitOfWork::builder().users(users).build()));

        assert!(matches!(service.get_user(9).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(test_user(id, "andy"))));

        let service = UserManager::new(Arc::new(TestUnitOfWork::builder().users(users).build()));

        assert_eq!(service.get_user(1).await.unwrap().username, "andy");
    }

    #[tokio::test]
    async fn test_owned_restaurant_checks_existence_first() {
        let mut users = MockUserRepository::new();
        users.expect_has_restaurant().never();

        let uow = TestUnitOfWork::builder()
            .users(users)
            .restaurants(restaurants_with(1))
            .build();

        assert!(matches!(
            owned_restaurant(&uow, 5, 2).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_owned_restaurant_forbidden_for_other_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_has_restaurant()
            .returning(|user_id, _| Ok(user_id == 1));

        let uow = TestUnitOfWork::builder()
            .users(users)
            .restaurants(restaurants_with(3))
            .build();

        assert!(matches!(
            owned_restaurant(&uow, 2, 3).await,
            Err(AppError::Forbidden)
        ));
        assert_eq!(owned_restaurant(&uow, 1, 3).await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_save_unknown_restaurant_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_save_restaurant().never();

        let service = UserManager::new(Arc::new(
            TestUnitOfWork::builder()
                .users(users)
                .restaurants(restaurants_with(1))
                .build(),
        ));

        assert_err!(service.save_restaurant(4, 99).await);
    }

    #[tokio::test]
    async fn test_save_and_check() {
        let mut users = MockUserRepository::new();
        users
            .expect_save_restaurant()
            .with(eq(4), eq(1))
            .times(1)
            .returning(|_, _| Ok(()));
        users
            .expect_has_restaurant()
            .with(eq(4), eq(1))
            .returning(|_, _| Ok(true));

        let service = UserManager::new(Arc::new(
            TestUnitOfWork::builder()
                .users(users)
                .restaurants(restaurants_with(1))
                .build(),
        ));

        assert_ok!(service.save_restaurant(4, 1).await);
        assert!(service.check_is_user_restaurant(4, 1).await.unwrap());
    }
}
