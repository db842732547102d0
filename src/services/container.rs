//! Service container: one place to reach every application service.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, OpenTimeManager, OpenTimeService, RestaurantManager,
    RestaurantService, RestaurantTypeManager, RestaurantTypeService, UserManager, UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Geocoder, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn restaurants(&self) -> Arc<dyn RestaurantService>;

    fn open_times(&self) -> Arc<dyn OpenTimeService>;

    fn restaurant_types(&self) -> Arc<dyn RestaurantTypeService>;
}

pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    restaurant_service: Arc<dyn RestaurantService>,
    open_time_service: Arc<dyn OpenTimeService>,
    restaurant_type_service: Arc<dyn RestaurantTypeService>,
}

impl Services {
    /// Wire every service over one database connection and one geocoder
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        geocoder: Arc<dyn Geocoder>,
        config: Config,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            restaurant_service: Arc::new(RestaurantManager::new(uow.clone(), geocoder)),
            open_time_service: Arc::new(OpenTimeManager::new(uow.clone())),
            restaurant_type_service: Arc::new(RestaurantTypeManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn restaurants(&self) -> Arc<dyn RestaurantService> {
        self.restaurant_service.clone()
    }

    fn open_times(&self) -> Arc<dyn OpenTimeService> {
        self.open_time_service.clone()
    }

    fn restaurant_types(&self) -> Arc<dyn RestaurantTypeService> {
        self.restaurant_type_service.clone()
    }
}

/// Run independent lookups concurrently.
pub mod parallel {
    use super::*;
    use tokio::try_join;

    /// Await two independent operations; the first error wins.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, "two");
    }

    #[tokio::test]
    async fn test_parallel_join2_propagates_error() {
        async fn ok() -> AppResult<i32> {
            Ok(1)
        }
        async fn missing() -> AppResult<i32> {
            Err(AppError::NotFound)
        }

        assert!(matches!(
            parallel::join2(ok(), missing()).await,
            Err(AppError::NotFound)
        ));
    }
}
