//! Hand-written UnitOfWork over repository mocks for service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Restaurant, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{
    MockOpenTimeRepository, MockRestaurantRepository, MockRestaurantTypeRepository,
    MockUserRepository, OpenTimeRepository, RestaurantRepository, RestaurantTypeRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    restaurants: Arc<MockRestaurantRepository>,
    open_times: Arc<MockOpenTimeRepository>,
    restaurant_types: Arc<MockRestaurantTypeRepository>,
}

#[derive(Default)]
pub(crate) struct TestUnitOfWorkBuilder {
    users: Option<MockUserRepository>,
    restaurants: Option<MockRestaurantRepository>,
    open_times: Option<MockOpenTimeRepository>,
    restaurant_types: Option<MockRestaurantTypeRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn builder() -> TestUnitOfWorkBuilder {
        TestUnitOfWorkBuilder::default()
    }
}

impl TestUnitOfWorkBuilder {
    pub(crate) fn users(mut self, repo: MockUserRepository) -> Self {
        self.users = Some(repo);
        self
    }

    pub(crate) fn restaurants(mut self, repo: MockRestaurantRepository) -> Self {
        self.restaurants = Some(repo);
        self
    }

    pub(crate) fn open_times(mut self, repo: MockOpenTimeRepository) -> Self {
        self.open_times = Some(repo);
        self
    }

    pub(crate) fn restaurant_types(mut self, repo: MockRestaurantTypeRepository) -> Self {
        self.restaurant_types = Some(repo);
        self
    }

    /// Repositories left unset get a mock with no expectations
    pub(crate) fn build(self) -> TestUnitOfWork {
        TestUnitOfWork {
            users: Arc::new(self.users.unwrap_or_default()),
            restaurants: Arc::new(self.restaurants.unwrap_or_default()),
            open_times: Arc::new(self.open_times.unwrap_or_default()),
            restaurant_types: Arc::new(self.restaurant_types.unwrap_or_default()),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn restaurants(&self) -> Arc<dyn RestaurantRepository> {
        self.restaurants.clone()
    }

    fn open_times(&self) -> Arc<dyn OpenTimeRepository> {
        self.open_times.clone()
    }

    fn restaurant_types(&self) -> Arc<dyn RestaurantTypeRepository> {
        self.restaurant_types.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactional paths are covered by the SQLite integration tests
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub(crate) fn test_user(id: i32, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: Some("hashed".to_string()),
        is_oauth: false,
        is_enable: true,
        create_at: Utc::now(),
        update_at: None,
    }
}

pub(crate) fn test_restaurant(id: i32, lat: f64, lng: f64) -> Restaurant {
    Restaurant {
        id,
        name: format!("Restaurant {}", id),
        address: format!("No. {}, Zhongzheng Rd., Taoyuan", id),
        phone: None,
        lat,
        lng,
        desc: None,
        price: None,
        is_enable: true,
        create_at: Utc::now(),
        update_at: None,
    }
}
