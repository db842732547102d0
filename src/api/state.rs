//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, Geocoder};
use crate::services::{
    AuthService, OpenTimeService, RestaurantService, RestaurantTypeService, ServiceContainer,
    Services, UserService,
};

/// Dependency-injection container handed to axum as router state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub restaurant_service: Arc<dyn RestaurantService>,
    pub open_time_service: Arc<dyn OpenTimeService>,
    pub restaurant_type_service: Arc<dyn RestaurantTypeService>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build every service over the given database and geocoder.
    pub fn from_config(database: Arc<Database>, geocoder: Arc<dyn Geocoder>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), geocoder, config);
        Self::new(&container, database)
    }

    /// Take services from any container, e.g. a mocked one in router tests.
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            restaurant_service: container.restaurants(),
            open_time_service: container.open_times(),
            restaurant_type_service: container.restaurant_types(),
            database,
        }
    }
}
