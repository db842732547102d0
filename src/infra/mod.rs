//! Infrastructure layer: database, repositories, transactions and the
//! geocoding client.

pub mod db;
pub mod geocoding;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use geocoding::{Geocoder, MapQuestClient};
pub use repositories::{
    OpenTimeRepository, RestaurantRepository, RestaurantTypeRepository, UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use geocoding::MockGeocoder;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockOpenTimeRepository, MockRestaurantRepository, MockRestaurantTypeRepository,
    MockUserRepository,
};
