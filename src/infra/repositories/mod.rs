//! Repository layer - Data access abstraction
//!
//! Each repository is a trait (mockable in tests) with a SeaORM-backed store.
//! Operations that must share a transaction are exposed as crate-level
//! functions generic over the connection and reused by the unit of work.

pub(crate) mod entities;
pub(crate) mod open_time_repository;
pub(crate) mod restaurant_repository;
pub(crate) mod restaurant_type_repository;
pub(crate) mod user_repository;

pub use open_time_repository::{OpenTimeRepository, OpenTimeStore};
pub use restaurant_repository::{RestaurantRepository, RestaurantStore};
pub use restaurant_type_repository::{RestaurantTypeRepository, RestaurantTypeStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use open_time_repository::MockOpenTimeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use restaurant_repository::MockRestaurantRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use restaurant_type_repository::MockRestaurantTypeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
