//! Application services: use cases on top of the Unit of Work.
//!
//! Each service is a trait object behind `Arc` with a concrete
//! implementation generic over [`UnitOfWork`](crate::infra::UnitOfWork).

mod auth_service;
pub mod container;
mod open_time_service;
mod restaurant_service;
mod restaurant_type_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use open_time_service::{OpenTimeManager, OpenTimeService};
pub use restaurant_service::{RestaurantManager, RestaurantService};
pub use restaurant_type_service::{RestaurantTypeManager, RestaurantTypeService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use open_time_service::MockOpenTimeService;
#[cfg(any(test, feature = "test-utils"))]
pub use restaurant_service::MockRestaurantService;
#[cfg(any(test, feature = "test-utils"))]
pub use restaurant_type_service::MockRestaurantTypeService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
