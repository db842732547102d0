//! HTTP request handlers.
//!
//! Each module hands out a public router and, where needed, a router that
//! `create_router` mounts behind the bearer-token middleware.

pub mod auth_handler;
pub mod open_time_handler;
pub mod restaurant_handler;
pub mod restaurant_type_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use open_time_handler::{open_time_routes, protected_open_time_routes};
pub use restaurant_handler::{protected_restaurant_routes, restaurant_routes};
pub use restaurant_type_handler::{protected_restaurant_type_routes, restaurant_type_routes};
pub use user_handler::user_routes;
