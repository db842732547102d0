//! Daily Food - restaurant picker API.
//!
//! Users save restaurants they like, attach opening hours and cuisine tags,
//! and ask the server to pick something to eat within walking distance.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: `serve` and `migrate`
//! - **config**: environment configuration and constants
//! - **domain**: entities, distance and opening-hours predicates, the random pick
//! - **infra**: database, repositories, Unit of Work, geocoding client
//! - **services**: use cases behind trait objects
//! - **api**: axum handlers, middleware and routes
//! - **types**: pagination and response helpers
//! - **errors**: `AppError` and its HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! cargo run -- serve --port 8000
//! cargo run -- migrate status
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

pub use api::AppState;
pub use config::Config;
pub use domain::{Coordinate, Password, Restaurant, User};
pub use errors::{AppError, AppResult};
