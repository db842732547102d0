//! Shared request and response types.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedRestaurants, PaginationMeta, PaginationParams};
pub use response::{Created, MessageResponse, NoContent};
