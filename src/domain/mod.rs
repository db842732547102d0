//! Domain layer: entities, value objects and the pure predicates behind the
//! restaurant picker.

pub mod geo;
pub mod open_time;
pub mod password;
pub mod restaurant;
pub mod restaurant_type;
pub mod selection;
pub mod user;

pub use geo::Coordinate;
pub use open_time::{
    parse_clock_time, OpenTime, OpenTimeDraft, OpenTimeInput, OpenTimePatch,
    OpenTimePatchInput, OpenTimeResponse,
};
pub use password::Password;
pub use restaurant::{
    NewRestaurant, PickedRestaurant, PickedRestaurantResponse, Restaurant, RestaurantDetail,
    RestaurantDetailResponse, RestaurantDraft, RestaurantPatch, RestaurantResponse,
};
pub use restaurant_type::{RestaurantType, RestaurantTypeResponse};
pub use selection::NearbyQuery;
pub use user::{OAuthAccount, User, UserResponse};
