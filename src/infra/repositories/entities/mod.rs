//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod oauth;
pub mod open_time;
pub mod restaurant;
pub mod restaurant_type;
pub mod restaurant_type_link;
pub mod user;
pub mod user_restaurant;

#[allow(unused_imports)]
pub use open_time::{ActiveModel as OpenTimeActiveModel, Entity as OpenTimeEntity};
#[allow(unused_imports)]
pub use restaurant::{ActiveModel as RestaurantActiveModel, Entity as RestaurantEntity};
#[allow(unused_imports)]
pub use restaurant_type::{ActiveModel as RestaurantTypeActiveModel, Entity as RestaurantTypeEntity};
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity};
