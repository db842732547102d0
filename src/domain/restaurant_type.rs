//! Restaurant type (cuisine tag).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantType {
    pub id: i32,
    pub name: String,
    pub desc: Option<String>,
    pub create_at: DateTime<Utc>,
    pub update_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantTypeResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "noodles")]
    pub name: String,
    pub desc: Option<String>,
}

impl From<RestaurantType> for RestaurantTypeResponse {
    fn from(kind: RestaurantType) -> Self {
        Self {
            id: kind.id,
            name: kind.name,
            desc: kind.desc,
        }
    }
}
