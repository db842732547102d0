//! Restaurant domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::geo::Coordinate;
use super::open_time::OpenTimeResponse;
use super::restaurant_type::RestaurantTypeResponse;

/// Restaurant domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub desc: Option<String>,
    pub price: Option<i32>,
    pub is_enable: bool,
    pub create_at: DateTime<Utc>,
    /// None until the first explicit mutation
    pub update_at: Option<DateTime<Utc>>,
}

impl Restaurant {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Check whether the restaurant was ever modified after creation
    pub fn is_modified(&self) -> bool {
        self.update_at.is_some()
    }
}

/// Data needed to insert a restaurant once its coordinate is known
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub coordinate: Coordinate,
    pub desc: Option<String>,
    pub price: Option<i32>,
}

/// Restaurant as submitted for creation; the coordinate may still need a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDraft {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub desc: Option<String>,
    pub price: Option<i32>,
    pub coordinate: Option<Coordinate>,
}

impl RestaurantDraft {
    pub fn located_at(self, coordinate: Coordinate) -> NewRestaurant {
        NewRestaurant {
            name: self.name,
            address: self.address,
            phone: self.phone,
            coordinate,
            desc: self.desc,
            price: self.price,
        }
    }
}

/// Partial update of a restaurant; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub desc: Option<String>,
    pub price: Option<i32>,
}

impl RestaurantPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.desc.is_none()
            && self.price.is_none()
    }

    /// Overwrite only the fields present in the patch.
    pub fn apply_to(&self, restaurant: &mut Restaurant) {
        if let Some(name) = &self.name {
            restaurant.name = name.clone();
        }
        if let Some(address) = &self.address {
            restaurant.address = address.clone();
        }
        if let Some(phone) = &self.phone {
            restaurant.phone = Some(phone.clone());
        }
        if let Some(lat) = self.lat {
            restaurant.lat = lat;
        }
        if let Some(lng) = self.lng {
            restaurant.lng = lng;
        }
        if let Some(desc) = &self.desc {
            restaurant.desc = Some(desc.clone());
        }
        if let Some(price) = self.price {
            restaurant.price = Some(price);
        }
    }
}

/// Restaurant response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Din Tai Fung")]
    pub name: String,
    #[schema(example = "No. 139, Sec. 2, Zhongshan E. Rd., Zhongli Dist., Taoyuan City")]
    pub address: String,
    pub phone: Option<String>,
    #[schema(example = 24.94519)]
    pub lat: f64,
    #[schema(example = 121.21892)]
    pub lng: f64,
    pub desc: Option<String>,
    pub price: Option<i32>,
    pub is_enable: bool,
    pub create_at: DateTime<Utc>,
    pub update_at: Option<DateTime<Utc>>,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            phone: restaurant.phone,
            lat: restaurant.lat,
            lng: restaurant.lng,
            desc: restaurant.desc,
            price: restaurant.price,
            is_enable: restaurant.is_enable,
            create_at: restaurant.create_at,
            update_at: restaurant.update_at,
        }
    }
}

/// Restaurant together with its opening hours and tags
#[derive(Debug, Clone)]
pub struct RestaurantDetail {
    pub restaurant: Restaurant,
    pub open_times: Vec<super::OpenTime>,
    pub types: Vec<super::RestaurantType>,
}

/// Detailed restaurant response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RestaurantDetailResponse {
    #[serde(flatten)]
    pub restaurant: RestaurantResponse,
    pub open_times: Vec<OpenTimeResponse>,
    pub types: Vec<RestaurantTypeResponse>,
}

impl From<RestaurantDetail> for RestaurantDetailResponse {
    fn from(detail: RestaurantDetail) -> Self {
        Self {
            restaurant: detail.restaurant.into(),
            open_times: detail.open_times.into_iter().map(Into::into).collect(),
            types: detail.types.into_iter().map(Into::into).collect(),
        }
    }
}

/// A restaurant picked by the nearby selector
#[derive(Debug, Clone, PartialEq)]
pub struct PickedRestaurant {
    pub restaurant: Restaurant,
    pub is_open: bool,
}

/// Picked restaurant as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PickedRestaurantResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Din Tai Fung")]
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    #[schema(example = 24.94519)]
    pub lat: f64,
    #[schema(example = 121.21892)]
    pub lng: f64,
    pub desc: Option<String>,
    pub price: Option<i32>,
    /// Matched the opening-hours filter; true when no filter was requested
    pub is_open: bool,
}

impl From<PickedRestaurant> for PickedRestaurantResponse {
    fn from(picked: PickedRestaurant) -> Self {
        let r = picked.restaurant;
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            phone: r.phone,
            lat: r.lat,
            lng: r.lng,
            desc: r.desc,
            price: r.price,
            is_open: picked.is_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Restaurant {
        Restaurant {
            id: 7,
            name: "Zheng Ji Cold Noodles".to_string(),
            address: "No. 9, Heping Rd., Pingzhen Dist.".to_string(),
            phone: None,
            lat: 24.94519,
            lng: 121.21892,
            desc: None,
            price: Some(2),
            is_enable: true,
            create_at: Utc::now(),
            update_at: None,
        }
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut restaurant = sample();
        let before = restaurant.clone();
        let patch = RestaurantPatch::default();

        assert!(patch.is_empty());
        patch.apply_to(&mut restaurant);
        assert_eq!(restaurant, before);
    }

    #[test]
    fn test_patch_overwrites_only_given_fields() {
        let mut restaurant = sample();
        let patch = RestaurantPatch {
            name: Some("Renamed".to_string()),
            phone: Some("0932212849".to_string()),
            ..Default::default()
        };

        assert!(!patch.is_empty());
        patch.apply_to(&mut restaurant);

        assert_eq!(restaurant.name, "Renamed");
        assert_eq!(restaurant.phone.as_deref(), Some("0932212849"));
        assert_eq!(restaurant.address, sample().address);
        assert_eq!(restaurant.price, Some(2));
        assert_eq!(restaurant.coordinate(), Coordinate::new(24.94519, 121.21892));
    }

    #[test]
    fn test_picked_response_carries_open_flag() {
        let response = PickedRestaurantResponse::from(PickedRestaurant {
            restaurant: sample(),
            is_open: true,
        });

        assert_eq!(response.id, 7);
        assert!(response.is_open);
    }
}
