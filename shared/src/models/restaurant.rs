//! Restaurant Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Restaurant entity (catalog row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub city: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    /// Display string such as "30-40 min"
    pub delivery_time: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl Restaurant {
    pub fn apply(&mut self, update: RestaurantUpdate) {
        if let Some(v) = update.name {
            self.name = v.trim().to_string();
        }
        if let Some(v) = update.cuisine {
            self.cuisine = v;
        }
        if let Some(v) = update.city {
            self.city = v;
        }
        if let Some(v) = update.address {
            self.address = v;
        }
        if let Some(v) = update.delivery_time {
            self.delivery_time = v;
        }
        if let Some(v) = update.image_url {
            self.image_url = Some(v).filter(|s| !s.is_empty());
        }
    }
}

/// Owner edits to a restaurant's listing
///
/// Rating and active flag are not editable here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RestaurantUpdate {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub cuisine: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    pub address: Option<String>,
    pub delivery_time: Option<String>,
    pub image_url: Option<String>,
}

/// Open or close a restaurant for orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantStatusUpdate {
    pub is_active: bool,
}

/// Restaurant list filters
///
/// `city` and `cuisine` match case-insensitively and exactly. `search` is a
/// case-insensitive substring match over name, cuisine and city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        if let Some(city) = non_empty(&self.city)
            && !restaurant.city.eq_ignore_ascii_case(city.trim())
        {
            return false;
        }
        if let Some(cuisine) = non_empty(&self.cuisine)
            && !restaurant.cuisine.eq_ignore_ascii_case(cuisine.trim())
        {
            return false;
        }
        if let Some(search) = non_empty(&self.search) {
            let needle = search.trim().to_lowercase();
            let hit = [&restaurant.name, &restaurant.cuisine, &restaurant.city]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
