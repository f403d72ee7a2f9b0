//! Review Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Restaurant review entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub restaurant_id: String,
    pub order_id: Option<String>,
    pub rating: u8,
    pub comment: String,
    pub food_rating: Option<u8>,
    pub delivery_rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[validate(length(min = 1))]
    pub restaurant_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "food_rating must be between 1 and 5"))]
    pub food_rating: Option<u8>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "delivery_rating must be between 1 and 5"))]
    pub delivery_rating: Option<u8>,
}
