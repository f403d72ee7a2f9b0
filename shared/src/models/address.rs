//! Address Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery address entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub user_id: String,
    pub label: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_default: bool,
    pub delivery_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Address {
    /// One-line rendering used as the order's delivery address
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.address_line1.as_str()];
        if let Some(line2) = self.address_line2.as_deref().filter(|s| !s.is_empty()) {
            parts.push(line2);
        }
        parts.push(self.city.as_str());
        format!("{}, {} {}", parts.join(", "), self.state, self.zip_code)
    }

    pub fn apply(&mut self, update: AddressUpdate) {
        if let Some(v) = update.label {
            self.label = v;
        }
        if let Some(v) = update.address_line1 {
            self.address_line1 = v;
        }
        if let Some(v) = update.address_line2 {
            self.address_line2 = Some(v);
        }
        if let Some(v) = update.city {
            self.city = v;
        }
        if let Some(v) = update.state {
            self.state = v;
        }
        if let Some(v) = update.zip_code {
            self.zip_code = v;
        }
        if let Some(v) = update.is_default {
            self.is_default = v;
        }
        if let Some(v) = update.delivery_instructions {
            self.delivery_instructions = Some(v);
        }
    }
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressCreate {
    #[validate(length(min = 1, max = 50, message = "label is required"))]
    pub label: String,
    #[validate(length(min = 1, message = "address_line1 is required"))]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[validate(length(min = 1, max = 12, message = "zip_code is invalid"))]
    pub zip_code: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub delivery_instructions: Option<String>,
}

/// Update address payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AddressUpdate {
    #[validate(length(min = 1, max = 50))]
    pub label: Option<String>,
    #[validate(length(min = 1))]
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: Option<String>,
    pub state: Option<String>,
    #[validate(length(min = 1, max = 12))]
    pub zip_code: Option<String>,
    pub is_default: Option<bool>,
    pub delivery_instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address {
            id: "ADDR_1".to_string(),
            user_id: "user_001".to_string(),
            label: "Home".to_string(),
            address_line1: "742 Evergreen Terrace".to_string(),
            address_line2: Some("Apartment 4B".to_string()),
            city: "Manhattan".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            latitude: None,
            longitude: None,
            is_default: true,
            delivery_instructions: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_one_line() {
        assert_eq!(
            address().one_line(),
            "742 Evergreen Terrace, Apartment 4B, Manhattan, NY 10001"
        );
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut addr = address();
        addr.apply(AddressUpdate {
            label: Some("Office".to_string()),
            ..Default::default()
        });
        assert_eq!(addr.label, "Office");
        assert_eq!(addr.city, "Manhattan");
    }
}
