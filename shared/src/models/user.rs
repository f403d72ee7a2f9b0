//! User Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Owner,
    Admin,
}

/// Public user profile
///
/// Passwords never leave the backend store, so this type has no password
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    pub profile_image: Option<String>,
    pub is_active: bool,
    /// Restaurant managed by an owner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub wallet_balance: Decimal,
    #[serde(default)]
    pub loyalty_points: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user manages the given restaurant
    pub fn owns_restaurant(&self, restaurant_id: &str) -> bool {
        self.role == Role::Owner && self.restaurant_id.as_deref() == Some(restaurant_id)
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Profile fields a user may change themselves
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub profile_image: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(v) = update.name {
            self.name = v.trim().to_string();
        }
        if let Some(v) = update.phone {
            self.phone = v;
        }
        if let Some(v) = update.profile_image {
            self.profile_image = Some(v).filter(|s| !s.is_empty());
        }
    }
}

/// Password change; the current password must match
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordChange {
    pub old_password: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub new_password: String,
}

/// Activate or deactivate a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_profile_update_ignores_email_and_role() {
        let mut user: User = serde_json::from_value(serde_json::json!({
            "id": "user_001",
            "name": "John Doe",
            "email": "john.doe@example.com",
            "role": "customer",
            "profile_image": null,
            "is_active": true,
            "created_at": "2024-01-15T10:30:00Z"
        }))
        .unwrap();
        let update: ProfileUpdate = serde_json::from_value(serde_json::json!({
            "name": " Johnny ",
            "email": "evil@example.com",
            "role": "admin"
        }))
        .unwrap();
        user.apply(update);
        assert_eq!(user.name, "Johnny");
        assert_eq!(user.email, "john.doe@example.com");
        assert_eq!(user.role, Role::Customer);

        let blank = ProfileUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_register_validation() {
        let ok = RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
            phone: None,
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            ..ok
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
