//! Unified error codes for the storefront
//!
//! Error codes are shared by the mock backend, the client façade and any
//! frontend that renders them. They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Routing and transport errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Catalog errors
//! - 7xxx: Account data errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Routing ====================
    /// No local handler matches the request
    RouteNotFound = 3001,
    /// Backend could not be reached
    NetworkError = 3002,
    /// Backend did not answer in time
    TimeoutError = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been delivered
    OrderAlreadyCompleted = 4003,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4004,
    /// Order can no longer be cancelled
    OrderNotCancellable = 4005,
    /// Order has no lines
    OrderEmpty = 4007,
    /// Order lines belong to more than one restaurant
    OrderMixedRestaurants = 4008,

    // ==================== 5xxx: Coupon ====================
    /// Coupon code unknown, inactive or exhausted
    CouponInvalid = 5001,
    /// Order amount below coupon minimum
    CouponBelowMinimum = 5002,
    /// User not eligible for coupon
    CouponNotEligible = 5003,

    // ==================== 6xxx: Catalog ====================
    /// Restaurant not found
    RestaurantNotFound = 6001,
    /// Menu item not found
    MenuItemNotFound = 6002,
    /// Catalog source could not be read
    CatalogUnavailable = 6003,

    // ==================== 7xxx: Account data ====================
    /// User not found
    UserNotFound = 7001,
    /// Address not found
    AddressNotFound = 7002,
    /// Payment method not found
    PaymentMethodNotFound = 7003,
    /// Notification not found
    NotificationNotFound = 7004,
    /// Wallet balance does not cover the amount
    InsufficientBalance = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Storage error
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Routing
            ErrorCode::RouteNotFound => "No handler for this route",
            ErrorCode::NetworkError => "Backend is unreachable",
            ErrorCode::TimeoutError => "Backend request timed out",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyCompleted => "Order has already been delivered",
            ErrorCode::OrderAlreadyCancelled => "Order has already been cancelled",
            ErrorCode::OrderNotCancellable => "Order can no longer be cancelled",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::OrderMixedRestaurants => "Order items must come from one restaurant",

            // Coupon
            ErrorCode::CouponInvalid => "Invalid coupon code",
            ErrorCode::CouponBelowMinimum => "Order amount is below the coupon minimum",
            ErrorCode::CouponNotEligible => "This coupon is only valid for new users",

            // Catalog
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::CatalogUnavailable => "Catalog data is unavailable",

            // Account data
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::AddressNotFound => "Address not found",
            ErrorCode::PaymentMethodNotFound => "Payment method not found",
            ErrorCode::NotificationNotFound => "Notification not found",
            ErrorCode::InsufficientBalance => "Insufficient wallet balance",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Routing
            3001 => Ok(ErrorCode::RouteNotFound),
            3002 => Ok(ErrorCode::NetworkError),
            3003 => Ok(ErrorCode::TimeoutError),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4003 => Ok(ErrorCode::OrderAlreadyCompleted),
            4004 => Ok(ErrorCode::OrderAlreadyCancelled),
            4005 => Ok(ErrorCode::OrderNotCancellable),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderMixedRestaurants),

            // Coupon
            5001 => Ok(ErrorCode::CouponInvalid),
            5002 => Ok(ErrorCode::CouponBelowMinimum),
            5003 => Ok(ErrorCode::CouponNotEligible),

            // Catalog
            6001 => Ok(ErrorCode::RestaurantNotFound),
            6002 => Ok(ErrorCode::MenuItemNotFound),
            6003 => Ok(ErrorCode::CatalogUnavailable),

            // Account data
            7001 => Ok(ErrorCode::UserNotFound),
            7002 => Ok(ErrorCode::AddressNotFound),
            7003 => Ok(ErrorCode::PaymentMethodNotFound),
            7004 => Ok(ErrorCode::NotificationNotFound),
            7005 => Ok(ErrorCode::InsufficientBalance),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_through_u16() {
        for code in [
            ErrorCode::Unknown,
            ErrorCode::RouteNotFound,
            ErrorCode::OrderAlreadyCompleted,
            ErrorCode::CouponBelowMinimum,
            ErrorCode::PaymentMethodNotFound,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::CouponInvalid).unwrap();
        assert_eq!(json, "5001");
        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::RouteNotFound);
    }
}
