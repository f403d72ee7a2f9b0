//! Unified error system for the storefront
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: `{code, message, details}` wire form of an error
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Routing and transport errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Catalog errors
//! - 7xxx: Account data errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CouponInvalid);
//!
//! let err = AppError::with_message(ErrorCode::CouponBelowMinimum, "Minimum order amount is 30.00")
//!     .with_detail("min_order_amount", "30.00");
//!
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 5002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
