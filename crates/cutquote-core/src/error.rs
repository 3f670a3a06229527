//! # Error Types
//!
//! Domain-specific error types for cutquote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cutquote-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── DiscountError    - Discount precondition violations               │
//! │                                                                         │
//! │  cutquote-api errors (separate crate)                                  │
//! │  └── ApiError         - Transport and server-reported failures         │
//! │                                                                         │
//! │  cutquote-order errors (separate crate)                                │
//! │  └── OrderError       - What the UI layer sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → OrderError → Frontend             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, subtotal, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item cannot be found in the staged order.
    ///
    /// ## When This Occurs
    /// - Item id doesn't exist (already removed)
    /// - A pricing response arrives for an item removed mid-flight
    #[error("Item not found: {0}")]
    ItemNotFound(u32),

    /// Bulk order has exceeded maximum allowed items.
    #[error("Order cannot have more than {max} items")]
    OrderTooLarge { max: usize },

    /// Discount precondition violation (wraps DiscountError).
    #[error("Discount error: {0}")]
    Discount(#[from] DiscountError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a job specification doesn't meet requirements.
/// Used for early validation before any pricing request is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The order has no items to operate on.
    #[error("Order is empty")]
    EmptyOrder,
}

// =============================================================================
// Discount Error
// =============================================================================

/// Discount precondition violations.
///
/// Each variant yields a distinct user-facing message so the UI can tell
/// the user exactly which rule blocked the discount.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// No items staged - nothing to discount.
    #[error("Cannot apply a discount to an empty order")]
    EmptyOrder,

    /// Order subtotal has not reached the discount floor.
    #[error("Order subtotal {subtotal:.2} is below the discount threshold of {minimum:.2}")]
    BelowThreshold { subtotal: f64, minimum: f64 },

    /// Percentage outside (0, 100].
    #[error("Discount percentage {percentage} must be greater than 0 and at most 100")]
    InvalidPercentage { percentage: f64 },

    /// A discount is already applied; discounts do not stack.
    #[error("A discount has already been applied to this order")]
    AlreadyApplied,

    /// No discount to remove.
    #[error("No discount is applied to this order")]
    NotApplied,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
