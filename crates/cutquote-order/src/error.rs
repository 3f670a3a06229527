//! # Order Error Type
//!
//! Unified error type the UI layer sees from the Bulk Order Manager.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in CutQuote                               │
//! │                                                                         │
//! │  ValidationError ─┐                                                     │
//! │  DiscountError  ──┼── CoreError ──┐                                     │
//! │  ItemNotFound   ──┘               ├── OrderError ──► notification UI    │
//! │                                   │                                     │
//! │  Network / Server ── ApiError ────┘                                     │
//! │                                                                         │
//! │  Every error is terminal at this boundary: surfaced once, logged,      │
//! │  never retried automatically. Retries are user-initiated.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use cutquote_api::ApiError;
use cutquote_core::CoreError;

/// Errors from Bulk Order Manager operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Domain rule violation (validation, discount preconditions, missing
    /// item). No request was sent, no state changed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Backend failure (transport or server-reported). The item/order state
    /// the request was about is left untouched.
    #[error(transparent)]
    Backend(#[from] ApiError),
}

impl OrderError {
    /// Whether this error came from a discount precondition.
    pub fn is_discount(&self) -> bool {
        matches!(self, OrderError::Core(CoreError::Discount(_)))
    }

    /// Whether this error came from input validation (no request was sent).
    pub fn is_validation(&self) -> bool {
        matches!(self, OrderError::Core(CoreError::Validation(_)))
    }
}

/// Convenience type alias for Results with OrderError.
pub type OrderResult<T> = Result<T, OrderError>;
