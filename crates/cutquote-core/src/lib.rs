//! # cutquote-core: Pure Business Logic for CutQuote
//!
//! This crate is the **heart** of CutQuote. It contains the bulk-order
//! domain model as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CutQuote Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Quoting Web UI                               │   │
//! │  │    Job Form ──► Bulk Order Table ──► Discount ──► Save          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              cutquote-order (Bulk Order Manager)                │   │
//! │  │    add_item, update_item_field, recompute_price, submit         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cutquote-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   item    │  │   order   │  │ validation│   │   │
//! │  │   │ Material  │  │ LineItem  │  │ BulkOrder │  │   rules   │   │   │
//! │  │   │ Inventory │  │ ItemState │  │ Discount  │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                cutquote-api (Backend Client)                    │   │
//! │  │          /calculate_price, /get_inventory_colors, ...           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Material, CuttingType, InventoryStatus, ...)
//! - [`item`] - Line items and their completeness-driven state machine
//! - [`order`] - The staged bulk order and discount rules
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system access is FORBIDDEN here
//! 3. **Explicit Unset**: Unknown fields are `Option::None`, never `0` or `""`
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cutquote_core::BulkOrder` instead of
// `use cutquote_core::order::BulkOrder`

pub use error::{CoreError, DiscountError, ValidationError};
pub use item::{ItemId, ItemState, JobSpec, LineItem};
pub use order::{BulkOrder, DiscountInfo};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum order subtotal (in currency units) required before a percentage
/// discount may be applied.
///
/// ## Why a constant?
/// This is a hardcoded business rule inherited from the shop's pricing
/// policy. It is named here rather than inlined so product ownership can
/// revisit it without a code hunt.
pub const MIN_DISCOUNT_SUBTOTAL: f64 = 10_500.0;

/// Maximum line items allowed in a single bulk order.
///
/// ## Business Reason
/// Prevents runaway orders (e.g., a misparsed design file exploding into
/// thousands of jobs) and keeps quote PDFs printable.
pub const MAX_ORDER_ITEMS: usize = 50;

/// Maximum material thickness accepted, in millimeters.
pub const MAX_THICKNESS_MM: f64 = 100.0;

/// Maximum sheet dimension accepted, in millimeters (10 meters).
pub const MAX_DIMENSION_MM: f64 = 10_000.0;

/// Maximum estimated cutting time accepted, in minutes (24 hours).
pub const MAX_CUTTING_TIME_MINUTES: f64 = 1_440.0;

// -----------------------------------------------------------------------------
// Pricing fallback defaults
// -----------------------------------------------------------------------------
// Used when a best-effort pricing request must be issued for an item whose
// optional complexity fields were never filled in. They are applied ONLY to
// the outgoing request, never written back onto the item record.

/// Fallback letter count for unpriced items at save time.
pub const DEFAULT_LETTERS: u32 = 0;

/// Fallback shape count for unpriced items at save time.
pub const DEFAULT_SHAPES: u32 = 1;

/// Fallback complexity score (mid-scale) for unpriced items at save time.
pub const DEFAULT_COMPLEXITY: u8 = 3;

/// Fallback intricate-details flag for unpriced items at save time.
pub const DEFAULT_DETAILS: bool = false;

/// Fallback rush flag for unpriced items at save time.
pub const DEFAULT_RUSH: bool = false;

/// Fallback cutting time in minutes for unpriced items at save time.
pub const DEFAULT_TIME_MINUTES: f64 = 10.0;

/// Fallback quantity for unpriced items at save time.
pub const DEFAULT_QUANTITY: u32 = 1;
