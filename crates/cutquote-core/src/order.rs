//! # Bulk Order
//!
//! The staged collection of line items awaiting a single combined quote.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Bulk Order Lifecycle                                 │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│  Staged  │────►│Discounted│────►│  Saved   │       │
//! │  │  Order   │     │  Items   │     │(optional)│     │ (server) │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add_item          apply_discount   quote_number      │
//! │       │           remove_item       remove_discount  assigned          │
//! │       │                │                 │                │             │
//! │       └──── clear ─────┴─────────────────┴────────────────┘            │
//! │                                                                         │
//! │  The order has no persisted identity until the save succeeds; the      │
//! │  client then discards its local copy entirely.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Item ids are strictly increasing and unique (monotonic counter)
//! - Insertion order is display and submission order
//! - At most one discount; it never stacks
//! - `subtotal` only counts items that actually carry a price

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, DiscountError};
use crate::item::{ItemId, JobSpec, LineItem};
use crate::validation;
use crate::{MAX_ORDER_ITEMS, MIN_DISCOUNT_SUBTOTAL};

// =============================================================================
// Discount Info
// =============================================================================

/// An order-level percentage discount, set only by an explicit application
/// and cleared on save, reset, or explicit removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountInfo {
    /// Percentage in (0, 100].
    pub percentage: f64,

    /// Absolute amount deducted from the subtotal.
    pub amount: f64,

    /// Subtotal at the moment the discount was applied.
    pub original_total: f64,

    /// `original_total - amount`.
    pub final_total: f64,
}

// =============================================================================
// Bulk Order
// =============================================================================

/// A client-side staged collection of line items awaiting a single combined
/// price submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BulkOrder {
    /// Items in insertion order.
    pub items: Vec<LineItem>,

    /// Active order-level discount, if any.
    pub discount: Option<DiscountInfo>,

    /// Monotonic id counter. The next item gets `next_item_id + 1`; reset
    /// to 0 when the order clears.
    next_item_id: ItemId,

    /// When the order was created/last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl BulkOrder {
    /// Creates a new empty order.
    pub fn new() -> Self {
        BulkOrder {
            items: Vec::new(),
            discount: None,
            next_item_id: 0,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Item Collection
    // -------------------------------------------------------------------------

    /// Validates the spec's sizing fields and appends a new item.
    ///
    /// ## Behavior
    /// - Missing/non-positive width, height or time → `ValidationError`
    /// - Order already at `MAX_ORDER_ITEMS` → `OrderTooLarge`
    /// - Otherwise the item gets the next monotonic id and is appended
    ///
    /// ## Returns
    /// The assigned item id.
    pub fn add_item(&mut self, spec: JobSpec) -> CoreResult<ItemId> {
        validation::validate_job_spec(&spec)?;

        if self.items.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_ITEMS,
            });
        }

        self.next_item_id += 1;
        let id = self.next_item_id;
        self.items.push(LineItem::from_spec(id, spec));
        Ok(id)
    }

    /// Removes the item with the matching id.
    ///
    /// Other items keep their ids and fields untouched - ids are never
    /// renumbered.
    pub fn remove_item(&mut self, id: ItemId) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotFound(id))
        } else {
            Ok(())
        }
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Looks up an item by id, mutably.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// Clears the whole order atomically: items emptied, id counter back to
    /// 0, discount unset. Used after a successful save and on explicit reset.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = None;
        self.next_item_id = 0;
        self.created_at = Utc::now();
    }

    /// Returns the number of items in the order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    /// Sum of the prices of all priced items. Unpriced items contribute
    /// nothing (they are not zero-cost, they are unknown-cost).
    pub fn subtotal(&self) -> f64 {
        self.items.iter().filter_map(|i| i.price).sum()
    }

    /// Subtotal minus the active discount amount, if any.
    pub fn grand_total(&self) -> f64 {
        match &self.discount {
            Some(d) => self.subtotal() - d.amount,
            None => self.subtotal(),
        }
    }

    // -------------------------------------------------------------------------
    // Discount
    // -------------------------------------------------------------------------

    /// Checks every discount precondition without mutating anything.
    ///
    /// ## Preconditions (each with its own error)
    /// - order non-empty
    /// - subtotal at or above [`MIN_DISCOUNT_SUBTOTAL`]
    /// - percentage in (0, 100]
    /// - no discount currently applied
    pub fn ensure_discount_allowed(&self, percentage: f64) -> Result<(), DiscountError> {
        if self.items.is_empty() {
            return Err(DiscountError::EmptyOrder);
        }

        let subtotal = self.subtotal();
        if subtotal < MIN_DISCOUNT_SUBTOTAL {
            return Err(DiscountError::BelowThreshold {
                subtotal,
                minimum: MIN_DISCOUNT_SUBTOTAL,
            });
        }

        if !(percentage > 0.0 && percentage <= 100.0) {
            return Err(DiscountError::InvalidPercentage { percentage });
        }

        if self.discount.is_some() {
            return Err(DiscountError::AlreadyApplied);
        }

        Ok(())
    }

    /// Stores an applied discount. Re-checks the single-application rule in
    /// case state changed between the precondition check and the backend
    /// round-trip.
    pub fn set_discount(&mut self, info: DiscountInfo) -> Result<(), DiscountError> {
        if self.discount.is_some() {
            return Err(DiscountError::AlreadyApplied);
        }
        self.discount = Some(info);
        Ok(())
    }

    /// Removes the active discount, returning it.
    pub fn remove_discount(&mut self) -> Result<DiscountInfo, DiscountError> {
        self.discount.take().ok_or(DiscountError::NotApplied)
    }
}

impl Default for BulkOrder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Totals summary for render layers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub item_count: usize,
    /// Items that currently carry a computed price.
    pub priced_count: usize,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub grand_total: f64,
}

impl From<&BulkOrder> for OrderTotals {
    fn from(order: &BulkOrder) -> Self {
        OrderTotals {
            item_count: order.item_count(),
            priced_count: order.items.iter().filter(|i| i.price.is_some()).count(),
            subtotal: order.subtotal(),
            discount_amount: order.discount.as_ref().map(|d| d.amount).unwrap_or(0.0),
            grand_total: order.grand_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
