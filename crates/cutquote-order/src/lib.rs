//! # cutquote-order: The Bulk Order Manager
//!
//! This crate coordinates the staged bulk order against the pricing
//! backend: every mutation of an item's material/thickness/color selection
//! flows through here so that prices, inventory status and the valid-color
//! list never drift from what the user sees.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bulk Order Data Flow                                │
//! │                                                                         │
//! │  UI event ──► BulkOrderManager mutates the item list                    │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │          pricing / color-lookup requests per item                       │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │          responses merged back into item records                        │
//! │          (stale responses discarded by generation number)               │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │          UI renders from snapshot() / totals()                          │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │          submit() assembles the aggregate payload,                      │
//! │          persists it, and resets the order to empty                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod manager;
pub mod payload;

pub use error::{OrderError, OrderResult};
pub use manager::{BulkOrderManager, ItemField};
pub use payload::OrderPayload;
