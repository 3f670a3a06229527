//! # cutquote-api: Pricing Backend Client for CutQuote
//!
//! The HTTP boundary of the quoting client. Everything the rest of the
//! workspace knows about the pricing backend lives here: the wire DTOs, the
//! [`QuoteBackend`] trait that the Bulk Order Manager is written against,
//! and the [`HttpBackend`] implementation that actually talks REST.
//!
//! ## Backend Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing Backend (Flask, external)                   │
//! │                                                                         │
//! │  POST /calculate_price        job parameters → price + inventory       │
//! │  GET  /get_inventory_colors   material+thickness → valid color list    │
//! │  POST /apply_discount         current_price + pct → discount figures   │
//! │  POST /save_bulk_quote        items + customer → quote number          │
//! │                                                                         │
//! │  All responses: {success: true, ...} or {success: false, error: "…"}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why a Trait Seam?
//! The manager's behavior (stale-response discarding, best-effort save
//! pricing, error propagation) has to be tested against a deterministic
//! backend. `QuoteBackend` makes the HTTP layer swappable for a scripted
//! in-memory stub without touching the orchestration code.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{HttpBackend, QuoteBackend};
pub use config::BackendConfig;
pub use error::{ApiError, ApiResult};
pub use types::{
    DiscountQuote, DiscountRequest, PriceQuote, PriceRequest, QuoteItemPayload, SaveBulkQuoteRequest,
    SaveReceipt,
};
