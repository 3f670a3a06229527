//! # Wire Types
//!
//! Request and response bodies for the pricing backend, field-for-field as
//! the Flask service reads and writes them.
//!
//! ## Envelope Convention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every endpoint answers one of:                                         │
//! │                                                                         │
//! │    {"success": true,  ...payload fields...}                             │
//! │    {"success": false, "error": "human readable message"}                │
//! │                                                                         │
//! │  The raw *Response structs model both shapes; into_result() turns      │
//! │  them into a typed Ok(payload) / Err(ApiError::Server).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fallback Defaults
//! The backend tolerates partially specified jobs by substituting defaults
//! (letters 0, shapes 1, complexity 3, ...). The client mirrors those
//! constants from `cutquote-core` when serializing an item whose optional
//! fields were never filled in - on the wire only, never back onto the item.

use serde::{Deserialize, Serialize};

use cutquote_core::{
    ColorOption, CustomerInfo, InventoryStatus, LineItem, DEFAULT_COMPLEXITY, DEFAULT_DETAILS,
    DEFAULT_LETTERS, DEFAULT_QUANTITY, DEFAULT_RUSH, DEFAULT_SHAPES, DEFAULT_TIME_MINUTES,
};

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Price Calculation
// =============================================================================

/// Request body for `POST /calculate_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    pub material: String,
    pub thickness: f64,
    /// Empty string when no color is chosen yet - the backend then prices
    /// with a best-effort material cost.
    pub color: String,
    pub letters: u32,
    pub shapes: u32,
    pub complexity: u8,
    pub details: bool,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "cuttingType")]
    pub cutting_type: String,
    pub time: f64,
    pub quantity: u32,
    pub rush: bool,
}

impl PriceRequest {
    /// Builds a pricing request from a line item, substituting the business
    /// fallback defaults for optional fields that are still unset.
    ///
    /// Callers must ensure the item is priceable (material and thickness
    /// present); this is a pure data-shaping step.
    pub fn from_line_item(item: &LineItem) -> Self {
        PriceRequest {
            material: item
                .material
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            thickness: item.thickness_mm.unwrap_or(0.0),
            color: item.color.clone().unwrap_or_default(),
            letters: item.letters.unwrap_or(DEFAULT_LETTERS),
            shapes: item.shapes.unwrap_or(DEFAULT_SHAPES),
            complexity: item.complexity.unwrap_or(DEFAULT_COMPLEXITY),
            details: item.details.unwrap_or(DEFAULT_DETAILS),
            width: item.width_mm,
            height: item.height_mm,
            cutting_type: item.cutting_type.as_str().to_string(),
            time: if item.time_minutes > 0.0 {
                item.time_minutes
            } else {
                DEFAULT_TIME_MINUTES
            },
            quantity: item.quantity.unwrap_or(DEFAULT_QUANTITY),
            rush: item.rush.unwrap_or(DEFAULT_RUSH),
        }
    }
}

/// A successful price computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
    pub inventory: Option<InventoryStatus>,
    pub warnings: Vec<String>,
}

/// Raw response body for `POST /calculate_price`.
#[derive(Debug, Deserialize)]
pub struct PriceResponse {
    pub success: bool,
    pub price: Option<f64>,
    pub inventory: Option<InventoryStatus>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl PriceResponse {
    pub fn into_result(self) -> ApiResult<PriceQuote> {
        if !self.success {
            return Err(server_error(self.error));
        }
        let price = self
            .price
            .ok_or_else(|| ApiError::invalid_response("price missing from successful response"))?;
        Ok(PriceQuote {
            price,
            inventory: self.inventory,
            warnings: self.warnings,
        })
    }
}

// =============================================================================
// Inventory Colors
// =============================================================================

/// Raw response body for `GET /get_inventory_colors`.
#[derive(Debug, Deserialize)]
pub struct ColorsResponse {
    pub success: bool,
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    pub error: Option<String>,
}

impl ColorsResponse {
    pub fn into_result(self) -> ApiResult<Vec<ColorOption>> {
        if !self.success {
            return Err(server_error(self.error));
        }
        Ok(self.colors)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// Request body for `POST /apply_discount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRequest {
    pub current_price: f64,
    pub discount_percentage: f64,
}

/// The backend's discount computation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscountQuote {
    pub original_price: f64,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub new_price: f64,
}

/// Raw response body for `POST /apply_discount`.
#[derive(Debug, Deserialize)]
pub struct DiscountResponse {
    pub success: bool,
    #[serde(flatten)]
    pub quote: Option<DiscountQuote>,
    pub error: Option<String>,
}

impl DiscountResponse {
    pub fn into_result(self) -> ApiResult<DiscountQuote> {
        if !self.success {
            return Err(server_error(self.error));
        }
        self.quote.ok_or_else(|| {
            ApiError::invalid_response("discount figures missing from successful response")
        })
    }
}

// =============================================================================
// Bulk Quote Persistence
// =============================================================================

/// One line item as `POST /save_bulk_quote` reads it. Every field concrete;
/// fallback defaults fill anything the user never specified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItemPayload {
    pub name: String,
    pub material: String,
    pub thickness: f64,
    pub color: String,
    pub width: f64,
    pub height: f64,
    pub letters: u32,
    pub shapes: u32,
    pub complexity: u8,
    pub details: bool,
    #[serde(rename = "cuttingType")]
    pub cutting_type: String,
    pub time: f64,
    pub quantity: u32,
    pub rush: bool,
    /// 0.0 for an item that could not be priced even best-effort.
    pub price: f64,
}

impl QuoteItemPayload {
    /// Shapes a line item for persistence. Like [`PriceRequest`], defaults
    /// land on the wire only.
    pub fn from_line_item(item: &LineItem) -> Self {
        QuoteItemPayload {
            name: item.name.clone(),
            material: item
                .material
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            thickness: item.thickness_mm.unwrap_or(0.0),
            color: item.color.clone().unwrap_or_default(),
            width: item.width_mm,
            height: item.height_mm,
            letters: item.letters.unwrap_or(DEFAULT_LETTERS),
            shapes: item.shapes.unwrap_or(DEFAULT_SHAPES),
            complexity: item.complexity.unwrap_or(DEFAULT_COMPLEXITY),
            details: item.details.unwrap_or(DEFAULT_DETAILS),
            cutting_type: item.cutting_type.as_str().to_string(),
            time: item.time_minutes,
            quantity: item.quantity.unwrap_or(DEFAULT_QUANTITY),
            rush: item.rush.unwrap_or(DEFAULT_RUSH),
            price: item.price.unwrap_or(0.0),
        }
    }
}

/// Request body for `POST /save_bulk_quote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveBulkQuoteRequest {
    pub items: Vec<QuoteItemPayload>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_whatsapp: String,
    pub notes: String,
    /// Final order total after any discount.
    pub price: f64,
    pub discount_applied: bool,
    pub discount_percentage: f64,
    pub discount_amount: f64,
    pub original_price: f64,
}

impl SaveBulkQuoteRequest {
    /// Attaches customer contact details to a payload.
    pub fn with_customer(mut self, customer: &CustomerInfo) -> Self {
        self.customer_name = customer.name.clone();
        self.customer_email = customer.email.clone();
        self.customer_phone = customer.phone.clone();
        self.customer_whatsapp = customer.whatsapp.clone();
        self
    }
}

/// Server acknowledgement of a persisted bulk quote.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SaveReceipt {
    /// Server-assigned quote number, e.g. "Q20260825007".
    pub quote_number: String,
    pub items_count: u32,
    pub total_price: f64,
    /// Server's confirmation message, when present.
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw response body for `POST /save_bulk_quote`.
#[derive(Debug, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: Option<SaveReceipt>,
    pub error: Option<String>,
}

impl SaveResponse {
    pub fn into_result(self) -> ApiResult<SaveReceipt> {
        if !self.success {
            return Err(server_error(self.error));
        }
        self.receipt
            .ok_or_else(|| ApiError::invalid_response("receipt missing from successful response"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn server_error(error: Option<String>) -> ApiError {
    ApiError::server(error.unwrap_or_else(|| "Unknown backend error".to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
