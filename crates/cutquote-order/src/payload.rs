//! # Save Payload
//!
//! The finalized snapshot `prepare_for_save` produces: wire-shaped items,
//! aggregate totals, and the active discount. Building a payload never
//! mutates the staged order - the order only changes when the save call
//! actually succeeds.

use serde::Serialize;

use cutquote_api::{QuoteItemPayload, SaveBulkQuoteRequest};
use cutquote_core::{BulkOrder, CustomerInfo, DiscountInfo};

/// A finalized bulk order ready for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    /// Items in submission order, with fallback defaults filled in on the
    /// wire representation only.
    pub items: Vec<QuoteItemPayload>,

    /// Sum of all priced items before any discount.
    pub subtotal: f64,

    /// The active discount, if one was applied.
    pub discount: Option<DiscountInfo>,

    /// Subtotal minus the discount amount; what the customer pays.
    pub final_total: f64,
}

impl OrderPayload {
    /// Snapshots the current order into a payload.
    pub fn from_order(order: &BulkOrder) -> Self {
        OrderPayload {
            items: order.items.iter().map(QuoteItemPayload::from_line_item).collect(),
            subtotal: order.subtotal(),
            discount: order.discount.clone(),
            final_total: order.grand_total(),
        }
    }

    /// Shapes the payload into the persistence request body.
    pub fn into_request(self, customer: &CustomerInfo, notes: &str) -> SaveBulkQuoteRequest {
        let (discount_applied, discount_percentage, discount_amount, original_price) =
            match &self.discount {
                Some(d) => (true, d.percentage, d.amount, d.original_total),
                None => (false, 0.0, 0.0, self.subtotal),
            };

        SaveBulkQuoteRequest {
            items: self.items,
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            customer_whatsapp: String::new(),
            notes: notes.to_string(),
            price: self.final_total,
            discount_applied,
            discount_percentage,
            discount_amount,
            original_price,
        }
        .with_customer(customer)
    }
}
