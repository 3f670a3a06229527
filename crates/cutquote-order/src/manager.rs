//! # Bulk Order Manager
//!
//! Owns the staged bulk order and coordinates it against the pricing
//! backend.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Bulk Order Manager Operations                           │
//! │                                                                         │
//! │  UI Action              Manager Operation        State Change           │
//! │  ─────────              ─────────────────        ────────────           │
//! │                                                                         │
//! │  Add Job ──────────────► add_item() ────────────► items.push(item)     │
//! │                          (+ immediate pricing when fully specified)    │
//! │                                                                         │
//! │  Pick Material ────────► update_item_field() ───► color list refresh,  │
//! │  Pick Thickness          (Material/Thickness)     stale color unset    │
//! │                                                                         │
//! │  Pick Color ───────────► update_item_field() ───► recompute_price()    │
//! │                          (Color)                                        │
//! │                                                                         │
//! │  Remove Row ───────────► remove_item() ─────────► items.retain(...)    │
//! │                                                                         │
//! │  Apply Discount ───────► apply_discount() ──────► discount = Some(...)  │
//! │                                                                         │
//! │  Save Order ───────────► submit() ──────────────► order cleared on      │
//! │                                                   success only          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<T>>` because UI handlers and
//! in-flight response continuations may touch it concurrently. The lock is
//! only ever held across synchronous mutation - NEVER across an await - so
//! backend calls for different items overlap freely.
//!
//! ## Stale Responses
//! Overlapping pricing requests for the same item are allowed. Each request
//! snapshots a fresh per-item generation number before the lock is
//! released; when a response arrives, it is applied only if the item still
//! exists and its generation is still the latest issued. An older response
//! arriving late is discarded, not merged.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use cutquote_api::{DiscountRequest, PriceRequest, QuoteBackend, SaveReceipt};
use cutquote_core::{
    BulkOrder, CoreError, CustomerInfo, DiscountInfo, ItemId, JobSpec, Material,
    ValidationError, validation,
};
use cutquote_core::order::OrderTotals;

use crate::error::{OrderError, OrderResult};
use crate::payload::OrderPayload;

// =============================================================================
// Item Field
// =============================================================================

/// The three selection fields whose updates drive reconciliation.
///
/// Width/height/time are fixed at insertion; material, thickness and color
/// are the fields the user refines afterwards, and the only ones whose
/// changes invalidate a computed price.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Material(Material),
    Thickness(f64),
    /// An empty or whitespace-only string unsets the color (the UI's
    /// "choose a color" placeholder).
    Color(String),
}

// =============================================================================
// Bulk Order Manager
// =============================================================================

/// Coordinates the staged bulk order against the pricing backend.
///
/// ## Lifecycle
/// `new → add/update/remove/discount* → submit (clears) | reset (clears)`
///
/// One manager per quoting session; there are no ambient globals. The
/// manager is cheap to clone - clones share the same staged order.
#[derive(Clone)]
pub struct BulkOrderManager {
    order: Arc<Mutex<BulkOrder>>,
    backend: Arc<dyn QuoteBackend>,
}

impl BulkOrderManager {
    /// Creates a manager with an empty order.
    pub fn new(backend: Arc<dyn QuoteBackend>) -> Self {
        BulkOrderManager {
            order: Arc::new(Mutex::new(BulkOrder::new())),
            backend,
        }
    }

    // -------------------------------------------------------------------------
    // Read Access
    // -------------------------------------------------------------------------

    /// Executes a function with read access to the order.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = manager.with_order(|order| OrderTotals::from(order));
    /// ```
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BulkOrder) -> R,
    {
        let order = self.order.lock().expect("Order mutex poisoned");
        f(&order)
    }

    fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BulkOrder) -> R,
    {
        let mut order = self.order.lock().expect("Order mutex poisoned");
        f(&mut order)
    }

    /// Clones the current order for rendering.
    pub fn snapshot(&self) -> BulkOrder {
        self.with_order(|order| order.clone())
    }

    /// Current totals summary.
    pub fn totals(&self) -> OrderTotals {
        self.with_order(|order| OrderTotals::from(order))
    }

    // -------------------------------------------------------------------------
    // Item Collection
    // -------------------------------------------------------------------------

    /// Stages a new job.
    ///
    /// ## Behavior
    /// - Sizing fields (width, height, time) are validated up front; a
    ///   `ValidationError` means nothing was staged and no request was sent.
    /// - When material, thickness and color are all already present, a
    ///   pricing request is issued immediately. A pricing failure at this
    ///   point is logged, not returned - the item stays staged unpriced and
    ///   the user retries via a field update or an explicit recompute.
    ///
    /// ## Returns
    /// The assigned item id.
    pub async fn add_item(&self, spec: JobSpec) -> OrderResult<ItemId> {
        let (id, fully_specified) = self.with_order_mut(|order| {
            let id = order.add_item(spec)?;
            let fully_specified = order
                .item(id)
                .map(|item| item.is_fully_specified())
                .unwrap_or(false);
            Ok::<_, CoreError>((id, fully_specified))
        })?;
        debug!(item = id, fully_specified, "item staged");

        if fully_specified {
            if let Err(err) = self.recompute_price(id).await {
                warn!(item = id, error = %err, "initial pricing failed; item staged unpriced");
            }
        }

        Ok(id)
    }

    /// Removes a staged item. Other items keep their ids and fields.
    ///
    /// An outstanding pricing request for the removed item is not
    /// cancelled; its response is discarded on arrival.
    pub fn remove_item(&self, id: ItemId) -> OrderResult<()> {
        self.with_order_mut(|order| order.remove_item(id))?;
        debug!(item = id, "item removed");
        Ok(())
    }

    /// Discards the staged order without saving.
    pub fn reset(&self) {
        self.with_order_mut(|order| order.clear());
        debug!("order reset");
    }

    // -------------------------------------------------------------------------
    // Field Updates & Reconciliation
    // -------------------------------------------------------------------------

    /// Updates one selection field and reconciles the item.
    ///
    /// ## Behavior
    /// 1. The field is mutated (a previously priced item becomes stale).
    /// 2. If material and thickness are now both set, the valid-color list
    ///    for the pair is fetched; a chosen color the new pair does not
    ///    offer is unset - never silently keep a stale color/material
    ///    pairing. A lookup failure propagates; the field mutation stands.
    /// 3. If material, thickness and color are all set, the price is
    ///    recomputed.
    ///
    /// Safe to call repeatedly and in any field order (color before
    /// thickness is fine) - behavior depends only on the current values.
    pub async fn update_item_field(&self, id: ItemId, field: ItemField) -> OrderResult<()> {
        let pair = self.with_order_mut(|order| {
            let item = order.item_mut(id).ok_or(CoreError::ItemNotFound(id))?;
            match field {
                ItemField::Material(material) => item.set_material(material),
                ItemField::Thickness(thickness) => {
                    validation::validate_thickness(thickness).map_err(CoreError::from)?;
                    item.set_thickness(thickness);
                }
                ItemField::Color(color) => {
                    let color = color.trim();
                    if color.is_empty() {
                        item.clear_color();
                    } else {
                        item.set_color(color.to_string());
                    }
                }
            }
            Ok::<_, CoreError>(item.material.zip(item.thickness_mm))
        })?;

        if let Some((material, thickness_mm)) = pair {
            let colors = self.backend.list_colors(material, thickness_mm).await?;
            let invalidated = self.with_order_mut(|order| {
                let item = order.item_mut(id).ok_or(CoreError::ItemNotFound(id))?;
                Ok::<_, CoreError>(item.refresh_colors(colors))
            })?;
            if invalidated {
                info!(item = id, %material, thickness_mm, "chosen color not valid for new selection; unset");
            }
        }

        let fully_specified = self.with_order(|order| {
            order
                .item(id)
                .map(|item| item.is_fully_specified())
                .unwrap_or(false)
        });
        if fully_specified {
            self.recompute_price(id).await?;
        }

        Ok(())
    }

    /// Recomputes the price for one item.
    ///
    /// ## Preconditions
    /// Material, thickness and the sizing fields must be set; color is
    /// desirable but not required (colorless jobs get a best-effort
    /// material cost).
    ///
    /// ## Failure
    /// A backend failure leaves the previous price and inventory status
    /// untouched and propagates; there is no automatic retry.
    pub async fn recompute_price(&self, id: ItemId) -> OrderResult<()> {
        let (request, generation) = self.with_order_mut(|order| {
            let item = order.item_mut(id).ok_or(CoreError::ItemNotFound(id))?;
            if !item.is_priceable() {
                let field = if item.material.is_none() {
                    "material"
                } else {
                    "thickness"
                };
                return Err(CoreError::Validation(ValidationError::Required {
                    field: field.to_string(),
                }));
            }
            let generation = item.next_pricing_generation();
            Ok((PriceRequest::from_line_item(item), generation))
        })?;

        // Lock released: the await below may overlap with other requests,
        // edits, or removal of this very item.
        let quote = self.backend.calculate_price(&request).await?;

        self.with_order_mut(|order| {
            let item = match order.item_mut(id) {
                Some(item) => item,
                None => {
                    debug!(item = id, "pricing response for removed item discarded");
                    return Err(CoreError::ItemNotFound(id).into());
                }
            };
            if item.pricing_generation != generation {
                debug!(
                    item = id,
                    generation,
                    latest = item.pricing_generation,
                    "stale pricing response discarded"
                );
                return Ok(());
            }
            for warning in &quote.warnings {
                warn!(item = id, warning = %warning, "pricing warning");
            }
            item.apply_pricing(quote.price, quote.inventory.clone());
            debug!(item = id, price = quote.price, "price updated");
            Ok::<_, OrderError>(())
        })
    }

    // -------------------------------------------------------------------------
    // Discount
    // -------------------------------------------------------------------------

    /// Applies an order-level percentage discount.
    ///
    /// ## Preconditions (checked locally, no request sent on violation)
    /// - order non-empty
    /// - subtotal at or above the discount threshold
    /// - percentage in (0, 100]
    /// - no discount already applied
    ///
    /// The backend computes the authoritative figures; they are stored as
    /// the order's `DiscountInfo`. A discount never stacks - it clears only
    /// on save, reset, or [`remove_discount`](Self::remove_discount).
    pub async fn apply_discount(&self, percentage: f64) -> OrderResult<DiscountInfo> {
        let subtotal = self.with_order(|order| {
            order
                .ensure_discount_allowed(percentage)
                .map_err(CoreError::from)?;
            Ok::<_, CoreError>(order.subtotal())
        })?;

        let quote = self
            .backend
            .apply_discount(&DiscountRequest {
                current_price: subtotal,
                discount_percentage: percentage,
            })
            .await?;

        let info = DiscountInfo {
            percentage: quote.discount_percentage,
            amount: quote.discount_amount,
            original_total: quote.original_price,
            final_total: quote.new_price,
        };
        self.with_order_mut(|order| order.set_discount(info.clone()))
            .map_err(CoreError::from)?;
        info!(percentage, amount = info.amount, "discount applied");
        Ok(info)
    }

    /// Removes the active discount.
    pub fn remove_discount(&self) -> OrderResult<DiscountInfo> {
        let removed = self
            .with_order_mut(|order| order.remove_discount())
            .map_err(CoreError::from)?;
        debug!(amount = removed.amount, "discount removed");
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Save
    // -------------------------------------------------------------------------

    /// Finalizes the order for persistence.
    ///
    /// Every item still without a price gets one best-effort pricing
    /// attempt with fallback defaults substituted for missing optional
    /// fields - on the wire only, never written onto the item. A failed or
    /// impossible attempt (no material yet) is logged and skipped so a
    /// single incomplete item never blocks the save.
    ///
    /// Builds and returns the payload; the staged order itself is not
    /// mutated beyond legitimately updated prices.
    pub async fn prepare_for_save(&self) -> OrderResult<OrderPayload> {
        let pending = self.with_order_mut(|order| {
            if order.is_empty() {
                return Err(CoreError::Validation(ValidationError::EmptyOrder));
            }
            let pending: Vec<(ItemId, PriceRequest, u64)> = order
                .items
                .iter_mut()
                .filter(|item| !item.price.map(|p| p > 0.0).unwrap_or(false))
                .filter(|item| {
                    if item.material.is_none() || item.thickness_mm.is_none() {
                        debug!(item = item.id, "no material/thickness; saved unpriced");
                        return false;
                    }
                    true
                })
                .map(|item| {
                    let generation = item.next_pricing_generation();
                    (item.id, PriceRequest::from_line_item(item), generation)
                })
                .collect();
            Ok(pending)
        })?;

        // Each item is independent; sequential keeps the error handling
        // simple and the backend is a single local service anyway.
        for (id, request, generation) in pending {
            match self.backend.calculate_price(&request).await {
                Ok(quote) => self.with_order_mut(|order| {
                    if let Some(item) = order.item_mut(id) {
                        if item.pricing_generation == generation {
                            item.apply_pricing(quote.price, quote.inventory.clone());
                            debug!(item = id, price = quote.price, "best-effort price filled in");
                        }
                    }
                }),
                Err(err) => {
                    warn!(item = id, error = %err, "best-effort pricing failed; saved unpriced");
                }
            }
        }

        Ok(self.with_order(OrderPayload::from_order))
    }

    /// Persists the staged order as one bulk quote.
    ///
    /// ## Behavior
    /// - Success: the order is cleared atomically (items empty, id counter
    ///   back to 0, discount unset) and the server's receipt is returned.
    /// - Failure: the order and discount are left fully intact for retry.
    pub async fn submit(
        &self,
        customer: &CustomerInfo,
        notes: &str,
    ) -> OrderResult<SaveReceipt> {
        let payload = self.prepare_for_save().await?;
        let request = payload.into_request(customer, notes);

        let receipt = self.backend.save_bulk_quote(&request).await?;

        self.with_order_mut(|order| order.clear());
        info!(
            quote_number = %receipt.quote_number,
            items = receipt.items_count,
            total = receipt.total_price,
            "bulk quote saved"
        );
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
