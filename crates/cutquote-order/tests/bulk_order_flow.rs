//! End-to-end flows through the Bulk Order Manager against a scripted
//! backend: staging a mixed-specificity order, the discount lifecycle,
//! save/clear semantics, and discarding of out-of-order pricing responses.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use cutquote_api::{
    ApiError, ApiResult, DiscountQuote, DiscountRequest, PriceQuote, PriceRequest,
    QuoteBackend, SaveBulkQuoteRequest, SaveReceipt,
};
use cutquote_core::{ColorOption, CustomerInfo, ItemState, JobSpec, Material};
use cutquote_order::{BulkOrderManager, ItemField};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Scripted Backend
// =============================================================================

/// One scripted outcome for a `/calculate_price` call. The optional gate
/// holds the response until the test releases it, which is how the
/// out-of-order tests interleave two in-flight requests.
struct PriceScript {
    price: f64,
    started: Option<oneshot::Sender<()>>,
    gate: Option<oneshot::Receiver<()>>,
}

impl PriceScript {
    fn immediate(price: f64) -> Self {
        PriceScript {
            price,
            started: None,
            gate: None,
        }
    }
}

#[derive(Default)]
struct ScriptedBackend {
    price_scripts: Mutex<VecDeque<PriceScript>>,
    colors: Mutex<Vec<ColorOption>>,
    fail_save: Mutex<bool>,
    price_calls: AtomicUsize,
    saved: Mutex<Vec<SaveBulkQuoteRequest>>,
}

impl ScriptedBackend {
    fn push_price(&self, script: PriceScript) {
        self.price_scripts.lock().unwrap().push_back(script);
    }

    fn set_colors(&self, names: &[&str]) {
        *self.colors.lock().unwrap() = names
            .iter()
            .map(|name| ColorOption {
                color: name.to_string(),
                stock: 30.0,
                in_stock: true,
            })
            .collect();
    }
}

#[async_trait]
impl QuoteBackend for ScriptedBackend {
    async fn calculate_price(&self, _request: &PriceRequest) -> ApiResult<PriceQuote> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        // Pop under the lock, await the gate without it.
        let script = self
            .price_scripts
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted calculate_price call");
        if let Some(started) = script.started {
            let _ = started.send(());
        }
        if let Some(gate) = script.gate {
            let _ = gate.await;
        }
        Ok(PriceQuote {
            price: script.price,
            inventory: None,
            warnings: Vec::new(),
        })
    }

    async fn list_colors(
        &self,
        _material: Material,
        _thickness_mm: f64,
    ) -> ApiResult<Vec<ColorOption>> {
        Ok(self.colors.lock().unwrap().clone())
    }

    async fn apply_discount(&self, request: &DiscountRequest) -> ApiResult<DiscountQuote> {
        let amount = request.current_price * request.discount_percentage / 100.0;
        Ok(DiscountQuote {
            original_price: request.current_price,
            discount_percentage: request.discount_percentage,
            discount_amount: amount,
            new_price: request.current_price - amount,
        })
    }

    async fn save_bulk_quote(&self, request: &SaveBulkQuoteRequest) -> ApiResult<SaveReceipt> {
        if *self.fail_save.lock().unwrap() {
            return Err(ApiError::server("database is locked"));
        }
        self.saved.lock().unwrap().push(request.clone());
        Ok(SaveReceipt {
            quote_number: format!("Q2026082500{}", self.saved.lock().unwrap().len()),
            items_count: request.items.len() as u32,
            total_price: request.price,
            message: Some("saved".to_string()),
        })
    }
}

fn setup() -> (Arc<ScriptedBackend>, BulkOrderManager) {
    init_tracing();
    let backend = Arc::new(ScriptedBackend::default());
    backend.set_colors(&["Clear", "Red", "Black"]);
    let manager = BulkOrderManager::new(backend.clone());
    (backend, manager)
}

fn acrylic_job(color: Option<&str>) -> JobSpec {
    JobSpec {
        material: Some(Material::Acrylic),
        thickness_mm: Some(3.0),
        color: color.map(str::to_string),
        ..JobSpec::sized(300.0, 200.0, 15.0)
    }
}

// =============================================================================
// Staging & Reconciliation
// =============================================================================

#[tokio::test]
async fn mixed_specificity_order_reaches_consistent_totals() {
    let (backend, manager) = setup();

    // Fully specified on arrival: priced immediately.
    backend.push_price(PriceScript::immediate(4500.0));
    let first = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    // Sizing only: staged, no request issued.
    let second = manager
        .add_item(JobSpec::sized(150.0, 150.0, 8.0))
        .await
        .unwrap();

    let totals = manager.totals();
    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.priced_count, 1);
    assert_eq!(totals.subtotal, 4500.0);

    // The second item is specified step by step; pricing fires only once
    // material, thickness and color are all present.
    manager
        .update_item_field(second, ItemField::Material(Material::Mdf))
        .await
        .unwrap();
    manager
        .update_item_field(second, ItemField::Thickness(6.0))
        .await
        .unwrap();
    assert_eq!(backend.price_calls.load(Ordering::SeqCst), 1);

    backend.push_price(PriceScript::immediate(2500.0));
    manager
        .update_item_field(second, ItemField::Color("Black".to_string()))
        .await
        .unwrap();

    let totals = manager.totals();
    assert_eq!(totals.priced_count, 2);
    assert_eq!(totals.subtotal, 7000.0);
    assert_eq!(totals.grand_total, 7000.0);

    manager.with_order(|order| {
        assert_eq!(order.item(first).unwrap().state(), ItemState::Priced);
        assert_eq!(order.item(second).unwrap().state(), ItemState::Priced);
    });
}

#[tokio::test]
async fn thickness_change_reprices_and_revalidates_color() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(4500.0));
    let id = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    // Same material family still offers Clear at 5mm: color survives and
    // the price is recomputed for the new thickness.
    backend.push_price(PriceScript::immediate(6200.0));
    manager
        .update_item_field(id, ItemField::Thickness(5.0))
        .await
        .unwrap();

    manager.with_order(|order| {
        let item = order.item(id).unwrap();
        assert_eq!(item.color.as_deref(), Some("Clear"));
        assert_eq!(item.price, Some(6200.0));
        assert_eq!(item.state(), ItemState::Priced);
    });
}

#[tokio::test]
async fn material_change_drops_color_no_longer_offered() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(4500.0));
    let id = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    backend.set_colors(&["Natural", "Walnut"]);
    manager
        .update_item_field(id, ItemField::Material(Material::Wood))
        .await
        .unwrap();

    manager.with_order(|order| {
        let item = order.item(id).unwrap();
        assert_eq!(item.color, None);
        assert_eq!(item.state(), ItemState::AwaitingColor);
        // The old price stays on the record but the item is visibly not
        // Priced until a color is chosen and a recompute succeeds.
        assert_eq!(item.price, Some(4500.0));
    });
    // Color gone, so no pricing request was issued for the new material.
    assert_eq!(backend.price_calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Out-of-order Responses
// =============================================================================

#[tokio::test]
async fn late_pricing_response_is_discarded() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(1000.0));
    let id = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    // First recompute is held at the backend; second completes immediately.
    let (gate_tx, gate_rx) = oneshot::channel();
    let (started_tx, started_rx) = oneshot::channel();
    backend.push_price(PriceScript {
        price: 1111.0,
        started: Some(started_tx),
        gate: Some(gate_rx),
    });

    let slow_manager = manager.clone();
    let slow = tokio::spawn(async move { slow_manager.recompute_price(id).await });
    started_rx.await.unwrap();

    backend.push_price(PriceScript::immediate(2222.0));
    manager.recompute_price(id).await.unwrap();
    manager.with_order(|order| {
        assert_eq!(order.item(id).unwrap().price, Some(2222.0));
    });

    // Releasing the older response must not overwrite the newer price.
    gate_tx.send(()).unwrap();
    slow.await.unwrap().unwrap();

    manager.with_order(|order| {
        let item = order.item(id).unwrap();
        assert_eq!(item.price, Some(2222.0));
        assert_eq!(item.state(), ItemState::Priced);
    });
}

#[tokio::test]
async fn pricing_response_for_removed_item_is_discarded() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(1000.0));
    let id = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    let (gate_tx, gate_rx) = oneshot::channel();
    let (started_tx, started_rx) = oneshot::channel();
    backend.push_price(PriceScript {
        price: 9999.0,
        started: Some(started_tx),
        gate: Some(gate_rx),
    });

    let slow_manager = manager.clone();
    let slow = tokio::spawn(async move { slow_manager.recompute_price(id).await });
    started_rx.await.unwrap();

    manager.remove_item(id).unwrap();
    gate_tx.send(()).unwrap();

    assert!(slow.await.unwrap().is_err());
    manager.with_order(|order| assert!(order.is_empty()));
}

// =============================================================================
// Discount Lifecycle
// =============================================================================

#[tokio::test]
async fn discount_applies_once_above_threshold() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(6000.0));
    manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();

    // 6000 is below the threshold.
    assert!(manager.apply_discount(10.0).await.is_err());

    backend.push_price(PriceScript::immediate(8000.0));
    manager.add_item(acrylic_job(Some("Red"))).await.unwrap();

    let info = manager.apply_discount(10.0).await.unwrap();
    assert_eq!(info.original_total, 14000.0);
    assert_eq!(info.amount, 1400.0);
    assert_eq!(info.final_total, 12600.0);
    assert_eq!(manager.totals().grand_total, 12600.0);

    // Stacking blocked; removal re-opens.
    assert!(manager.apply_discount(5.0).await.is_err());
    manager.remove_discount().unwrap();
    assert_eq!(manager.totals().grand_total, 14000.0);
    assert!(manager.apply_discount(15.0).await.is_ok());
}

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn save_assembles_payload_and_clears_order() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(6000.0));
    manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();
    backend.push_price(PriceScript::immediate(8000.0));
    manager.add_item(acrylic_job(Some("Red"))).await.unwrap();
    manager.apply_discount(10.0).await.unwrap();

    let customer = CustomerInfo {
        name: "Hamza".to_string(),
        phone: "0321-9876543".to_string(),
        ..CustomerInfo::default()
    };
    let receipt = manager.submit(&customer, "deliver monday").await.unwrap();
    assert_eq!(receipt.items_count, 2);
    assert_eq!(receipt.total_price, 12600.0);

    let saved = backend.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let request = &saved[0];
    assert_eq!(request.items.len(), 2);
    assert_eq!(request.customer_name, "Hamza");
    assert_eq!(request.notes, "deliver monday");
    assert!(request.discount_applied);
    assert_eq!(request.original_price, 14000.0);
    assert_eq!(request.price, 12600.0);
    drop(saved);

    // Order fully reset: empty, no discount, ids start over.
    let totals = manager.totals();
    assert_eq!(totals.item_count, 0);
    assert_eq!(totals.grand_total, 0.0);
    backend.push_price(PriceScript::immediate(1000.0));
    let id = manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn save_prices_incomplete_items_best_effort() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(6000.0));
    manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();
    // No color: not priced at add time, picked up at save time.
    manager.add_item(acrylic_job(None)).await.unwrap();
    // No material at all: saved unpriced, never blocks the save.
    manager
        .add_item(JobSpec::sized(80.0, 80.0, 4.0))
        .await
        .unwrap();

    backend.push_price(PriceScript::immediate(3000.0));
    let receipt = manager.submit(&CustomerInfo::default(), "").await.unwrap();
    assert_eq!(receipt.items_count, 3);
    assert_eq!(receipt.total_price, 9000.0);

    let saved = backend.saved.lock().unwrap();
    let items = &saved[0].items;
    assert_eq!(items[0].price, 6000.0);
    assert_eq!(items[1].price, 3000.0);
    // Fallback defaults appear on the wire for the best-effort item.
    assert_eq!(items[1].complexity, 3);
    assert_eq!(items[1].quantity, 1);
    // The material-less item goes out with a zero price.
    assert_eq!(items[2].price, 0.0);
    assert_eq!(items[2].material, "");
}

#[tokio::test]
async fn failed_save_leaves_order_intact() {
    let (backend, manager) = setup();

    backend.push_price(PriceScript::immediate(6000.0));
    manager.add_item(acrylic_job(Some("Clear"))).await.unwrap();
    backend.push_price(PriceScript::immediate(8000.0));
    manager.add_item(acrylic_job(Some("Red"))).await.unwrap();
    manager.apply_discount(10.0).await.unwrap();

    *backend.fail_save.lock().unwrap() = true;
    let err = manager
        .submit(&CustomerInfo::default(), "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "database is locked");

    // Everything still staged for a retry.
    let totals = manager.totals();
    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.subtotal, 14000.0);
    assert_eq!(totals.grand_total, 12600.0);

    *backend.fail_save.lock().unwrap() = false;
    let receipt = manager.submit(&CustomerInfo::default(), "").await.unwrap();
    assert_eq!(receipt.items_count, 2);
    manager.with_order(|order| assert!(order.is_empty()));
}

#[tokio::test]
async fn empty_order_cannot_be_saved() {
    let (_backend, manager) = setup();
    assert!(manager.submit(&CustomerInfo::default(), "").await.is_err());
}
