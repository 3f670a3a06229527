//! # Backend Client
//!
//! The [`QuoteBackend`] trait and its production [`HttpBackend`]
//! implementation.
//!
//! ## Request Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One call = one request. No retries, no backoff, no cancellation,      │
//! │  no client-side timeout beyond the transport default.                  │
//! │                                                                         │
//! │  The caller (the Bulk Order Manager) decides what a failure means;     │
//! │  this layer only classifies it:                                        │
//! │                                                                         │
//! │    transport failed          → ApiError::Network                       │
//! │    body didn't parse         → ApiError::InvalidResponse               │
//! │    backend said success:false→ ApiError::Server (message verbatim)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::debug;

use cutquote_core::{ColorOption, Material};

use crate::config::BackendConfig;
use crate::error::ApiResult;
use crate::types::{
    ColorsResponse, DiscountQuote, DiscountRequest, DiscountResponse, PriceQuote, PriceRequest,
    PriceResponse, SaveBulkQuoteRequest, SaveReceipt, SaveResponse,
};

// =============================================================================
// Quote Backend Trait
// =============================================================================

/// The pricing backend as the Bulk Order Manager sees it.
///
/// Object-safe so the manager can hold `Arc<dyn QuoteBackend>` and tests
/// can swap in a scripted stub.
#[async_trait]
pub trait QuoteBackend: Send + Sync {
    /// Computes the price for one job.
    async fn calculate_price(&self, request: &PriceRequest) -> ApiResult<PriceQuote>;

    /// Lists the valid colors (with stock flags) for a material/thickness
    /// pair.
    async fn list_colors(&self, material: Material, thickness_mm: f64)
        -> ApiResult<Vec<ColorOption>>;

    /// Asks the backend to compute discount figures for the current order
    /// total.
    async fn apply_discount(&self, request: &DiscountRequest) -> ApiResult<DiscountQuote>;

    /// Persists a staged bulk quote; the server assigns the quote number.
    async fn save_bulk_quote(&self, request: &SaveBulkQuoteRequest) -> ApiResult<SaveReceipt>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// REST client for the pricing backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// Creates a client for the given backend.
    pub fn new(config: BackendConfig) -> Self {
        HttpBackend {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Creates a client from the environment ([`BackendConfig::from_env`]).
    pub fn from_env() -> Self {
        HttpBackend::new(BackendConfig::from_env())
    }
}

#[async_trait]
impl QuoteBackend for HttpBackend {
    async fn calculate_price(&self, request: &PriceRequest) -> ApiResult<PriceQuote> {
        let url = self.config.endpoint("/calculate_price");
        debug!(material = %request.material, thickness = request.thickness, "calculate_price request");

        let response: PriceResponse = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }

    async fn list_colors(
        &self,
        material: Material,
        thickness_mm: f64,
    ) -> ApiResult<Vec<ColorOption>> {
        let url = self.config.endpoint("/get_inventory_colors");
        debug!(material = %material, thickness = thickness_mm, "list_colors request");

        let response: ColorsResponse = self
            .client
            .get(&url)
            .query(&[
                ("material", material.as_str().to_string()),
                ("thickness", thickness_mm.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }

    async fn apply_discount(&self, request: &DiscountRequest) -> ApiResult<DiscountQuote> {
        let url = self.config.endpoint("/apply_discount");
        debug!(
            current_price = request.current_price,
            percentage = request.discount_percentage,
            "apply_discount request"
        );

        let response: DiscountResponse = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }

    async fn save_bulk_quote(&self, request: &SaveBulkQuoteRequest) -> ApiResult<SaveReceipt> {
        let url = self.config.endpoint("/save_bulk_quote");
        debug!(items = request.items.len(), price = request.price, "save_bulk_quote request");

        let response: SaveResponse = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .json()
            .await?;
        response.into_result()
    }
}
