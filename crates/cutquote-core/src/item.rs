//! # Line Items
//!
//! A line item is one cutting job inside a staged bulk order.
//!
//! ## Item State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Line Item States (derived, never stored)                │
//! │                                                                         │
//! │  ┌────────────────┐ set material  ┌──────────────┐  set color          │
//! │  │ AwaitingMaterial│──────────────►│ AwaitingColor│─────────────┐      │
//! │  │ (sized, no      │  + thickness  │ (mat+thick,  │             │      │
//! │  │  mat/thickness) │               │  no color)   │             ▼      │
//! │  └────────────────┘               └──────────────┘      ┌──────────┐   │
//! │          ▲                                              │  Stale   │   │
//! │          │ clear material/thickness                     │ (pricing │   │
//! │          │                                              │  pending)│   │
//! │  ┌───────┴────────┐    edit mat/thickness/color         └────┬─────┘   │
//! │  │     Priced     │◄────────────────────────────────────────┘         │
//! │  │ (last pricing  │         pricing request succeeds                   │
//! │  │  succeeded)    │                                                    │
//! │  └────────────────┘                                                    │
//! │                                                                         │
//! │  Transitions are driven exclusively by field updates - no timers.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unset vs Zero
//! Every "maybe known" field is an `Option`. A `price` of `None` means
//! "never priced"; a price of `Some(0.0)` would mean "a free job". The two
//! are never conflated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{ColorOption, CuttingType, InventoryStatus, Material};

/// Identifier of a line item, unique within one staged order.
///
/// Assigned from the order's monotonic counter; never reused and never
/// renumbered when other items are removed.
pub type ItemId = u32;

// =============================================================================
// Job Spec
// =============================================================================

/// The insertion input for a new line item.
///
/// Every field is optional so that both sources of items map in directly:
/// - a manually entered job (all parameters filled),
/// - a job extracted from a parsed design file, where the analyzer supplies
///   sizing and complexity but material/thickness/color come later.
///
/// Sizing (width, height, time) is validated as required at insertion;
/// everything else may stay unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobSpec {
    pub name: Option<String>,
    pub material: Option<Material>,
    pub thickness_mm: Option<f64>,
    pub color: Option<String>,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub time_minutes: Option<f64>,
    pub letters: Option<u32>,
    pub shapes: Option<u32>,
    /// Complexity score 1-5.
    pub complexity: Option<u8>,
    pub details: Option<bool>,
    pub cutting_type: Option<CuttingType>,
    pub quantity: Option<u32>,
    pub rush: Option<bool>,
}

impl JobSpec {
    /// Creates a spec with just the required sizing fields set.
    pub fn sized(width_mm: f64, height_mm: f64, time_minutes: f64) -> Self {
        JobSpec {
            width_mm: Some(width_mm),
            height_mm: Some(height_mm),
            time_minutes: Some(time_minutes),
            ..JobSpec::default()
        }
    }
}

// =============================================================================
// Item State
// =============================================================================

/// Field-completeness state of a line item. Derived on demand from the
/// item's current fields, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Sized, but material or thickness not yet chosen.
    AwaitingMaterial,
    /// Material and thickness chosen, color not yet chosen. The price may
    /// already hold a best-effort estimate.
    AwaitingColor,
    /// Fully specified and the last pricing request succeeded.
    Priced,
    /// Fully specified but edited since the last successful pricing (or not
    /// yet successfully priced at all).
    Stale,
}

// =============================================================================
// Line Item
// =============================================================================

/// One cutting job within a bulk order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Unique id within the order (monotonic, assigned on insertion).
    pub id: ItemId,

    /// Display name, user supplied or auto-generated ("Item {id}").
    pub name: String,

    /// Sheet material, `None` until chosen.
    pub material: Option<Material>,

    /// Material thickness in millimeters, `None` until chosen.
    pub thickness_mm: Option<f64>,

    /// Material color, `None` until chosen. Only meaningful once material
    /// and thickness are set; cleared when it stops being valid for the
    /// current pair.
    pub color: Option<String>,

    /// Job width in millimeters.
    pub width_mm: f64,

    /// Job height in millimeters.
    pub height_mm: f64,

    /// Estimated cutting time in minutes.
    pub time_minutes: f64,

    /// Number of letters to cut (complexity input).
    pub letters: Option<u32>,

    /// Number of shapes to cut (complexity input).
    pub shapes: Option<u32>,

    /// Complexity score 1-5.
    pub complexity: Option<u8>,

    /// Whether the design has intricate details.
    pub details: Option<bool>,

    /// Machine this job runs on.
    pub cutting_type: CuttingType,

    /// Number of copies.
    pub quantity: Option<u32>,

    /// Expedited turnaround requested.
    pub rush: Option<bool>,

    /// Quoted price, `None` until a pricing request succeeds.
    pub price: Option<f64>,

    /// Inventory status from the last successful pricing.
    pub inventory: Option<InventoryStatus>,

    /// Valid colors for the current material/thickness pair, refreshed on
    /// every material or thickness change.
    pub available_colors: Vec<ColorOption>,

    /// Set when material/thickness/color changes after a successful pricing;
    /// cleared by the next successful pricing. Client-side only.
    #[serde(skip)]
    #[ts(skip)]
    pub stale: bool,

    /// Sequence number of the latest pricing request issued for this item.
    /// Responses carrying an older number are discarded. Client-side only.
    #[serde(skip)]
    #[ts(skip)]
    pub pricing_generation: u64,

    /// When this item was added to the order.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Builds a line item from a validated spec and a freshly assigned id.
    ///
    /// The caller (the order) is responsible for having validated the
    /// sizing fields; this constructor only shapes the data.
    pub(crate) fn from_spec(id: ItemId, spec: JobSpec) -> Self {
        LineItem {
            id,
            name: spec
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Item {}", id)),
            material: spec.material,
            thickness_mm: spec.thickness_mm,
            color: spec.color.filter(|c| !c.trim().is_empty()),
            width_mm: spec.width_mm.unwrap_or(0.0),
            height_mm: spec.height_mm.unwrap_or(0.0),
            time_minutes: spec.time_minutes.unwrap_or(0.0),
            letters: spec.letters,
            shapes: spec.shapes,
            complexity: spec.complexity,
            details: spec.details,
            cutting_type: spec.cutting_type.unwrap_or_default(),
            quantity: spec.quantity,
            rush: spec.rush,
            price: None,
            inventory: None,
            available_colors: Vec::new(),
            stale: false,
            pricing_generation: 0,
            added_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Completeness
    // -------------------------------------------------------------------------

    /// An item is priceable iff material, thickness and the sizing fields
    /// are all set. Color is desirable but not required - the backend
    /// prices colorless jobs with a best-effort material cost.
    pub fn is_priceable(&self) -> bool {
        self.material.is_some()
            && self.thickness_mm.is_some()
            && self.width_mm > 0.0
            && self.height_mm > 0.0
            && self.time_minutes > 0.0
    }

    /// Fully specified = priceable + color chosen.
    pub fn is_fully_specified(&self) -> bool {
        self.is_priceable() && self.color.is_some()
    }

    /// Derives the current state from field completeness.
    pub fn state(&self) -> ItemState {
        if self.material.is_none() || self.thickness_mm.is_none() {
            ItemState::AwaitingMaterial
        } else if self.color.is_none() {
            ItemState::AwaitingColor
        } else if self.price.is_some() && !self.stale {
            ItemState::Priced
        } else {
            ItemState::Stale
        }
    }

    // -------------------------------------------------------------------------
    // Field Mutation
    // -------------------------------------------------------------------------
    // Each setter marks a previously priced item stale, so the UI knows the
    // displayed price no longer reflects the selection.

    /// Sets the material.
    pub fn set_material(&mut self, material: Material) {
        self.material = Some(material);
        self.mark_stale();
    }

    /// Sets the thickness in millimeters.
    pub fn set_thickness(&mut self, thickness_mm: f64) {
        self.thickness_mm = Some(thickness_mm);
        self.mark_stale();
    }

    /// Sets the color.
    pub fn set_color(&mut self, color: String) {
        self.color = Some(color);
        self.mark_stale();
    }

    /// Unsets the color (stale color/material pairing).
    pub fn clear_color(&mut self) {
        if self.color.take().is_some() {
            self.mark_stale();
        }
    }

    fn mark_stale(&mut self) {
        if self.price.is_some() {
            self.stale = true;
        }
    }

    /// Replaces the valid-color list after a material/thickness change and
    /// enforces the safety rule: a previously chosen color that the new
    /// pair does not offer is unset, never silently kept.
    ///
    /// Returns `true` if the chosen color was invalidated.
    pub fn refresh_colors(&mut self, colors: Vec<ColorOption>) -> bool {
        self.available_colors = colors;
        let invalidated = match &self.color {
            Some(chosen) => !self
                .available_colors
                .iter()
                .any(|opt| opt.color.eq_ignore_ascii_case(chosen)),
            None => false,
        };
        if invalidated {
            self.clear_color();
        }
        invalidated
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Issues a new pricing generation number for this item. Any response
    /// tagged with an older number must be discarded by the caller.
    pub fn next_pricing_generation(&mut self) -> u64 {
        self.pricing_generation += 1;
        self.pricing_generation
    }

    /// Applies a successful pricing response.
    pub fn apply_pricing(&mut self, price: f64, inventory: Option<InventoryStatus>) {
        self.price = Some(price);
        self.inventory = inventory;
        self.stale = false;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_item(id: ItemId) -> LineItem {
        LineItem::from_spec(id, JobSpec::sized(300.0, 200.0, 15.0))
    }

    #[test]
    fn test_auto_generated_name() {
        let item = sized_item(4);
        assert_eq!(item.name, "Item 4");

        let named = LineItem::from_spec(
            5,
            JobSpec {
                name: Some("Shop sign".to_string()),
                ..JobSpec::sized(100.0, 100.0, 5.0)
            },
        );
        assert_eq!(named.name, "Shop sign");
    }

    #[test]
    fn test_state_progression() {
        let mut item = sized_item(1);
        assert_eq!(item.state(), ItemState::AwaitingMaterial);

        item.set_material(Material::Acrylic);
        assert_eq!(item.state(), ItemState::AwaitingMaterial); // thickness missing

        item.set_thickness(3.0);
        assert_eq!(item.state(), ItemState::AwaitingColor);
        assert!(item.is_priceable());
        assert!(!item.is_fully_specified());

        item.set_color("Clear".to_string());
        // Fully specified but never successfully priced yet.
        assert_eq!(item.state(), ItemState::Stale);

        item.apply_pricing(4500.0, None);
        assert_eq!(item.state(), ItemState::Priced);
    }

    #[test]
    fn test_edit_after_pricing_marks_stale() {
        let mut item = sized_item(1);
        item.set_material(Material::Wood);
        item.set_thickness(6.0);
        item.set_color("Natural".to_string());
        item.apply_pricing(8000.0, None);
        assert_eq!(item.state(), ItemState::Priced);

        item.set_thickness(12.0);
        assert_eq!(item.state(), ItemState::Stale);
        // The old price stays visible until a recompute succeeds.
        assert_eq!(item.price, Some(8000.0));

        item.apply_pricing(9500.0, None);
        assert_eq!(item.state(), ItemState::Priced);
        assert!(!item.stale);
    }

    #[test]
    fn test_refresh_colors_keeps_valid_choice() {
        let mut item = sized_item(1);
        item.set_material(Material::Acrylic);
        item.set_thickness(3.0);
        item.set_color("Clear".to_string());

        let kept = item.refresh_colors(vec![
            ColorOption {
                color: "Clear".to_string(),
                stock: 40.0,
                in_stock: true,
            },
            ColorOption {
                color: "Red".to_string(),
                stock: 12.0,
                in_stock: true,
            },
        ]);
        assert!(!kept);
        assert_eq!(item.color.as_deref(), Some("Clear"));
    }

    #[test]
    fn test_refresh_colors_invalidates_stale_pairing() {
        let mut item = sized_item(1);
        item.set_material(Material::Acrylic);
        item.set_thickness(3.0);
        item.set_color("Clear".to_string());

        // Material changed to Wood; "Clear" is not a wood color.
        item.set_material(Material::Wood);
        let invalidated = item.refresh_colors(vec![ColorOption {
            color: "Natural".to_string(),
            stock: 25.0,
            in_stock: true,
        }]);
        assert!(invalidated);
        assert_eq!(item.color, None);
        assert_eq!(item.state(), ItemState::AwaitingColor);
    }

    #[test]
    fn test_pricing_generation_monotonic() {
        let mut item = sized_item(1);
        let g1 = item.next_pricing_generation();
        let g2 = item.next_pricing_generation();
        let g3 = item.next_pricing_generation();
        assert!(g1 < g2 && g2 < g3);
    }
}
