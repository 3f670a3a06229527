//! # Domain Types
//!
//! Core domain types used throughout CutQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Material     │   │  CuttingType    │   │ InventoryStatus │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Acrylic        │   │  LaserCutting   │   │  in_stock       │       │
//! │  │  Wood / Metal   │   │  CncRouter      │   │  material_cost  │       │
//! │  │  Mdf / Acp      │   │                 │   │  area_sq_ft     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ColorOption    │   │  CustomerInfo   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  color, stock   │   │  name, email    │                             │
//! │  │  in_stock       │   │  phone, wa      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! Serde representations match the pricing backend's JSON exactly
//! (`"Laser Cutting"`, `"MDF"`, `in_stock`, ...), so these types are shared
//! between the domain model and the HTTP layer without translation.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Material
// =============================================================================

/// Sheet material a job is cut from.
///
/// The backend keys its pricing model and inventory on these exact strings,
/// so the serde representation is the business identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Material {
    Acrylic,
    Wood,
    Metal,
    #[serde(rename = "MDF")]
    Mdf,
    #[serde(rename = "ACP")]
    Acp,
}

impl Material {
    /// Returns the backend wire string for this material.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Material::Acrylic => "Acrylic",
            Material::Wood => "Wood",
            Material::Metal => "Metal",
            Material::Mdf => "MDF",
            Material::Acp => "ACP",
        }
    }

    /// All materials the shop stocks, in display order.
    pub const ALL: [Material; 5] = [
        Material::Acrylic,
        Material::Wood,
        Material::Metal,
        Material::Mdf,
        Material::Acp,
    ];
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Cutting Type
// =============================================================================

/// The machine a job runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CuttingType {
    /// CO2 laser cutter (acrylic, wood, MDF).
    #[serde(rename = "Laser Cutting")]
    LaserCutting,
    /// CNC router (thicker sheets, ACP, metal).
    #[serde(rename = "CNC Router")]
    CncRouter,
}

impl CuttingType {
    /// Returns the backend wire string for this cutting type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CuttingType::LaserCutting => "Laser Cutting",
            CuttingType::CncRouter => "CNC Router",
        }
    }
}

impl Default for CuttingType {
    fn default() -> Self {
        CuttingType::LaserCutting
    }
}

impl fmt::Display for CuttingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inventory Status
// =============================================================================

/// Server-reported stock availability and material cost breakdown for one
/// priced job.
///
/// `None` on a line item until a pricing request has succeeded; overwritten
/// wholesale by each subsequent successful pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryStatus {
    /// Whether the material/color/thickness combination is in stock.
    pub in_stock: bool,

    /// Material cost component of the quoted price.
    pub material_cost: f64,

    /// Sheet area consumed, in square feet.
    pub area_sq_ft: f64,

    /// Material price per square foot used for this quote.
    pub price_per_sq_ft: f64,

    /// Human-readable availability message, surfaced verbatim in the UI.
    pub message: String,
}

// =============================================================================
// Color Option
// =============================================================================

/// One entry of the valid-color list for a material/thickness pair, as
/// returned by the inventory color endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorOption {
    /// Color name as the inventory knows it.
    pub color: String,

    /// Remaining stock in square feet.
    pub stock: f64,

    /// Whether any stock remains.
    pub in_stock: bool,
}

// =============================================================================
// Customer Info
// =============================================================================

/// Customer contact details attached to a persisted quote.
///
/// All fields are optional on the wire; the backend stores empty strings for
/// anything the counter staff didn't collect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
