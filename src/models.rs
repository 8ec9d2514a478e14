// ABOUTME: Core domain models for the cafeteria inventory ledger
// ABOUTME: Items, receiving/consumption events, segments, units, and backup documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Data Models
//!
//! Domain structures shared across the ledger store, the planning engine, and
//! reporting. Events are append-only: a [`ReceivingEvent`] may be amended in
//! place (header fields, or a line quantity via the delta-correction path);
//! a [`ConsumptionEvent`] is immutable once recorded.
//!
//! Item and event ids are opaque strings. New records receive UUID v4 ids;
//! legacy backups with other id schemes import unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable canonical key joining inventory items to the reference tables.
///
/// Display names are mutable; the code is not. Codes are lowercase
/// `snake_case` slugs (`"rice"`, `"corn_flour"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientCode(String);

impl IngredientCode {
    /// Wrap an already-canonical code
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Borrow the code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Migration shim: derive a code from a display name.
    ///
    /// Used when importing legacy backups whose items carry no code. Lowercases
    /// and replaces whitespace runs with underscores, so `"Corn Flour"`
    /// becomes `corn_flour`.
    #[must_use]
    pub fn from_display_name(name: &str) -> Self {
        let slug = name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        Self(slug)
    }
}

impl fmt::Display for IngredientCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unit of measure for a stock-keeping unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockUnit {
    /// Mass in kilograms
    Kilogram,
    /// Volume in liters
    Liter,
    /// Individual countable units
    Unit,
    /// Packs (e.g. 500 g pasta packs)
    Pack,
    /// Boxes
    Box,
}

impl StockUnit {
    /// Short label used for human-readable quantity display
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Liter => "L",
            Self::Unit => "un",
            Self::Pack => "pct",
            Self::Box => "cx",
        }
    }

    /// Whether quantities in this unit are drawn down per counted unit
    /// (requiring a gram-per-unit conversion) rather than per kilogram/liter
    #[must_use]
    pub const fn is_counted(&self) -> bool {
        matches!(self, Self::Unit | Self::Pack)
    }
}

impl fmt::Display for StockUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Student age/education band driving per-capita targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Early childhood education
    Infantil,
    /// Elementary education
    Fundamental,
    /// Youth and adult education (Educação de Jovens e Adultos)
    #[serde(rename = "EJA")]
    Eja,
}

impl Segment {
    /// All segments, in per-capita table order
    pub const ALL: [Self; 3] = [Self::Infantil, Self::Fundamental, Self::Eja];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infantil => f.write_str("Infantil"),
            Self::Fundamental => f.write_str("Fundamental"),
            Self::Eja => f.write_str("EJA"),
        }
    }
}

/// A tracked stock-keeping unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier (opaque; UUID v4 for new items)
    pub id: String,
    /// Stable canonical key into the reference tables
    pub code: IngredientCode,
    /// Display name, unique within active use and mutable
    pub name: String,
    /// Free-form category label drawn from the category registry
    pub category: String,
    /// Current quantity in the item's unit; clamped to >= 0 after every mutation
    pub quantity: f64,
    /// Unit of measure
    pub unit: StockUnit,
    /// Low-stock threshold: quantity <= threshold flags the item as low
    pub min_stock: f64,
    /// Optional household measure name for display (e.g. "Tablespoon(s)")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_measure: Option<String>,
    /// Gram equivalent of one standard measure / one counted unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_weight: Option<f64>,
}

impl InventoryItem {
    /// Whether current stock is at or below the minimum threshold
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }
}

/// Definition of a new item, before the store assigns an id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    /// Stable canonical key into the reference tables
    pub code: IngredientCode,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Unit of measure
    pub unit: StockUnit,
    /// Low-stock threshold
    pub min_stock: f64,
    /// Optional household measure name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_measure: Option<String>,
    /// Gram equivalent of one standard measure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_weight: Option<f64>,
}

/// Partial update to an item definition; `None` fields are left unchanged.
///
/// Id and quantity are never touched through this path — quantity moves only
/// through ledger-mediated deltas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    /// New display name
    pub name: Option<String>,
    /// New category label
    pub category: Option<String>,
    /// New unit of measure
    pub unit: Option<StockUnit>,
    /// New low-stock threshold
    pub min_stock: Option<f64>,
    /// New household measure name (`Some(None)` clears it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_measure: Option<Option<String>>,
    /// New gram equivalent (`Some(None)` clears it)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure_weight: Option<Option<f64>>,
}

/// Quality-check record attached to a receiving event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcCheck {
    /// Packaging arrived intact
    pub packaging_ok: bool,
    /// Cold chain / temperature acceptable
    pub temperature_ok: bool,
    /// Free-form inspection notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One line of an inbound shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingLine {
    /// Id of the inventory item this line adds to
    pub item_id: String,
    /// Item display name at the time of the event
    pub item_name: String,
    /// Quantity added, in the item's unit; strictly positive on creation
    pub quantity_added: f64,
    /// Expiration date of this batch, if tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

/// One inbound shipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingEvent {
    /// Unique identifier
    pub id: String,
    /// Event timestamp
    pub date: DateTime<Utc>,
    /// Supplier name
    pub supplier: String,
    /// Invoice / fiscal document number
    pub invoice_number: String,
    /// Ordered line items
    pub lines: Vec<ReceivingLine>,
    /// Quality check performed at receipt
    pub qc_check: QcCheck,
}

impl ReceivingEvent {
    /// Build a new event with a fresh id and the given timestamp
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        supplier: impl Into<String>,
        invoice_number: impl Into<String>,
        lines: Vec<ReceivingLine>,
        qc_check: QcCheck,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            supplier: supplier.into(),
            invoice_number: invoice_number.into(),
            lines,
            qc_check,
        }
    }
}

/// Partial update to a receiving event header; no stock side effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceivingHeaderPatch {
    /// New event timestamp
    pub date: Option<DateTime<Utc>>,
    /// New supplier name
    pub supplier: Option<String>,
    /// New invoice number
    pub invoice_number: Option<String>,
    /// Replacement quality-check record
    pub qc_check: Option<QcCheck>,
}

/// One line of a served meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionLine {
    /// Id of the inventory item drawn down
    pub item_id: String,
    /// Item display name at the time of the event
    pub item_name: String,
    /// Quantity consumed, in the item's unit
    pub quantity_consumed: f64,
}

/// One served-meal record; immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    /// Unique identifier
    pub id: String,
    /// Event timestamp
    pub date: DateTime<Utc>,
    /// Meal-type label (e.g. "Lunch")
    pub meal_type: String,
    /// Menu template name, or "Custom menu"
    pub menu_name: String,
    /// Student segment served
    pub segment: Segment,
    /// Number of students served
    pub student_count: u32,
    /// Ordered consumed lines
    pub lines: Vec<ConsumptionLine>,
}

/// Bulk export/import document: the whole observable ledger state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupDocument {
    /// All inventory items with current quantities
    pub inventory: Vec<InventoryItem>,
    /// Receiving log, most-recent-first
    pub receiving: Vec<ReceivingEvent>,
    /// Consumption log, most-recent-first
    pub consumption: Vec<ConsumptionEvent>,
    /// Category registry
    pub categories: Vec<String>,
    /// Export metadata
    pub meta: BackupMeta,
}

/// Metadata stamped on every export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMeta {
    /// Export timestamp
    pub exported_at: DateTime<Utc>,
    /// Application version that produced the export
    pub app_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingredient_code_slug_from_display_name() {
        assert_eq!(
            IngredientCode::from_display_name("Corn Flour").as_str(),
            "corn_flour"
        );
        assert_eq!(
            IngredientCode::from_display_name("  Rice  ").as_str(),
            "rice"
        );
    }

    #[test]
    fn segment_serde_uses_display_labels() {
        assert_eq!(serde_json::to_string(&Segment::Eja).unwrap(), "\"EJA\"");
        assert_eq!(
            serde_json::from_str::<Segment>("\"Fundamental\"").unwrap(),
            Segment::Fundamental
        );
    }

    #[test]
    fn counted_units_need_gram_conversion() {
        assert!(StockUnit::Unit.is_counted());
        assert!(StockUnit::Pack.is_counted());
        assert!(!StockUnit::Kilogram.is_counted());
        assert!(!StockUnit::Box.is_counted());
    }

    #[test]
    fn low_stock_is_inclusive_of_threshold() {
        let item = InventoryItem {
            id: "i1".into(),
            code: IngredientCode::new("rice"),
            name: "Rice".into(),
            category: "Dry goods".into(),
            quantity: 20.0,
            unit: StockUnit::Kilogram,
            min_stock: 20.0,
            standard_measure: None,
            measure_weight: None,
        };
        assert!(item.is_low_stock());
    }
}
