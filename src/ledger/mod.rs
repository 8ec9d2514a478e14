// ABOUTME: Ledger store: stock projection, event logs, and category registry
// ABOUTME: Single source of truth; all stock mutations flow through delta application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Ledger Store
//!
//! [`LedgerStore`] owns the current-stock projection, both append-only event
//! logs, and the category registry, layered over a [`DocumentStore`]. It is an
//! explicit object constructed once and passed by reference — there is no
//! module-level state. Caches are read-through and can be dropped with
//! [`LedgerStore::reload`] after an import or external change.
//!
//! Event logs are exposed most-recent-first (new events prepended); balance
//! reconstruction does not rely on that order, but history views do.
//!
//! Stock deltas come in two flavors:
//! - [`LedgerStore::apply_stock_deltas`] clamps at zero and logs every clamp
//!   at WARN — the tolerant path for receiving corrections;
//! - [`LedgerStore::apply_stock_deltas_strict`] rejects a batch that would
//!   drive any quantity negative, writing nothing — used by consumption,
//!   where the planner has already proven sufficiency.

mod backup;

pub use backup::APP_VERSION;

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{
    ConsumptionEvent, InventoryItem, ItemPatch, NewItem, ReceivingEvent, ReceivingHeaderPatch,
};
use crate::reference;
use crate::storage::{Document, DocumentStore};

/// Small tolerance absorbing float drift in stock arithmetic
const STOCK_EPSILON: f64 = 1e-9;

/// A single signed stock mutation for one item
#[derive(Debug, Clone, PartialEq)]
pub struct StockDelta {
    /// Target item id
    pub item_id: String,
    /// Signed quantity change in the item's unit
    pub delta: f64,
}

impl StockDelta {
    /// Convenience constructor
    #[must_use]
    pub fn new(item_id: impl Into<String>, delta: f64) -> Self {
        Self {
            item_id: item_id.into(),
            delta,
        }
    }
}

/// The ledger store: stock, events, categories, over a durable document store
pub struct LedgerStore {
    store: Box<dyn DocumentStore>,
    inventory: Option<Vec<InventoryItem>>,
    receiving: Option<Vec<ReceivingEvent>>,
    consumption: Option<Vec<ConsumptionEvent>>,
    categories: Option<Vec<String>>,
}

impl LedgerStore {
    /// Create a ledger store over the given document store
    #[must_use]
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self {
            store,
            inventory: None,
            receiving: None,
            consumption: None,
            categories: None,
        }
    }

    /// Drop all caches; the next read goes back to the durable store
    pub fn reload(&mut self) {
        self.inventory = None;
        self.receiving = None;
        self.consumption = None;
        self.categories = None;
    }

    // ================================
    // Snapshots
    // ================================

    /// Current inventory snapshot, insertion order
    ///
    /// First read on an empty store seeds the fixed item list (quantity zero)
    /// and persists it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable store cannot be read.
    pub fn inventory(&mut self) -> AppResult<Vec<InventoryItem>> {
        self.ensure_inventory()?;
        Ok(self.inventory.clone().unwrap_or_default())
    }

    /// Receiving log snapshot, most-recent-first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable store cannot be read.
    pub fn receiving_log(&mut self) -> AppResult<Vec<ReceivingEvent>> {
        self.ensure_receiving()?;
        Ok(self.receiving.clone().unwrap_or_default())
    }

    /// Consumption log snapshot, most-recent-first
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable store cannot be read.
    pub fn consumption_log(&mut self) -> AppResult<Vec<ConsumptionEvent>> {
        self.ensure_consumption()?;
        Ok(self.consumption.clone().unwrap_or_default())
    }

    /// Category registry snapshot, alphabetical
    ///
    /// # Errors
    ///
    /// Returns a storage error if the durable store cannot be read.
    pub fn categories(&mut self) -> AppResult<Vec<String>> {
        self.ensure_categories()?;
        Ok(self.categories.clone().unwrap_or_default())
    }

    /// Look up one item by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no item has this id.
    pub fn item(&mut self, item_id: &str) -> AppResult<InventoryItem> {
        self.ensure_inventory()?;
        self.inventory
            .as_ref()
            .and_then(|items| items.iter().find(|i| i.id == item_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("inventory item {item_id}")))
    }

    // ================================
    // Stock deltas
    // ================================

    /// Apply a batch of deltas, clamping each result at zero.
    ///
    /// Duplicate ids within one call are collapsed deterministically: the last
    /// delta wins. Ids that match no item are ignored. Every clamp is logged.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the updated inventory cannot be persisted.
    pub fn apply_stock_deltas(&mut self, deltas: &[StockDelta]) -> AppResult<Vec<InventoryItem>> {
        self.ensure_inventory()?;
        let by_id = collapse_deltas(deltas);
        if by_id.is_empty() {
            return self.inventory();
        }

        let mut items = self.inventory.clone().unwrap_or_default();
        for item in &mut items {
            if let Some(delta) = by_id.get(item.id.as_str()) {
                let next = item.quantity + delta;
                if next < -STOCK_EPSILON {
                    warn!(
                        item = %item.name,
                        quantity = item.quantity,
                        delta,
                        "stock delta clamped at zero"
                    );
                }
                item.quantity = next.max(0.0);
            }
        }
        self.persist_inventory(items)?;
        self.inventory()
    }

    /// Apply a batch of deltas, rejecting the whole batch on underflow.
    ///
    /// Unlike the clamped path, an id that matches no item is an error here:
    /// callers of the strict path always reference known items.
    ///
    /// # Errors
    ///
    /// Returns `StockUnderflow` if any delta would drive a quantity negative,
    /// `ResourceNotFound` for an unknown id, or a storage error. Nothing is
    /// written on failure.
    pub fn apply_stock_deltas_strict(
        &mut self,
        deltas: &[StockDelta],
    ) -> AppResult<Vec<InventoryItem>> {
        self.ensure_inventory()?;
        let by_id = collapse_deltas(deltas);
        let mut items = self.inventory.clone().unwrap_or_default();

        for (item_id, delta) in &by_id {
            let item = items
                .iter_mut()
                .find(|i| i.id == *item_id)
                .ok_or_else(|| AppError::not_found(format!("inventory item {item_id}")))?;
            let next = item.quantity + delta;
            if next < -STOCK_EPSILON {
                return Err(AppError::stock_underflow(format!(
                    "applying {delta} to '{}' ({} in stock) would underflow",
                    item.name, item.quantity
                )));
            }
            item.quantity = next.max(0.0);
        }
        self.persist_inventory(items)?;
        self.inventory()
    }

    // ================================
    // Item definitions
    // ================================

    /// Create a new item with a fresh id; emits no ledger event
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, a negative threshold, or
    /// a negative initial quantity, and a storage error on persist failure.
    pub fn add_item(&mut self, definition: NewItem, initial_quantity: f64) -> AppResult<InventoryItem> {
        if definition.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if definition.min_stock < 0.0 {
            return Err(AppError::invalid_input("minimum stock must be >= 0"));
        }
        if initial_quantity < 0.0 {
            return Err(AppError::invalid_input("initial quantity must be >= 0"));
        }
        self.ensure_inventory()?;

        let item = InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            code: definition.code,
            name: definition.name,
            category: definition.category,
            quantity: initial_quantity,
            unit: definition.unit,
            min_stock: definition.min_stock,
            standard_measure: definition.standard_measure,
            measure_weight: definition.measure_weight,
        };

        let mut items = self.inventory.clone().unwrap_or_default();
        items.push(item.clone());
        self.persist_inventory(items)?;
        debug!(item = %item.name, id = %item.id, "item added");
        Ok(item)
    }

    /// Merge a partial definition update into an item; never touches id or quantity
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or a storage error.
    pub fn update_item_definition(
        &mut self,
        item_id: &str,
        patch: ItemPatch,
    ) -> AppResult<Vec<InventoryItem>> {
        self.ensure_inventory()?;
        let mut items = self.inventory.clone().unwrap_or_default();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("inventory item {item_id}")))?;

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(AppError::missing_field("name"));
            }
            item.name = name;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(unit) = patch.unit {
            item.unit = unit;
        }
        if let Some(min_stock) = patch.min_stock {
            if min_stock < 0.0 {
                return Err(AppError::invalid_input("minimum stock must be >= 0"));
            }
            item.min_stock = min_stock;
        }
        if let Some(standard_measure) = patch.standard_measure {
            item.standard_measure = standard_measure;
        }
        if let Some(measure_weight) = patch.measure_weight {
            item.measure_weight = measure_weight;
        }

        self.persist_inventory(items)?;
        self.inventory()
    }

    // ================================
    // Receiving events
    // ================================

    /// Record an inbound shipment: prepend to the log, then add stock.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty supplier/invoice, an empty line
    /// set, non-positive line quantities, or unknown item ids; a storage error
    /// rolls the log back.
    pub fn record_receiving(&mut self, event: ReceivingEvent) -> AppResult<()> {
        if event.supplier.trim().is_empty() {
            return Err(AppError::missing_field("supplier"));
        }
        if event.invoice_number.trim().is_empty() {
            return Err(AppError::missing_field("invoice_number"));
        }
        if event.lines.is_empty() {
            return Err(AppError::invalid_input(
                "a receiving event needs at least one line",
            ));
        }
        for line in &event.lines {
            if line.quantity_added <= 0.0 {
                return Err(AppError::invalid_input(format!(
                    "quantity for '{}' must be positive",
                    line.item_name
                )));
            }
        }
        self.ensure_inventory()?;
        for line in &event.lines {
            // Reject before writing anything
            self.item(&line.item_id)?;
        }
        self.ensure_receiving()?;

        let previous = self.receiving.clone().unwrap_or_default();
        let mut log = previous.clone();
        let deltas: Vec<StockDelta> = event
            .lines
            .iter()
            .map(|line| StockDelta::new(line.item_id.clone(), line.quantity_added))
            .collect();
        log.insert(0, event);
        self.persist_receiving(log)?;

        if let Err(err) = self.apply_stock_deltas(&deltas) {
            // Keep log and stock consistent: undo the prepend
            self.persist_receiving(previous)?;
            return Err(err);
        }
        Ok(())
    }

    /// Amend header fields of a receiving event; no stock side effects
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown event id or a storage error.
    pub fn amend_receiving_header(
        &mut self,
        event_id: &str,
        patch: ReceivingHeaderPatch,
    ) -> AppResult<()> {
        self.ensure_receiving()?;
        let mut log = self.receiving.clone().unwrap_or_default();
        let event = log
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::not_found(format!("receiving event {event_id}")))?;

        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(supplier) = patch.supplier {
            if supplier.trim().is_empty() {
                return Err(AppError::missing_field("supplier"));
            }
            event.supplier = supplier;
        }
        if let Some(invoice_number) = patch.invoice_number {
            event.invoice_number = invoice_number;
        }
        if let Some(qc_check) = patch.qc_check {
            event.qc_check = qc_check;
        }
        self.persist_receiving(log)
    }

    /// Amend one line of a receiving event, applying the quantity difference
    /// to current stock.
    ///
    /// This is the only retroactive-correction path in the system: the delta
    /// `new - old` is folded into the same event it corrects, so balance
    /// reconstruction stays exact. Log update and stock update are atomic —
    /// a stock persist failure rolls the log back.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown event or line index, a
    /// validation error for a negative quantity, or a storage error.
    pub fn amend_receiving_line(
        &mut self,
        event_id: &str,
        line_index: usize,
        new_quantity: f64,
        new_expiration: Option<NaiveDate>,
    ) -> AppResult<()> {
        if new_quantity < 0.0 {
            return Err(AppError::invalid_input("line quantity must be >= 0"));
        }
        self.ensure_receiving()?;
        let previous = self.receiving.clone().unwrap_or_default();
        let mut log = previous.clone();
        let event = log
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| AppError::not_found(format!("receiving event {event_id}")))?;
        let line = event.lines.get_mut(line_index).ok_or_else(|| {
            AppError::not_found(format!("line {line_index} of receiving event {event_id}"))
        })?;

        let delta = new_quantity - line.quantity_added;
        let item_id = line.item_id.clone();
        line.quantity_added = new_quantity;
        line.expiration_date = new_expiration;

        self.persist_receiving(log)?;
        if delta.abs() > STOCK_EPSILON {
            if let Err(err) = self.apply_stock_deltas(&[StockDelta::new(item_id, delta)]) {
                self.persist_receiving(previous)?;
                return Err(err);
            }
        }
        Ok(())
    }

    // ================================
    // Consumption events
    // ================================

    /// Record a served meal: prepend to the log, then draw down stock.
    ///
    /// Uses the strict delta path — the planning engine only confirms plans
    /// with sufficient stock, so an underflow here means the caller bypassed
    /// planning and the event is rejected whole.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty line set, negative quantities,
    /// or a zero headcount; `StockUnderflow` on insufficient stock; or a
    /// storage error (the log is rolled back).
    pub fn record_consumption(&mut self, event: ConsumptionEvent) -> AppResult<()> {
        if event.lines.is_empty() {
            return Err(AppError::invalid_input(
                "a consumption event needs at least one line",
            ));
        }
        if event.student_count == 0 {
            return Err(AppError::invalid_input("student count must be positive"));
        }
        // Zero is allowed: confirmed plans record every menu line, and an
        // ingredient without a per-capita rule draws nothing
        for line in &event.lines {
            if line.quantity_consumed < 0.0 {
                return Err(AppError::invalid_input(format!(
                    "consumed quantity for '{}' must not be negative",
                    line.item_name
                )));
            }
        }
        self.ensure_consumption()?;

        let previous = self.consumption.clone().unwrap_or_default();
        let mut log = previous.clone();
        let deltas: Vec<StockDelta> = event
            .lines
            .iter()
            .map(|line| StockDelta::new(line.item_id.clone(), -line.quantity_consumed))
            .collect();
        log.insert(0, event);
        self.persist_consumption(log)?;

        if let Err(err) = self.apply_stock_deltas_strict(&deltas) {
            self.persist_consumption(previous)?;
            return Err(err);
        }
        Ok(())
    }

    // ================================
    // Categories
    // ================================

    /// Add a category label; the registry stays alphabetical
    ///
    /// Adding an existing label is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty label or a storage error.
    pub fn add_category(&mut self, name: &str) -> AppResult<Vec<String>> {
        if name.trim().is_empty() {
            return Err(AppError::missing_field("category"));
        }
        self.ensure_categories()?;
        let mut categories = self.categories.clone().unwrap_or_default();
        if !categories.iter().any(|c| c == name) {
            categories.push(name.to_owned());
            categories.sort();
            self.persist_categories(categories)?;
        }
        self.categories()
    }

    /// Rename a category, propagating to every item holding the old label
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the old label is not registered, or a
    /// storage error.
    pub fn rename_category(&mut self, old_name: &str, new_name: &str) -> AppResult<Vec<String>> {
        if new_name.trim().is_empty() {
            return Err(AppError::missing_field("category"));
        }
        self.ensure_categories()?;
        let mut categories = self.categories.clone().unwrap_or_default();
        if !categories.iter().any(|c| c == old_name) {
            return Err(AppError::not_found(format!("category {old_name}")));
        }
        for category in &mut categories {
            if category == old_name {
                *category = new_name.to_owned();
            }
        }
        categories.sort();
        categories.dedup();
        self.persist_categories(categories)?;

        self.ensure_inventory()?;
        let mut items = self.inventory.clone().unwrap_or_default();
        let mut changed = false;
        for item in &mut items {
            if item.category == old_name {
                item.category = new_name.to_owned();
                changed = true;
            }
        }
        if changed {
            self.persist_inventory(items)?;
        }
        self.categories()
    }

    /// Remove a category label from future assignment.
    ///
    /// Items already holding the label keep their now-orphaned string.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the registry cannot be persisted.
    pub fn remove_category(&mut self, name: &str) -> AppResult<Vec<String>> {
        self.ensure_categories()?;
        let mut categories = self.categories.clone().unwrap_or_default();
        categories.retain(|c| c != name);
        self.persist_categories(categories)?;
        self.categories()
    }

    // ================================
    // Cache/persistence plumbing
    // ================================

    fn ensure_inventory(&mut self) -> AppResult<()> {
        if self.inventory.is_some() {
            return Ok(());
        }
        match self.store.read(Document::Inventory)? {
            Some(value) => {
                self.inventory = Some(serde_json::from_value(value)?);
            }
            None => {
                // First run: seed the fixed item list
                let seed = reference::seed_inventory();
                self.persist_inventory(seed)?;
            }
        }
        Ok(())
    }

    fn ensure_receiving(&mut self) -> AppResult<()> {
        if self.receiving.is_none() {
            self.receiving = Some(match self.store.read(Document::ReceivingLog)? {
                Some(value) => serde_json::from_value(value)?,
                None => Vec::new(),
            });
        }
        Ok(())
    }

    fn ensure_consumption(&mut self) -> AppResult<()> {
        if self.consumption.is_none() {
            self.consumption = Some(match self.store.read(Document::ConsumptionLog)? {
                Some(value) => serde_json::from_value(value)?,
                None => Vec::new(),
            });
        }
        Ok(())
    }

    fn ensure_categories(&mut self) -> AppResult<()> {
        if self.categories.is_some() {
            return Ok(());
        }
        match self.store.read(Document::Categories)? {
            Some(value) => {
                self.categories = Some(serde_json::from_value(value)?);
            }
            None => {
                let defaults: Vec<String> = reference::DEFAULT_CATEGORIES
                    .iter()
                    .map(|&c| c.to_owned())
                    .collect();
                self.persist_categories(defaults)?;
            }
        }
        Ok(())
    }

    fn persist_inventory(&mut self, items: Vec<InventoryItem>) -> AppResult<()> {
        let value = serde_json::to_value(&items)?;
        self.store.write(Document::Inventory, &value)?;
        self.inventory = Some(items);
        Ok(())
    }

    fn persist_receiving(&mut self, log: Vec<ReceivingEvent>) -> AppResult<()> {
        let value = serde_json::to_value(&log)?;
        self.store.write(Document::ReceivingLog, &value)?;
        self.receiving = Some(log);
        Ok(())
    }

    fn persist_consumption(&mut self, log: Vec<ConsumptionEvent>) -> AppResult<()> {
        let value = serde_json::to_value(&log)?;
        self.store.write(Document::ConsumptionLog, &value)?;
        self.consumption = Some(log);
        Ok(())
    }

    fn persist_categories(&mut self, categories: Vec<String>) -> AppResult<()> {
        let value = serde_json::to_value(&categories)?;
        self.store.write(Document::Categories, &value)?;
        self.categories = Some(categories);
        Ok(())
    }
}

/// Collapse duplicate ids deterministically: the last delta for an id wins
fn collapse_deltas(deltas: &[StockDelta]) -> HashMap<&str, f64> {
    let mut by_id = HashMap::new();
    for delta in deltas {
        by_id.insert(delta.item_id.as_str(), delta.delta);
    }
    by_id
}
