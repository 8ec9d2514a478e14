// ABOUTME: Whole-state export, validated import, and reset-to-seed
// ABOUTME: Import is all-or-nothing and tolerates older backup documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use serde_json::Value;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::ledger::LedgerStore;
use crate::models::{
    BackupDocument, BackupMeta, ConsumptionEvent, IngredientCode, InventoryItem, ReceivingEvent,
};
use crate::reference;

/// Version stamped into backup metadata
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

impl LedgerStore {
    /// Export the complete application state as one backup document
    ///
    /// # Errors
    ///
    /// Returns a storage error if any document cannot be read.
    pub fn export_all(&mut self) -> AppResult<BackupDocument> {
        Ok(BackupDocument {
            inventory: self.inventory()?,
            receiving: self.receiving_log()?,
            consumption: self.consumption_log()?,
            categories: self.categories()?,
            meta: BackupMeta {
                exported_at: chrono::Utc::now(),
                app_version: APP_VERSION.to_owned(),
            },
        })
    }

    /// Replace the complete application state from a backup document.
    ///
    /// Validation is all-or-nothing: `inventory` and `receiving` must be
    /// present arrays or nothing changes. `consumption` defaults to empty and
    /// `categories` to the standard set, so documents from older versions
    /// still import. Items exported before ingredient codes existed get a
    /// code derived from their display name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBackup` for a malformed document or a storage error.
    pub fn import_all(&mut self, document: Value) -> AppResult<()> {
        let Value::Object(mut fields) = document else {
            return Err(AppError::invalid_backup("backup must be a JSON object"));
        };

        let inventory = fields
            .remove("inventory")
            .ok_or_else(|| AppError::invalid_backup("missing 'inventory' array"))?;
        let inventory = parse_inventory(inventory)?;

        let receiving = fields
            .remove("receiving")
            .ok_or_else(|| AppError::invalid_backup("missing 'receiving' array"))?;
        let receiving: Vec<ReceivingEvent> = serde_json::from_value(receiving)
            .map_err(|e| AppError::invalid_backup(format!("bad receiving log: {e}")))?;

        let consumption: Vec<ConsumptionEvent> = match fields.remove("consumption") {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::invalid_backup(format!("bad consumption log: {e}")))?,
            None => Vec::new(),
        };

        let categories: Vec<String> = match fields.remove("categories") {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| AppError::invalid_backup(format!("bad category list: {e}")))?,
            None => reference::DEFAULT_CATEGORIES
                .iter()
                .map(|&c| c.to_owned())
                .collect(),
        };

        // All four documents parsed; only now touch the store
        self.persist_inventory(inventory)?;
        self.persist_receiving(receiving)?;
        self.persist_consumption(consumption)?;
        self.persist_categories(categories)?;
        info!("backup imported");
        Ok(())
    }

    /// Reset to factory state: seed items at quantity zero, empty logs,
    /// default categories.
    ///
    /// # Errors
    ///
    /// Returns a storage error if any document cannot be persisted.
    pub fn reset_to_seed(&mut self) -> AppResult<()> {
        self.persist_inventory(reference::seed_inventory())?;
        self.persist_receiving(Vec::new())?;
        self.persist_consumption(Vec::new())?;
        self.persist_categories(
            reference::DEFAULT_CATEGORIES
                .iter()
                .map(|&c| c.to_owned())
                .collect(),
        )?;
        info!("ledger reset to seed state");
        Ok(())
    }
}

/// Parse the inventory array, backfilling ingredient codes on legacy items
fn parse_inventory(value: Value) -> AppResult<Vec<InventoryItem>> {
    let Value::Array(rows) = value else {
        return Err(AppError::invalid_backup("'inventory' must be an array"));
    };
    let mut items = Vec::with_capacity(rows.len());
    for mut row in rows {
        if let Value::Object(ref mut fields) = row {
            let missing_code = !fields.contains_key("code")
                || matches!(fields.get("code"), Some(Value::Null));
            if missing_code {
                let name = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| AppError::invalid_backup("inventory item without a name"))?;
                let code = IngredientCode::from_display_name(name);
                fields.insert("code".to_owned(), Value::String(code.as_str().to_owned()));
            }
        }
        let item: InventoryItem = serde_json::from_value(row)
            .map_err(|e| AppError::invalid_backup(format!("bad inventory item: {e}")))?;
        items.push(item);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inventory_rows_without_codes_get_slugs() {
        let rows = json!([{
            "id": "legacy-1",
            "name": "Arroz Branco",
            "category": "Non-perishable",
            "quantity": 12.5,
            "unit": "kilogram",
            "min_stock": 20.0
        }]);
        let items = parse_inventory(rows).unwrap();
        assert_eq!(items[0].code.as_str(), "arroz_branco");
        assert_eq!(items[0].id, "legacy-1");
    }

    #[test]
    fn inventory_must_be_an_array() {
        let err = parse_inventory(json!({"not": "an array"})).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidBackup);
    }
}
