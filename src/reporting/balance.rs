// ABOUTME: Period balance reconstruction from the two event logs
// ABOUTME: Opening stock is derived backwards from current stock, O(events)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::AppResult;
use crate::ledger::LedgerStore;
use crate::models::StockUnit;

/// One item's reconstructed movement over a reporting period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Inventory item id
    pub item_id: String,
    /// Item display name
    pub item_name: String,
    /// Item unit of measure
    pub unit: StockUnit,
    /// Reconstructed stock at the start of the period
    pub opening: f64,
    /// Quantity received within the period
    pub in_period: f64,
    /// Quantity consumed within the period
    pub out_period: f64,
    /// Current stock (as of now, not period end)
    pub current: f64,
}

#[derive(Default)]
struct Movement {
    in_since_start: f64,
    out_since_start: f64,
    in_period: f64,
    out_period: f64,
}

/// Reconstruct per-item balances for the period `[start, end]`.
///
/// Opening stock is not stored anywhere; it is derived by running the
/// conservation equation backwards from current stock:
/// `opening = max(0, current - in_since_start + out_since_start)`, where the
/// "since start" sums cover every event from `start` to now (including events
/// after `end`). The floor mirrors the ledger's clamp; history that clamped
/// at zero cannot always be inverted exactly.
///
/// One pass over each log; rows come out in inventory order.
///
/// # Errors
///
/// Returns a storage error if any document cannot be read.
pub fn balance_report(
    ledger: &mut LedgerStore,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<BalanceRow>> {
    let inventory = ledger.inventory()?;
    let mut movements: HashMap<String, Movement> = HashMap::new();

    for event in ledger.receiving_log()? {
        if event.date < start {
            continue;
        }
        let in_period = event.date <= end;
        for line in &event.lines {
            let m = movements.entry(line.item_id.clone()).or_default();
            m.in_since_start += line.quantity_added;
            if in_period {
                m.in_period += line.quantity_added;
            }
        }
    }
    for event in ledger.consumption_log()? {
        if event.date < start {
            continue;
        }
        let in_period = event.date <= end;
        for line in &event.lines {
            let m = movements.entry(line.item_id.clone()).or_default();
            m.out_since_start += line.quantity_consumed;
            if in_period {
                m.out_period += line.quantity_consumed;
            }
        }
    }

    let empty = Movement::default();
    Ok(inventory
        .into_iter()
        .map(|item| {
            let m = movements.get(&item.id).unwrap_or(&empty);
            let opening = (item.quantity - m.in_since_start + m.out_since_start).max(0.0);
            BalanceRow {
                item_id: item.id,
                item_name: item.name,
                unit: item.unit,
                opening,
                in_period: m.in_period,
                out_period: m.out_period,
                current: item.quantity,
            }
        })
        .collect())
}
