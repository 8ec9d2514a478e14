// ABOUTME: Expiration tracking over received batches
// ABOUTME: Six-month lookback; rows sorted soonest-expiring first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::ledger::LedgerStore;

/// How far back received batches are considered
const LOOKBACK_MONTHS: u32 = 6;

/// Days-remaining band of a tracked batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    /// Expiration date has passed
    Expired,
    /// Expires within 30 days
    Critical,
    /// More than 30 days remaining
    Ok,
}

impl ExpirationStatus {
    fn from_days(days_remaining: i64) -> Self {
        if days_remaining < 0 {
            Self::Expired
        } else if days_remaining <= 30 {
            Self::Critical
        } else {
            Self::Ok
        }
    }
}

/// One received batch with a tracked expiration date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationRow {
    /// Inventory item id
    pub item_id: String,
    /// Item display name at receiving time
    pub item_name: String,
    /// Quantity received in this batch
    pub quantity: f64,
    /// Supplier of the batch
    pub supplier: String,
    /// Date the batch was received
    pub received: NaiveDate,
    /// Batch expiration date
    pub expiration: NaiveDate,
    /// Whole days until expiration; negative once past
    pub days_remaining: i64,
    /// Days-remaining band
    pub status: ExpirationStatus,
}

/// Collect expiration-tracked batches received in the last six months,
/// sorted soonest-expiring first.
///
/// Lines without an expiration date are skipped. The report deliberately does
/// not net consumption against batches — there is no batch-level draw-down in
/// the ledger, so quantities are as-received.
///
/// # Errors
///
/// Returns a storage error if the receiving log cannot be read.
pub fn expiration_report(ledger: &mut LedgerStore, today: NaiveDate) -> AppResult<Vec<ExpirationRow>> {
    let cutoff = today
        .checked_sub_months(Months::new(LOOKBACK_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    let mut rows = Vec::new();
    for event in ledger.receiving_log()? {
        let received = event.date.date_naive();
        if received < cutoff {
            continue;
        }
        for line in &event.lines {
            let Some(expiration) = line.expiration_date else {
                continue;
            };
            let days_remaining = (expiration - today).num_days();
            rows.push(ExpirationRow {
                item_id: line.item_id.clone(),
                item_name: line.item_name.clone(),
                quantity: line.quantity_added,
                supplier: event.supplier.clone(),
                received,
                expiration,
                days_remaining,
                status: ExpirationStatus::from_days(days_remaining),
            });
        }
    }
    rows.sort_by_key(|r| r.days_remaining);
    Ok(rows)
}
