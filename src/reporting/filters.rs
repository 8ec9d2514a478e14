// ABOUTME: History filtering for the two event logs and a per-supplier rollup
// ABOUTME: Filters combine with AND; text matching is case-insensitive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{ConsumptionEvent, ReceivingEvent, Segment};

/// Filter criteria for history views; unset fields do not constrain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFilter {
    /// Earliest event date (inclusive)
    pub start: Option<NaiveDate>,
    /// Latest event date (inclusive)
    pub end: Option<NaiveDate>,
    /// Student segment (consumption events only)
    pub segment: Option<Segment>,
    /// Case-insensitive substring over names, suppliers, invoices, and menus
    pub text: Option<String>,
}

impl LogFilter {
    fn date_matches(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }

    fn text_matches(&self, haystacks: impl Iterator<Item = impl AsRef<str>>) -> bool {
        let Some(needle) = self.text.as_deref() else {
            return true;
        };
        let needle = needle.to_lowercase();
        let mut haystacks = haystacks;
        haystacks.any(|h| h.as_ref().to_lowercase().contains(&needle))
    }
}

/// Filter the receiving log; text matches supplier, invoice, or line name
#[must_use]
pub fn filter_receiving<'a>(
    log: &'a [ReceivingEvent],
    filter: &LogFilter,
) -> Vec<&'a ReceivingEvent> {
    log.iter()
        .filter(|event| {
            filter.date_matches(event.date.date_naive())
                && filter.text_matches(
                    std::iter::once(event.supplier.as_str())
                        .chain(std::iter::once(event.invoice_number.as_str()))
                        .chain(event.lines.iter().map(|l| l.item_name.as_str())),
                )
        })
        .collect()
}

/// Filter the consumption log; text matches menu, meal type, or line name
#[must_use]
pub fn filter_consumption<'a>(
    log: &'a [ConsumptionEvent],
    filter: &LogFilter,
) -> Vec<&'a ConsumptionEvent> {
    log.iter()
        .filter(|event| {
            filter.date_matches(event.date.date_naive())
                && filter.segment.is_none_or(|s| event.segment == s)
                && filter.text_matches(
                    std::iter::once(event.menu_name.as_str())
                        .chain(std::iter::once(event.meal_type.as_str()))
                        .chain(event.lines.iter().map(|l| l.item_name.as_str())),
                )
        })
        .collect()
}

/// Per-supplier rollup of a (usually pre-filtered) slice of receiving events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSummary {
    /// Supplier name
    pub supplier: String,
    /// Number of receiving events
    pub event_count: usize,
    /// Total number of shipment lines
    pub line_count: usize,
}

/// Group receiving events by supplier, alphabetically
#[must_use]
pub fn supplier_summary(events: &[&ReceivingEvent]) -> Vec<SupplierSummary> {
    let mut by_supplier: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for event in events {
        let entry = by_supplier.entry(event.supplier.as_str()).or_default();
        entry.0 += 1;
        entry.1 += event.lines.len();
    }
    by_supplier
        .into_iter()
        .map(|(supplier, (event_count, line_count))| SupplierSummary {
            supplier: supplier.to_owned(),
            event_count,
            line_count,
        })
        .collect()
}
