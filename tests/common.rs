// ABOUTME: Shared test utilities for the ledger integration tests
// ABOUTME: In-memory ledgers, stock helpers, and event builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::panic,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test setup for `merenda_ledger` integration tests

use chrono::{DateTime, Duration, NaiveDate, Utc};
use merenda_ledger::ledger::LedgerStore;
use merenda_ledger::models::{
    ConsumptionEvent, ConsumptionLine, QcCheck, ReceivingEvent, ReceivingLine, Segment,
};
use merenda_ledger::storage::MemoryStore;
use uuid::Uuid;

/// Fresh ledger over an in-memory store; first read seeds the item list
pub fn memory_ledger() -> LedgerStore {
    LedgerStore::new(Box::new(MemoryStore::new()))
}

/// Look up the id of a seed item by its ingredient code
pub fn item_id(ledger: &mut LedgerStore, code: &str) -> String {
    ledger
        .inventory()
        .unwrap()
        .iter()
        .find(|i| i.code.as_str() == code)
        .unwrap_or_else(|| panic!("no seed item with code '{code}'"))
        .id
        .clone()
}

/// Current stock of an item, by code
pub fn stock_of(ledger: &mut LedgerStore, code: &str) -> f64 {
    ledger
        .inventory()
        .unwrap()
        .iter()
        .find(|i| i.code.as_str() == code)
        .unwrap_or_else(|| panic!("no seed item with code '{code}'"))
        .quantity
}

/// A passing quality check
pub fn qc_ok() -> QcCheck {
    QcCheck {
        packaging_ok: true,
        temperature_ok: true,
        notes: None,
    }
}

/// Receive `quantity` of one item on the given date
pub fn receive_one(
    ledger: &mut LedgerStore,
    code: &str,
    quantity: f64,
    date: DateTime<Utc>,
    expiration: Option<NaiveDate>,
) -> ReceivingEvent {
    let id = item_id(ledger, code);
    let item = ledger.item(&id).unwrap();
    let event = ReceivingEvent::new(
        date,
        "Test Supplier",
        "NF-0001",
        vec![ReceivingLine {
            item_id: id,
            item_name: item.name,
            quantity_added: quantity,
            expiration_date: expiration,
        }],
        qc_ok(),
    );
    ledger.record_receiving(event.clone()).unwrap();
    event
}

/// Consume `quantity` of one item on the given date
pub fn consume_one(ledger: &mut LedgerStore, code: &str, quantity: f64, date: DateTime<Utc>) {
    let id = item_id(ledger, code);
    let item = ledger.item(&id).unwrap();
    ledger
        .record_consumption(ConsumptionEvent {
            id: Uuid::new_v4().to_string(),
            date,
            meal_type: "Lunch".to_owned(),
            menu_name: "Custom menu".to_owned(),
            segment: Segment::Fundamental,
            student_count: 100,
            lines: vec![ConsumptionLine {
                item_id: id,
                item_name: item.name,
                quantity_consumed: quantity,
            }],
        })
        .unwrap();
}

/// A UTC timestamp `days` days in the past
pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}
