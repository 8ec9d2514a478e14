// ABOUTME: Integration tests for the expiration report
// ABOUTME: Status bands, sorting, and the six-month lookback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project
#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use chrono::{Duration, Months, Utc};
use merenda_ledger::reporting::{expiration_report, ExpirationStatus};

use common::{days_ago, memory_ledger, receive_one};

#[test]
fn bands_follow_days_remaining() {
    let mut ledger = memory_ledger();
    let today = Utc::now().date_naive();
    receive_one(
        &mut ledger,
        "beef",
        10.0,
        days_ago(5),
        Some(today + Duration::days(10)),
    );
    receive_one(
        &mut ledger,
        "chicken",
        8.0,
        days_ago(5),
        Some(today - Duration::days(3)),
    );
    receive_one(
        &mut ledger,
        "rice",
        30.0,
        days_ago(5),
        Some(today + Duration::days(90)),
    );

    let rows = expiration_report(&mut ledger, today).unwrap();
    assert_eq!(rows.len(), 3);
    // Sorted soonest-expiring first
    assert_eq!(rows[0].item_name, "Chicken");
    assert_eq!(rows[0].status, ExpirationStatus::Expired);
    assert_eq!(rows[0].days_remaining, -3);
    assert_eq!(rows[1].item_name, "Beef");
    assert_eq!(rows[1].status, ExpirationStatus::Critical);
    assert_eq!(rows[2].item_name, "Rice");
    assert_eq!(rows[2].status, ExpirationStatus::Ok);
}

#[test]
fn lines_without_expiration_dates_are_skipped() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "salt", 10.0, days_ago(2), None);
    let rows = expiration_report(&mut ledger, Utc::now().date_naive()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn shipments_older_than_six_months_fall_out_of_the_report() {
    let mut ledger = memory_ledger();
    let today = Utc::now().date_naive();
    let old_date = Utc::now().checked_sub_months(Months::new(7)).unwrap();
    receive_one(
        &mut ledger,
        "powdered_milk",
        5.0,
        old_date,
        Some(today - Duration::days(30)),
    );
    receive_one(
        &mut ledger,
        "beef",
        5.0,
        days_ago(10),
        Some(today + Duration::days(5)),
    );

    let rows = expiration_report(&mut ledger, today).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_name, "Beef");
}
