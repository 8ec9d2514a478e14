// ABOUTME: Integration tests for period balance reconstruction
// ABOUTME: Opening stock derived backwards from current stock and the logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project
#![allow(clippy::unwrap_used, clippy::panic)]

mod common;

use merenda_ledger::reporting::{balance_report, BalanceRow};

use common::{consume_one, days_ago, memory_ledger, receive_one};

fn rice_row(rows: &[BalanceRow]) -> &BalanceRow {
    rows.iter().find(|r| r.item_name == "Rice").unwrap()
}

#[test]
fn opening_is_reconstructed_for_a_window_after_the_inflow() {
    let mut ledger = memory_ledger();
    // +50 ten days ago, -10 six days ago; window covers only the consumption
    receive_one(&mut ledger, "rice", 50.0, days_ago(10), None);
    consume_one(&mut ledger, "rice", 10.0, days_ago(6));

    let rows = balance_report(&mut ledger, days_ago(9), days_ago(1)).unwrap();
    let row = rice_row(&rows);
    assert!((row.opening - 50.0).abs() < 1e-9);
    assert!(row.in_period.abs() < f64::EPSILON);
    assert!((row.out_period - 10.0).abs() < 1e-9);
    assert!((row.current - 40.0).abs() < 1e-9);
}

#[test]
fn conservation_holds_when_the_window_ends_now() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "beans", 30.0, days_ago(8), None);
    consume_one(&mut ledger, "beans", 4.0, days_ago(3));
    receive_one(&mut ledger, "beans", 6.0, days_ago(2), None);

    let rows = balance_report(&mut ledger, days_ago(30), days_ago(0)).unwrap();
    let row = rows.iter().find(|r| r.item_name == "Beans").unwrap();
    assert!((row.opening + row.in_period - row.out_period - row.current).abs() < 1e-9);
    assert!(row.opening.abs() < f64::EPSILON);
    assert!((row.in_period - 36.0).abs() < 1e-9);
    assert!((row.out_period - 4.0).abs() < 1e-9);
}

#[test]
fn events_after_the_window_still_inform_the_opening() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 20.0, days_ago(10), None);
    // Inside the sums-since-start but outside the window
    consume_one(&mut ledger, "rice", 5.0, days_ago(1));

    let rows = balance_report(&mut ledger, days_ago(9), days_ago(4)).unwrap();
    let row = rice_row(&rows);
    // current 15, nothing received since start, 5 consumed since start
    assert!((row.opening - 20.0).abs() < 1e-9);
    assert!(row.in_period.abs() < f64::EPSILON);
    assert!(row.out_period.abs() < f64::EPSILON);
}

#[test]
fn untouched_items_report_flat_lines() {
    let mut ledger = memory_ledger();
    receive_one(&mut ledger, "rice", 20.0, days_ago(5), None);

    let rows = balance_report(&mut ledger, days_ago(30), days_ago(0)).unwrap();
    let beans = rows.iter().find(|r| r.item_name == "Beans").unwrap();
    assert!(beans.opening.abs() < f64::EPSILON);
    assert!(beans.in_period.abs() < f64::EPSILON);
    assert!(beans.out_period.abs() < f64::EPSILON);
    assert!(beans.current.abs() < f64::EPSILON);
    // One row per inventory item, inventory order
    assert_eq!(rows.len(), ledger.inventory().unwrap().len());
}
