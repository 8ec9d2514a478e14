// ABOUTME: Reporting over the ledger: balance reconstruction, expiration, log filters
// ABOUTME: All reports are read-only computations over snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Reporting
//!
//! Read-only views over the ledger: period balance reconstruction from the
//! event logs ([`balance_report`]), expiration tracking over received batches
//! ([`expiration_report`]), and history filtering with a per-supplier summary.

mod balance;
mod expiration;
mod filters;

pub use balance::{balance_report, BalanceRow};
pub use expiration::{expiration_report, ExpirationRow, ExpirationStatus};
pub use filters::{
    filter_consumption, filter_receiving, supplier_summary, LogFilter, SupplierSummary,
};
