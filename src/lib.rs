// ABOUTME: Library root for the merenda ledger crate
// ABOUTME: Cafeteria inventory ledger, meal planning, reporting, and AI insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Merenda Ledger
//!
//! Inventory ledger and meal-planning engine for a school cafeteria. Stock is
//! a projection of an append-only event ledger: receiving events add stock,
//! consumption events (confirmed meal plans) draw it down, and reports
//! reconstruct any period's balance from the logs alone.
//!
//! Main entry points:
//! - [`ledger::LedgerStore`] over a [`storage::DocumentStore`] backend;
//! - [`planning::MealPlanner`] for per-capita quantity and nutrition planning;
//! - [`reporting`] for balance, expiration, and history views;
//! - [`llm::InsightsClient`] for optional AI stock insights.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod llm;
pub mod logging;
pub mod models;
pub mod planning;
pub mod reference;
pub mod reporting;
pub mod storage;
