// ABOUTME: Configuration module: environment-backed settings
// ABOUTME: Re-exports the environment loader
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Configuration
//!
//! Environment-variable configuration with `.env` support. See
//! [`environment::LedgerConfig`].

pub mod environment;

pub use environment::LedgerConfig;
