// ABOUTME: Durable document store abstraction for the ledger's four JSON tables
// ABOUTME: Whole-document read/write semantics with memory and file backends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Document Store
//!
//! The durable store holds four named documents — item definitions + stock,
//! receiving log, consumption log, category list — each a JSON-compatible
//! structure read and written whole. There are no partial-field updates at
//! this layer; the ledger store does read-modify-write internally.
//!
//! Backends implement [`DocumentStore`]. [`MemoryStore`] backs tests and
//! ephemeral sessions; [`FileStore`] persists one JSON file per document in a
//! data directory. Concurrent writers are not coordinated: the last writer to
//! persist wins, silently.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use anyhow::Result;
use serde_json::Value;

/// The four durable tables of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Item definitions and current stock
    Inventory,
    /// Receiving event log
    ReceivingLog,
    /// Consumption event log
    ConsumptionLog,
    /// Category registry
    Categories,
}

impl Document {
    /// All documents, in backup order
    pub const ALL: [Self; 4] = [
        Self::Inventory,
        Self::ReceivingLog,
        Self::ConsumptionLog,
        Self::Categories,
    ];

    /// Stable storage key for this document
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::ReceivingLog => "receiving_log",
            Self::ConsumptionLog => "consumption_log",
            Self::Categories => "categories",
        }
    }
}

/// Whole-document storage contract.
///
/// Implementations must be able to return `None` for a document that has
/// never been written, letting the ledger store lazily seed defaults.
pub trait DocumentStore: Send + Sync {
    /// Read a whole document, or `None` if it was never written
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying medium cannot be read or the stored
    /// bytes are not valid JSON.
    fn read(&self, document: Document) -> Result<Option<Value>>;

    /// Replace a whole document
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be persisted.
    fn write(&self, document: Document, value: &Value) -> Result<()>;
}
