// ABOUTME: In-memory document store backend for tests and ephemeral sessions
// ABOUTME: Mutex-guarded map of whole JSON documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use serde_json::Value;

use super::{Document, DocumentStore};

/// In-memory backend; contents are lost when the store is dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<Document, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, document: Document) -> Result<Option<Value>> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| anyhow!("memory store poisoned"))?;
        Ok(documents.get(&document).cloned())
    }

    fn write(&self, document: Document, value: &Value) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| anyhow!("memory store poisoned"))?;
        documents.insert(document, value.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwritten_document_reads_as_none() {
        let store = MemoryStore::new();
        assert!(store.read(Document::Inventory).unwrap().is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        let doc = json!([{"id": "1"}]);
        store.write(Document::Categories, &doc).unwrap();
        assert_eq!(store.read(Document::Categories).unwrap(), Some(doc));
    }
}
