// ABOUTME: JSON-file document store backend, one file per durable table
// ABOUTME: Writes whole documents atomically via a temp file and rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;

use super::{Document, DocumentStore};

/// File-backed store: `<data_dir>/<document>.json` per table.
///
/// Each write replaces the whole file through a temp-file rename so a crash
/// mid-write never leaves a half-written document. No cross-process locking:
/// last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    /// Directory this store persists into
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, document: Document) -> PathBuf {
        self.data_dir.join(format!("{}.json", document.key()))
    }
}

impl DocumentStore for FileStore {
    fn read(&self, document: Document) -> Result<Option<Value>> {
        let path = self.path_for(document);
        if !path.exists() {
            return Ok(None);
        }
        let bytes =
            fs::read(&path).with_context(|| format!("reading document {}", path.display()))?;
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing document {}", path.display()))?;
        Ok(Some(value))
    }

    fn write(&self, document: Document, value: &Value) -> Result<()> {
        let path = self.path_for(document);
        let tmp_path = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value).context("serializing document")?;
        fs::write(&tmp_path, bytes)
            .with_context(|| format!("writing document {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("replacing document {}", path.display()))?;
        debug!(document = document.key(), "persisted document");
        Ok(())
    }
}
