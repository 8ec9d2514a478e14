// ABOUTME: Environment-variable configuration loader
// ABOUTME: All settings have defaults except the optional Gemini key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{AppError, AppResult};
use crate::llm::DEFAULT_TIMEOUT_SECS;

/// Application configuration sourced from the environment.
///
/// Variables:
/// - `MERENDA_DATA_DIR` — storage directory (default `./data`)
/// - `GEMINI_API_KEY` — optional; insights fall back without it
/// - `MERENDA_LLM_MODEL` — optional Gemini model override
/// - `MERENDA_LLM_TIMEOUT_SECS` — insight request timeout (default 20)
/// - `LOG_LEVEL` — tracing filter directive (default `info`)
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Directory holding the JSON document store
    pub data_dir: PathBuf,
    /// Gemini API key, if insights are enabled
    pub gemini_api_key: Option<String>,
    /// Gemini model override
    pub llm_model: Option<String>,
    /// Hard timeout for one insight request
    pub llm_timeout: Duration,
    /// Log filter directive
    pub log_level: String,
}

impl LedgerConfig {
    /// Load configuration from the environment.
    ///
    /// Call `dotenvy::dotenv().ok()` first if `.env` support is wanted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a numeric variable fails to parse.
    pub fn from_env() -> AppResult<Self> {
        let timeout_secs = match std::env::var("MERENDA_LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::config(format!("invalid MERENDA_LLM_TIMEOUT_SECS '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            data_dir: PathBuf::from(env_var_or("MERENDA_DATA_DIR", "./data")),
            gemini_api_key: env_var_optional("GEMINI_API_KEY"),
            llm_model: env_var_optional("MERENDA_LLM_MODEL"),
            llm_timeout: Duration::from_secs(timeout_secs),
            log_level: env_var_or("LOG_LEVEL", "info"),
        })
    }
}

/// Read an environment variable with a default
fn env_var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Read an optional environment variable; empty counts as unset
fn env_var_optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_apply_when_unset() {
        std::env::remove_var("MERENDA_DATA_DIR");
        std::env::remove_var("MERENDA_LLM_TIMEOUT_SECS");
        std::env::remove_var("GEMINI_API_KEY");
        let config = LedgerConfig::from_env().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.llm_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    #[serial]
    fn bad_timeout_is_a_config_error() {
        std::env::set_var("MERENDA_LLM_TIMEOUT_SECS", "soon");
        let err = LedgerConfig::from_env().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigError);
        std::env::remove_var("MERENDA_LLM_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn empty_api_key_counts_as_unset() {
        std::env::set_var("GEMINI_API_KEY", "  ");
        let config = LedgerConfig::from_env().unwrap();
        assert!(config.gemini_api_key.is_none());
        std::env::remove_var("GEMINI_API_KEY");
    }
}
