// ABOUTME: Insight collaborator: provider trait and the bounded-timeout client
// ABOUTME: Failures never propagate past the client; callers get a fallback text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

//! # Insight Collaborator
//!
//! Optional AI assistance for stock questions ("what can I cook this week?",
//! "what should I reorder?"). The provider seam is [`InsightProvider`]; the
//! shipping implementation is Gemini ([`GeminiProvider`]). [`InsightsClient`]
//! wraps a provider with a hard timeout and converts every failure — missing
//! key, HTTP error, timeout — into a fixed fallback reply, so no caller ever
//! fails because of this module.

mod gemini;
mod insights;

pub use gemini::GeminiProvider;
pub use insights::{InsightReply, InsightsClient, DEFAULT_TIMEOUT_SECS, FALLBACK_REPLY};

use async_trait::async_trait;

use crate::errors::AppResult;

/// A text-in/text-out generation backend
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Generate a reply for the given prompt
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the backend is unreachable or
    /// returns an unusable response.
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
