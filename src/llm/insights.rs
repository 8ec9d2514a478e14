// ABOUTME: Timeout-bounded insight client with a fixed fallback reply
// ABOUTME: Builds the stock-snapshot prompt and degrades gracefully on any failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Merenda Ledger Project

use std::fmt::Write as _;
use std::time::Duration;

use tracing::warn;

use crate::errors::AppResult;
use crate::llm::InsightProvider;
use crate::models::InventoryItem;

/// Reply used whenever the provider is unavailable, slow, or failing
pub const FALLBACK_REPLY: &str = "The insight assistant is unavailable right now. \
Check the low-stock flags and the expiration report for items needing attention, \
and try again later.";

/// Default hard timeout for one insight request
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// An insight reply, marked when it is the canned fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightReply {
    /// Reply text
    pub text: String,
    /// True when the provider failed and `text` is the fallback
    pub from_fallback: bool,
}

/// Asks an [`InsightProvider`] about the current stock, with a hard timeout
pub struct InsightsClient {
    provider: Box<dyn InsightProvider>,
    timeout: Duration,
}

impl InsightsClient {
    /// Create a client over the given provider
    #[must_use]
    pub fn new(provider: Box<dyn InsightProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Answer a free-text question about the inventory snapshot.
    ///
    /// Never fails: a provider error or timeout is logged and replaced by
    /// [`FALLBACK_REPLY`].
    pub async fn ask(&self, inventory: &[InventoryItem], question: &str) -> InsightReply {
        match self.try_ask(inventory, question).await {
            Ok(text) => InsightReply {
                text,
                from_fallback: false,
            },
            Err(err) => {
                warn!(provider = self.provider.name(), error = %err, "insight request failed");
                InsightReply {
                    text: FALLBACK_REPLY.to_owned(),
                    from_fallback: true,
                }
            }
        }
    }

    async fn try_ask(&self, inventory: &[InventoryItem], question: &str) -> AppResult<String> {
        let prompt = build_prompt(inventory, question);
        tokio::time::timeout(self.timeout, self.provider.generate(&prompt))
            .await
            .map_err(|_| {
                crate::errors::AppError::external_service(format!(
                    "insight request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
    }
}

/// Render the stock snapshot and question into one prompt
fn build_prompt(inventory: &[InventoryItem], question: &str) -> String {
    let mut prompt = String::from(
        "You are a school cafeteria nutritionist assistant. You help the kitchen \
plan meals and manage stock for a Brazilian public school. Answer concisely and \
practically, based only on the stock listed below.\n\nCurrent stock:\n",
    );
    for item in inventory {
        let _ = writeln!(
            prompt,
            "- {}: {:.2} {} (minimum {:.2}){}",
            item.name,
            item.quantity,
            item.unit.label(),
            item.min_stock,
            if item.is_low_stock() { " [LOW]" } else { "" }
        );
    }
    let _ = write!(prompt, "\nQuestion: {question}");
    prompt
}
