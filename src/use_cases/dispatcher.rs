//! Splits a recipient list into provider-limited batches and aggregates delivery results.
use crate::entities::notification::Notification;
use crate::entities::user::Token;
use crate::use_cases::push::{Push, SendStatus};

use tracing::{debug, error, instrument};

/// Upper bound on recipients per push request, imposed by the delivery provider.
pub const MAX_BATCH: usize = 500;

pub struct BatchDispatcher {
    push: Push,
}

impl BatchDispatcher {
    pub fn new(push: Push) -> Self {
        Self { push }
    }

    /// Sends `tokens` in contiguous chunks of at most [`MAX_BATCH`], preserving input order.
    ///
    /// Chunks go out sequentially, each as an independent request. When a whole chunk request
    /// fails, every token in that chunk is marked failed, since per-recipient outcome cannot be
    /// distinguished in that case. When the request succeeds, only the recipients the provider
    /// rejected are marked failed.
    ///
    /// Dispatch failures are data, not errors; this never raises past its boundary.
    #[instrument(skip(self, tokens, notification))]
    pub fn dispatch(&self, tokens: &[Token], notification: &Notification) -> DispatchSummary {
        let mut summary = DispatchSummary::default();
        for chunk in tokens.chunks(MAX_BATCH) {
            match self.push.send_batch(chunk, notification) {
                Ok(response) => {
                    for (idx, token) in chunk.iter().enumerate() {
                        match response.statuses.get(idx) {
                            Some(SendStatus::Delivered) => summary.success_count += 1,
                            Some(SendStatus::Rejected(reason)) => {
                                error!("failed to send notification to '{}': '{}'", token, reason);
                                summary.failed.push(token.clone());
                            }
                            // provider returned fewer results than recipients
                            None => summary.failed.push(token.clone()),
                        }
                    }
                }
                Err(e) => {
                    error!("batch request failed: '{}'", e);
                    summary.failed.extend_from_slice(chunk);
                }
            }
        }
        debug!(
            "dispatched {} notifications, {} failed",
            summary.success_count,
            summary.failed.len()
        );
        summary
    }
}

/// Aggregated outcome of one fan-out across all chunks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub success_count: usize,
    pub failed: Vec<Token>,
}
