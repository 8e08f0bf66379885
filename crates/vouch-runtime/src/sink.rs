//! Feedback dispatch.
//!
//! After an evaluation completes, its flattened scores can be handed to a
//! [`FeedbackSink`]. Dispatch is fire-and-forget from the evaluator's point
//! of view: a sink failure is logged and never surfaces into the result.

use async_trait::async_trait;
use thiserror::Error;
use vouch_core::FeedbackScore;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("feedback transport failed: {0}")]
    Transport(String),

    #[error("feedback payload rejected: {0}")]
    Rejected(String),
}

/// Destination for per-evaluation feedback scores.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Record the scores for one evaluation, keyed by its trace id.
    async fn record(&self, trace_id: &str, scores: Vec<FeedbackScore>) -> Result<(), SinkError>;
}

/// Sink that writes scores to the log stream. Useful as a default and in
/// development; production deployments supply their own sink.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl FeedbackSink for LogSink {
    async fn record(&self, trace_id: &str, scores: Vec<FeedbackScore>) -> Result<(), SinkError> {
        for score in &scores {
            match &score.reason {
                Some(reason) => tracing::info!(
                    trace_id,
                    name = %score.name,
                    value = score.value,
                    reason = %reason,
                    "feedback score"
                ),
                None => tracing::info!(
                    trace_id,
                    name = %score.name,
                    value = score.value,
                    "feedback score"
                ),
            }
        }
        Ok(())
    }
}
