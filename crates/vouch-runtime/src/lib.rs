//! Async runtime tier of the vouch evaluation engine.
//!
//! [`vouch_core`] holds the deterministic pieces: heuristic detectors, the
//! score combiner, the feedback flattener. This crate adds everything that
//! touches the outside world:
//!
//! - [`providers`]: the [`LlmClient`] abstraction and the Anthropic client
//!   (behind the `anthropic` feature).
//! - [`judge`]: rubric prompt, defensive reply parsing, and the single
//!   timed judge call.
//! - [`sink`]: fire-and-forget feedback dispatch.
//! - [`evaluator`]: the [`HybridEvaluator`] entry point tying the tiers
//!   together.
//!
//! The engine degrades rather than fails: a missing client, a timeout, or a
//! garbled judge reply all produce a heuristics-only result with the skip
//! reason recorded, never an error.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vouch_runtime::{EvalOptions, HybridEvaluator};
//!
//! # #[cfg(feature = "anthropic")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(vouch_runtime::providers::AnthropicClient::from_env()?);
//! let evaluator = HybridEvaluator::builder().client(client).build()?;
//!
//! let context = serde_json::json!({
//!     "monthly_income": 2200,
//!     "monthly_expenses": 2500,
//!     "is_student": true
//! });
//! let result = evaluator
//!     .evaluate("Track your spending and cut one subscription.", &context, &EvalOptions::default())
//!     .await;
//! println!("passed: {}, score: {:.2}", result.passed, result.final_score);
//! # Ok(())
//! # }
//! ```

pub mod evaluator;
pub mod judge;
pub mod providers;
pub mod sink;

pub use evaluator::{EvalOptions, HybridEvaluator, HybridEvaluatorBuilder};
pub use judge::{JudgeEvaluator, ParseFailure, SkipReason};
pub use providers::{ClientError, CompletionConfig, LlmClient};
pub use sink::{FeedbackSink, LogSink, SinkError};

pub use vouch_core::{
    EvalPolicy, EvaluationContext, FeedbackScore, HybridEvalResult, PolicyError,
};
