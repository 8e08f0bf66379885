//! # vouch-core
//!
//! Deterministic half of the hybrid response evaluation engine.
//!
//! This crate scores machine-generated advisory text with a battery of
//! five pure heuristic detectors, aggregates them with policy weights, and
//! combines the aggregate with optional LLM-judge criteria into one final
//! confidence-adjusted score.
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same text, context, and policy always produce the
//!    same checks and scores
//! 2. **No IO**: everything in this crate is synchronous and in-memory;
//!    the judge call lives in `vouch-runtime`
//! 3. **Clamped at the source**: every score is in its declared range
//!    before it leaves the component that computed it
//! 4. **Total**: empty or garbage input yields a low score with
//!    explanatory issues, never an error
//!
//! ## Example
//!
//! ```rust
//! use vouch_core::{combine, run_heuristics, EvalPolicy, EvaluationContext};
//!
//! let policy = EvalPolicy::default();
//! let ctx = EvaluationContext::default();
//! let report = run_heuristics("Avoid crypto; build an emergency fund.", &ctx, &policy);
//! let result = combine(report, None, Some("judge disabled".into()), &policy);
//! assert_eq!(result.final_score, result.heuristic_score);
//! ```

pub mod checks;
pub mod combiner;
pub mod feedback;
pub mod lexicon;
pub mod orchestrator;
pub mod policy;
pub mod types;

// Re-export main types at crate root
pub use checks::{names, Detector};
pub use combiner::combine;
pub use feedback::flatten;
pub use orchestrator::{run_heuristics, HeuristicReport};
pub use policy::{EvalPolicy, PolicyError, EXPECTED_CRITERIA};
pub use types::{
    CriterionResult, EvaluationContext, FeedbackScore, FinancialSituation, HeuristicCheck,
    HybridEvalResult, TargetAudience, MAX_REASONING_CHARS,
};
