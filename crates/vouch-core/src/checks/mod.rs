//! Heuristic detector battery.
//!
//! Five independent, pure, synchronous text analyzers. Each produces one
//! [`HeuristicCheck`] per call; order between detectors is irrelevant.

use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, HeuristicCheck};

mod disclaimer;
mod length;
mod readability;
mod risk;
mod tone;

pub use disclaimer::DisclaimerDetector;
pub use length::LengthStructureDetector;
pub use readability::ReadabilityDetector;
pub use risk::RiskKeywordDetector;
pub use tone::ToneDetector;

/// Stable detector names, shared with the policy weight table and the
/// feedback adapter.
pub mod names {
    pub const RISK_KEYWORDS: &str = "risk_keywords";
    pub const READABILITY: &str = "readability";
    pub const TONE: &str = "tone";
    pub const DISCLAIMERS: &str = "disclaimers";
    pub const LENGTH_STRUCTURE: &str = "length_structure";
}

/// A fast, deterministic, non-LLM text analyzer.
pub trait Detector {
    /// Stable name used for weighting and feedback keys.
    fn name(&self) -> &'static str;

    /// Score the text. Must be pure: same text and context, same check.
    fn evaluate(
        &self,
        text: &str,
        ctx: &EvaluationContext,
        policy: &EvalPolicy,
    ) -> HeuristicCheck;
}

/// Run the full battery in its canonical order.
pub fn run_battery(
    text: &str,
    ctx: &EvaluationContext,
    policy: &EvalPolicy,
) -> Vec<HeuristicCheck> {
    let detectors: [&dyn Detector; 5] = [
        &RiskKeywordDetector,
        &ReadabilityDetector,
        &ToneDetector,
        &DisclaimerDetector,
        &LengthStructureDetector,
    ];

    detectors
        .iter()
        .map(|detector| detector.evaluate(text, ctx, policy))
        .collect()
}
