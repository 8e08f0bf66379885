//! Hybrid score combiner: the single place that decides the final number.
//!
//! Blends the heuristic aggregate with the judge aggregate using
//! confidence-scaled weighting. When the judge's average confidence is
//! below the policy floor, the llm weight is scaled down linearly and the
//! blend is renormalized — a low-confidence judge must not silently
//! dominate the heuristic signal. With no judge result the heuristic score
//! passes through exactly.

use crate::orchestrator::HeuristicReport;
use crate::policy::EvalPolicy;
use crate::types::{CriterionResult, HybridEvalResult};

/// Combine the heuristic report and optional judge criteria into the final
/// result. `judge_skip_reason` should be `Some` exactly when `criteria` is
/// `None`.
pub fn combine(
    report: HeuristicReport,
    criteria: Option<Vec<CriterionResult>>,
    judge_skip_reason: Option<String>,
    policy: &EvalPolicy,
) -> HybridEvalResult {
    let heuristic_score = report.aggregated_score;

    let (final_score, llm_score, criteria) = match criteria {
        Some(criteria) if !criteria.is_empty() => {
            let llm_score = criteria
                .iter()
                .map(|c| c.normalized_score * policy.criterion_weight(&c.criterion))
                .sum::<f64>()
                .clamp(0.0, 1.0);

            let avg_confidence =
                criteria.iter().map(|c| c.confidence).sum::<f64>() / criteria.len() as f64;

            let h_weight = policy.base_heuristic_weight;
            let mut l_weight = policy.base_llm_weight;
            if avg_confidence < policy.confidence_floor {
                l_weight *= avg_confidence / policy.confidence_floor;
            }

            // Confidence scaling can collapse both weights to zero (a
            // heuristic weight of 0 with a zero-confidence judge); fall back
            // to the heuristic score instead of dividing by zero.
            let denominator = h_weight + l_weight;
            let final_score = if denominator > 0.0 {
                (heuristic_score * h_weight + llm_score * l_weight) / denominator
            } else {
                heuristic_score
            };

            (final_score, llm_score, Some(criteria))
        }
        _ => (heuristic_score, 0.0, None),
    };

    HybridEvalResult {
        passed: final_score >= policy.pass_threshold,
        final_score,
        heuristic_score,
        llm_score,
        heuristic_checks: report.checks,
        criteria,
        issues: report.issues,
        judge_skip_reason,
    }
}
