//! Heuristic orchestrator: runs the detector battery and folds the checks
//! into one weighted aggregate plus a critical-failure flag.
//!
//! This stage never performs IO and is deterministic for identical input.

use crate::checks;
use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, HeuristicCheck};

/// Aggregated outcome of the heuristic battery.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicReport {
    /// Weighted mean of detector scores, in [0, 1].
    pub aggregated_score: f64,
    /// True when any critical detector failed; short-circuits the judge.
    pub critical_failed: bool,
    pub checks: Vec<HeuristicCheck>,
    /// Messages of all failed detectors.
    pub issues: Vec<String>,
}

/// Run all detectors and aggregate their scores with the policy weights.
pub fn run_heuristics(
    text: &str,
    ctx: &EvaluationContext,
    policy: &EvalPolicy,
) -> HeuristicReport {
    let checks = checks::run_battery(text, ctx, policy);
    aggregate(checks, policy)
}

/// Fold a set of checks into a report. Split out from [`run_heuristics`] so
/// callers with synthetic checks (tests, replayed batteries) share the exact
/// weighting rule.
pub fn aggregate(checks: Vec<HeuristicCheck>, policy: &EvalPolicy) -> HeuristicReport {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for check in &checks {
        let weight = policy.heuristic_weight(&check.name);
        weighted_sum += check.score * weight;
        weight_total += weight;
    }

    let aggregated_score = if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    };

    let critical_failed = checks.iter().any(|c| c.is_critical && !c.passed);
    if critical_failed {
        tracing::warn!(score = aggregated_score, "heuristic battery critically failed");
    }

    let issues = checks
        .iter()
        .filter(|c| !c.passed)
        .map(|c| c.message.clone())
        .collect();

    HeuristicReport {
        aggregated_score,
        critical_failed,
        checks,
        issues,
    }
}
