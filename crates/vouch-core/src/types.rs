//! Shared types for hybrid response evaluation.
//!
//! Every score-carrying type is clamped to its declared range by the
//! component that computes it. Downstream consumers never re-clamp.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Who the advisory text is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAudience {
    Student,
    General,
}

impl TargetAudience {
    /// Short label for prompt summaries.
    pub fn label(&self) -> &'static str {
        match self {
            TargetAudience::Student => "student",
            TargetAudience::General => "general",
        }
    }
}

/// Coarse classification of the reader's monthly cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialSituation {
    Deficit,
    Tight,
    Balanced,
    Comfortable,
    Unknown,
}

impl FinancialSituation {
    /// Short label for prompt summaries.
    pub fn label(&self) -> &'static str {
        match self {
            FinancialSituation::Deficit => "spending exceeds income",
            FinancialSituation::Tight => "tight budget",
            FinancialSituation::Balanced => "balanced budget",
            FinancialSituation::Comfortable => "comfortable surplus",
            FinancialSituation::Unknown => "unknown",
        }
    }
}

/// Context the evaluation runs against.
///
/// Derived once per call from the caller's raw context map and immutable
/// for the call's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationContext {
    pub target_audience: TargetAudience,
    pub financial_situation: FinancialSituation,
    pub has_loan: bool,
}

impl EvaluationContext {
    /// Derive the evaluation context from a caller-supplied raw context map.
    ///
    /// Recognized keys: `monthly_income`, `monthly_expenses` (numbers),
    /// `has_loan`, `is_student` (booleans). Anything missing or malformed
    /// degrades to the neutral variant rather than failing the call.
    pub fn from_raw(raw: &JsonValue) -> Self {
        let income = raw.get("monthly_income").and_then(JsonValue::as_f64);
        let expenses = raw.get("monthly_expenses").and_then(JsonValue::as_f64);

        let financial_situation = match (income, expenses) {
            (Some(income), Some(expenses)) if income > 0.0 => {
                let surplus = income - expenses;
                if surplus < 0.0 {
                    FinancialSituation::Deficit
                } else if surplus < income * 0.10 {
                    FinancialSituation::Tight
                } else if surplus < income * 0.30 {
                    FinancialSituation::Balanced
                } else {
                    FinancialSituation::Comfortable
                }
            }
            _ => FinancialSituation::Unknown,
        };

        let target_audience = if raw
            .get("is_student")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false)
        {
            TargetAudience::Student
        } else {
            TargetAudience::General
        };

        let has_loan = raw
            .get("has_loan")
            .and_then(JsonValue::as_bool)
            .unwrap_or(false);

        Self {
            target_audience,
            financial_situation,
            has_loan,
        }
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self {
            target_audience: TargetAudience::General,
            financial_situation: FinancialSituation::Unknown,
            has_loan: false,
        }
    }
}

/// Outcome of a single heuristic detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicCheck {
    /// Stable detector name, used for weighting and feedback keys.
    pub name: String,
    pub passed: bool,
    /// Detector score in [0, 1], clamped by the detector itself.
    pub score: f64,
    /// Critical checks that fail short-circuit the judge call.
    pub is_critical: bool,
    /// Human-readable explanation, surfaced in `issues` when failed.
    pub message: String,
}

/// One scored rubric criterion from the LLM judge.
///
/// Only constructed via [`CriterionResult::new`], which clamps the raw
/// score and confidence and truncates the reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: String,
    /// Raw rubric score on the 1-5 scale.
    pub raw_score: u8,
    /// `(raw_score - 1) / 4`, in [0, 1].
    pub normalized_score: f64,
    /// Judge-reported confidence in [0, 1].
    pub confidence: f64,
    /// Judge reasoning, truncated to 300 characters.
    pub reasoning: String,
}

/// Maximum retained length of judge reasoning, in characters.
pub const MAX_REASONING_CHARS: usize = 300;

impl CriterionResult {
    /// Build a criterion result from untrusted judge output, clamping the
    /// score to [1, 5] and the confidence to [0, 1].
    pub fn new(criterion: impl Into<String>, raw_score: i64, confidence: f64, reasoning: &str) -> Self {
        let raw = raw_score.clamp(1, 5) as u8;
        let reasoning = if reasoning.chars().count() > MAX_REASONING_CHARS {
            reasoning.chars().take(MAX_REASONING_CHARS).collect()
        } else {
            reasoning.to_string()
        };

        Self {
            criterion: criterion.into(),
            raw_score: raw,
            normalized_score: f64::from(raw - 1) / 4.0,
            confidence: if confidence.is_finite() {
                confidence.clamp(0.0, 1.0)
            } else {
                0.0
            },
            reasoning,
        }
    }

    /// Neutral placeholder for a criterion the judge did not cover.
    pub fn not_evaluated(criterion: impl Into<String>) -> Self {
        Self::new(criterion, 3, 0.5, "Not evaluated")
    }
}

/// The single output of the evaluation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridEvalResult {
    /// `final_score >= pass_threshold`.
    pub passed: bool,
    pub final_score: f64,
    pub heuristic_score: f64,
    /// Weighted judge aggregate; exactly 0 when the judge was skipped.
    pub llm_score: f64,
    pub heuristic_checks: Vec<HeuristicCheck>,
    /// Present only when the judge call succeeded.
    pub criteria: Option<Vec<CriterionResult>>,
    /// Messages of all failed heuristic checks.
    pub issues: Vec<String>,
    /// Why the judge did not contribute, when it did not.
    pub judge_skip_reason: Option<String>,
}

/// A flattened scalar score bound for the telemetry collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackScore {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn derives_deficit_when_expenses_exceed_income() {
        let ctx = EvaluationContext::from_raw(&json!({
            "monthly_income": 1200.0,
            "monthly_expenses": 1500.0,
        }));
        assert_eq!(ctx.financial_situation, FinancialSituation::Deficit);
        assert_eq!(ctx.target_audience, TargetAudience::General);
        assert!(!ctx.has_loan);
    }

    #[test]
    fn derives_tight_balanced_comfortable_bands() {
        let tight = EvaluationContext::from_raw(&json!({
            "monthly_income": 1000.0, "monthly_expenses": 950.0,
        }));
        assert_eq!(tight.financial_situation, FinancialSituation::Tight);

        let balanced = EvaluationContext::from_raw(&json!({
            "monthly_income": 1000.0, "monthly_expenses": 800.0,
        }));
        assert_eq!(balanced.financial_situation, FinancialSituation::Balanced);

        let comfortable = EvaluationContext::from_raw(&json!({
            "monthly_income": 1000.0, "monthly_expenses": 500.0,
        }));
        assert_eq!(
            comfortable.financial_situation,
            FinancialSituation::Comfortable
        );
    }

    #[test]
    fn missing_or_garbage_context_is_unknown() {
        let empty = EvaluationContext::from_raw(&json!({}));
        assert_eq!(empty.financial_situation, FinancialSituation::Unknown);

        let garbage = EvaluationContext::from_raw(&json!({
            "monthly_income": "lots", "monthly_expenses": null,
        }));
        assert_eq!(garbage.financial_situation, FinancialSituation::Unknown);

        let non_map = EvaluationContext::from_raw(&json!("not a map"));
        assert_eq!(non_map.financial_situation, FinancialSituation::Unknown);
    }

    #[test]
    fn student_and_loan_flags() {
        let ctx = EvaluationContext::from_raw(&json!({
            "is_student": true, "has_loan": true,
        }));
        assert_eq!(ctx.target_audience, TargetAudience::Student);
        assert!(ctx.has_loan);
    }

    #[test]
    fn criterion_result_clamps_and_truncates() {
        let long = "x".repeat(500);
        let result = CriterionResult::new("safety", 9, 1.7, &long);
        assert_eq!(result.raw_score, 5);
        assert_eq!(result.normalized_score, 1.0);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.reasoning.chars().count(), MAX_REASONING_CHARS);

        let low = CriterionResult::new("safety", -2, -0.5, "bad");
        assert_eq!(low.raw_score, 1);
        assert_eq!(low.normalized_score, 0.0);
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn not_evaluated_placeholder_is_neutral() {
        let placeholder = CriterionResult::not_evaluated("coherence");
        assert_eq!(placeholder.raw_score, 3);
        assert_eq!(placeholder.normalized_score, 0.5);
        assert_eq!(placeholder.confidence, 0.5);
        assert_eq!(placeholder.reasoning, "Not evaluated");
    }

    #[test]
    fn non_finite_confidence_is_zeroed() {
        let result = CriterionResult::new("safety", 4, f64::NAN, "ok");
        assert_eq!(result.confidence, 0.0);
    }
}
