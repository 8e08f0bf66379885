//! Result/feedback adapter.
//!
//! Flattens a [`HybridEvalResult`] into named scalar scores for the
//! telemetry boundary. Pure and total; delivery is the runtime's concern.

use crate::types::{FeedbackScore, HybridEvalResult};

/// Confidence below which a criterion's reason is surfaced.
const LOW_CONFIDENCE: f64 = 0.6;

/// Flatten a result into its fixed set of named scores: four overall
/// entries, one per heuristic check, and one per criterion present.
pub fn flatten(result: &HybridEvalResult) -> Vec<FeedbackScore> {
    let mut scores = vec![
        FeedbackScore {
            name: "evaluation.final_score".to_string(),
            value: result.final_score,
            reason: None,
        },
        FeedbackScore {
            name: "evaluation.heuristic_score".to_string(),
            value: result.heuristic_score,
            reason: None,
        },
        FeedbackScore {
            name: "evaluation.llm_score".to_string(),
            value: result.llm_score,
            reason: None,
        },
        FeedbackScore {
            name: "evaluation.passed".to_string(),
            value: if result.passed { 1.0 } else { 0.0 },
            reason: None,
        },
    ];

    for check in &result.heuristic_checks {
        scores.push(FeedbackScore {
            name: format!("heuristic.{}", check.name),
            value: check.score,
            reason: (!check.passed).then(|| check.message.clone()),
        });
    }

    if let Some(criteria) = &result.criteria {
        for criterion in criteria {
            scores.push(FeedbackScore {
                name: format!("geval.{}", criterion.criterion),
                value: criterion.normalized_score,
                reason: (criterion.confidence < LOW_CONFIDENCE).then(|| {
                    format!(
                        "low confidence ({:.2}): {}",
                        criterion.confidence, criterion.reasoning
                    )
                }),
            });
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CriterionResult, HeuristicCheck};

    fn check(name: &str, score: f64, passed: bool) -> HeuristicCheck {
        HeuristicCheck {
            name: name.to_string(),
            passed,
            score,
            is_critical: false,
            message: format!("{} failed", name),
        }
    }

    fn result_with(criteria: Option<Vec<CriterionResult>>) -> HybridEvalResult {
        HybridEvalResult {
            passed: true,
            final_score: 0.8,
            heuristic_score: 0.75,
            llm_score: if criteria.is_some() { 0.85 } else { 0.0 },
            heuristic_checks: vec![
                check("risk_keywords", 0.9, true),
                check("readability", 0.5, false),
                check("tone", 1.0, true),
                check("disclaimers", 1.0, true),
                check("length_structure", 0.7, true),
            ],
            criteria,
            issues: vec![],
            judge_skip_reason: None,
        }
    }

    #[test]
    fn heuristics_only_result_emits_nine_scores() {
        let scores = flatten(&result_with(None));
        assert_eq!(scores.len(), 4 + 5);
    }

    #[test]
    fn full_result_emits_thirteen_scores() {
        let criteria = vec![
            CriterionResult::new("appropriateness", 4, 0.9, "fits the reader"),
            CriterionResult::new("safety", 5, 0.95, "no risky advice"),
            CriterionResult::new("coherence", 4, 0.4, "somewhat scattered"),
            CriterionResult::new("actionability", 3, 0.8, "steps are vague"),
        ];
        let scores = flatten(&result_with(Some(criteria)));
        assert_eq!(scores.len(), 4 + 5 + 4);
    }

    #[test]
    fn overall_entries_carry_the_headline_numbers() {
        let scores = flatten(&result_with(None));

        let by_name = |name: &str| scores.iter().find(|s| s.name == name).unwrap();
        assert_eq!(by_name("evaluation.final_score").value, 0.8);
        assert_eq!(by_name("evaluation.heuristic_score").value, 0.75);
        assert_eq!(by_name("evaluation.llm_score").value, 0.0);
        assert_eq!(by_name("evaluation.passed").value, 1.0);
    }

    #[test]
    fn heuristic_reason_only_when_failed() {
        let scores = flatten(&result_with(None));

        let readability = scores
            .iter()
            .find(|s| s.name == "heuristic.readability")
            .unwrap();
        assert_eq!(readability.reason.as_deref(), Some("readability failed"));

        let tone = scores.iter().find(|s| s.name == "heuristic.tone").unwrap();
        assert!(tone.reason.is_none());
    }

    #[test]
    fn criterion_reason_only_when_confidence_is_low() {
        let criteria = vec![
            CriterionResult::new("safety", 5, 0.95, "clear"),
            CriterionResult::new("coherence", 4, 0.4, "somewhat scattered"),
        ];
        let scores = flatten(&result_with(Some(criteria)));

        let safety = scores.iter().find(|s| s.name == "geval.safety").unwrap();
        assert!(safety.reason.is_none());

        let coherence = scores.iter().find(|s| s.name == "geval.coherence").unwrap();
        let reason = coherence.reason.as_deref().unwrap();
        assert!(reason.contains("low confidence"));
        assert!(reason.contains("somewhat scattered"));
    }
}
