//! Disclaimer detector.
//!
//! Disclaimers are only required when risk content is present: text with no
//! risk-lexicon term auto-passes. Severity of missing disclaimers on risky
//! text is carried by the risk-keyword check, so this one is never critical.

use crate::lexicon::{self, DISCLAIMER_PHRASES};
use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, HeuristicCheck};

use super::{names, Detector};

const MISSING_SCORE: f64 = 0.2;
const BASE_SCORE: f64 = 0.5;
const PER_PHRASE: f64 = 0.15;

pub struct DisclaimerDetector;

impl Detector for DisclaimerDetector {
    fn name(&self) -> &'static str {
        names::DISCLAIMERS
    }

    fn evaluate(
        &self,
        text: &str,
        _ctx: &EvaluationContext,
        _policy: &EvalPolicy,
    ) -> HeuristicCheck {
        let lower = text.to_lowercase();

        if !lexicon::contains_risk_term(&lower) {
            return HeuristicCheck {
                name: self.name().to_string(),
                passed: true,
                score: 1.0,
                is_critical: false,
                message: "No risk content; disclaimer not required".to_string(),
            };
        }

        let count = lexicon::count_present(&lower, DISCLAIMER_PHRASES);
        let (score, passed, message) = if count == 0 {
            (
                MISSING_SCORE,
                false,
                "Risk content present without any disclaimer".to_string(),
            )
        } else {
            (
                (BASE_SCORE + PER_PHRASE * count as f64).min(1.0),
                true,
                format!("{} disclaimer phrase(s) accompany risk content", count),
            )
        };

        HeuristicCheck {
            name: self.name().to_string(),
            passed,
            score,
            is_critical: false,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> HeuristicCheck {
        DisclaimerDetector.evaluate(
            text,
            &EvaluationContext::default(),
            &EvalPolicy::default(),
        )
    }

    #[test]
    fn no_risk_content_auto_passes() {
        let check = run("Track your spending and build an emergency fund.");
        assert!(check.passed);
        assert_eq!(check.score, 1.0);
    }

    #[test]
    fn risky_text_without_disclaimer_fails_low() {
        let check = run("Crypto could be an interesting addition to your plan.");
        assert!(!check.passed);
        assert_eq!(check.score, MISSING_SCORE);
    }

    #[test]
    fn each_disclaimer_phrase_raises_the_score() {
        // "risk" and "consult" are two distinct disclaimer phrases: 0.5 + 2 * 0.15.
        let check = run(
            "Crypto carries substantial risk; consult a professional before committing money.",
        );
        assert!(check.passed);
        assert!((check.score - 0.8).abs() < 1e-9, "score {}", check.score);
    }

    #[test]
    fn score_caps_at_one() {
        let check = run(
            "Crypto is risky. This is not financial advice; do your own research, \
             consult a financial advisor, and remember investments may lose value at your own risk.",
        );
        assert!(check.passed);
        assert_eq!(check.score, 1.0);
    }

    #[test]
    fn never_critical() {
        let check = run("Leveraged trading with no warnings whatsoever.");
        assert!(!check.is_critical);
        assert!(!check.passed);
    }
}
