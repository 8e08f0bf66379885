//! Length and structure detector.
//!
//! Rewards responses in a readable size band with sentence punctuation and
//! visible structure (paragraph breaks, bold markup, numbered lists).

use crate::lexicon::NUMBERED_LIST;
use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, HeuristicCheck};

use super::{names, Detector};

const BASE_SCORE: f64 = 0.5;
const GOOD_LENGTH_BONUS: f64 = 0.2;
const PUNCTUATION_BONUS: f64 = 0.15;
const STRUCTURE_BONUS: f64 = 0.15;
const TOO_SHORT_PENALTY: f64 = 0.3;
const TOO_LONG_PENALTY: f64 = 0.1;
const GOOD_LENGTH: std::ops::RangeInclusive<usize> = 50..=1500;
const MIN_LENGTH: usize = 30;
const MAX_LENGTH: usize = 2000;
const PASS_SCORE: f64 = 0.6;

pub struct LengthStructureDetector;

impl Detector for LengthStructureDetector {
    fn name(&self) -> &'static str {
        names::LENGTH_STRUCTURE
    }

    fn evaluate(
        &self,
        text: &str,
        _ctx: &EvaluationContext,
        _policy: &EvalPolicy,
    ) -> HeuristicCheck {
        let len = text.chars().count();

        let mut score = BASE_SCORE;
        let mut notes: Vec<&str> = Vec::new();

        if GOOD_LENGTH.contains(&len) {
            score += GOOD_LENGTH_BONUS;
        }
        if text.contains(['.', '!', '?']) {
            score += PUNCTUATION_BONUS;
        } else {
            notes.push("no sentence punctuation");
        }
        if text.contains('\n') || text.contains("**") || NUMBERED_LIST.is_match(text) {
            score += STRUCTURE_BONUS;
        } else {
            notes.push("no visible structure");
        }
        if len < MIN_LENGTH {
            score -= TOO_SHORT_PENALTY;
            notes.push("too short");
        }
        if len > MAX_LENGTH {
            score -= TOO_LONG_PENALTY;
            notes.push("too long");
        }

        let score = score.clamp(0.0, 1.0);
        let passed = score >= PASS_SCORE;

        let message = if notes.is_empty() {
            format!("Well-formed response ({} chars)", len)
        } else {
            format!("Structure issues: {} ({} chars)", notes.join(", "), len)
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
        LengthStructureDetector.evaluate(
            text,
            &EvaluationContext::default(),
            &EvalPolicy::default(),
        )
    }

    #[test]
    fn structured_response_scores_full_marks() {
        let check = run("Here is a plan you can follow.\n1. Track spending.\n2. Save monthly.");
        // 0.5 + 0.2 + 0.15 + 0.15
        assert_eq!(check.score, 1.0);
        assert!(check.passed);
    }

    #[test]
    fn short_fragment_fails() {
        let check = run("save more");
        // 0.5 - 0.3, no bonuses
        assert!((check.score - 0.2).abs() < 1e-9);
        assert!(!check.passed);
        assert!(check.message.contains("too short"));
    }

    #[test]
    fn unstructured_wall_of_text_is_mediocre() {
        let text = "a".repeat(100);
        let check = run(&text);
        // 0.5 + 0.2 length bonus, no punctuation, no structure
        assert!((check.score - 0.7).abs() < 1e-9);
        assert!(check.passed);
    }

    #[test]
    fn overlong_text_is_penalized() {
        let text = format!("Intro.\n{}", "word ".repeat(450));
        assert!(text.chars().count() > MAX_LENGTH);
        let check = run(&text);
        // 0.5 + 0.15 + 0.15 - 0.1, outside the good-length band
        assert!((check.score - 0.7).abs() < 1e-9);
        assert!(check.passed);
    }

    #[test]
    fn empty_text_bottoms_out() {
        let check = run("");
        // 0.5 - 0.3, no bonuses
        assert!((check.score - 0.2).abs() < 1e-9);
        assert!(!check.passed);
    }

    #[test]
    fn never_critical() {
        assert!(!run("").is_critical);
    }
}
