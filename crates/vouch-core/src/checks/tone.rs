//! Tone detector.
//!
//! Penalizes overly-optimistic promises and aggressive commands, and
//! expects at least one reassurance phrase when the reader is in deficit.

use crate::lexicon::{self, AGGRESSIVE_PHRASES, OPTIMISM_PHRASES, REASSURANCE_PHRASES};
use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, FinancialSituation, HeuristicCheck};

use super::{names, Detector};

const OPTIMISM_PENALTY: f64 = 0.3;
const AGGRESSION_PENALTY: f64 = 0.25;
const MISSING_REASSURANCE_PENALTY: f64 = 0.1;
const PASS_SCORE: f64 = 0.6;

pub struct ToneDetector;

impl Detector for ToneDetector {
    fn name(&self) -> &'static str {
        names::TONE
    }

    fn evaluate(
        &self,
        text: &str,
        ctx: &EvaluationContext,
        _policy: &EvalPolicy,
    ) -> HeuristicCheck {
        let lower = text.to_lowercase();

        let mut score = 1.0;
        let mut problems: Vec<&str> = Vec::new();

        if lexicon::contains_any(&lower, OPTIMISM_PHRASES) {
            score -= OPTIMISM_PENALTY;
            problems.push("overly optimistic promises");
        }

        if lexicon::contains_any(&lower, AGGRESSIVE_PHRASES) {
            score -= AGGRESSION_PENALTY;
            problems.push("aggressive commands");
        }

        if ctx.financial_situation == FinancialSituation::Deficit
            && !lexicon::contains_any(&lower, REASSURANCE_PHRASES)
        {
            score -= MISSING_REASSURANCE_PENALTY;
            problems.push("no reassurance for a reader in deficit");
        }

        let score = score.clamp(0.0, 1.0);
        let passed = score >= PASS_SCORE;

        let message = if problems.is_empty() {
            "Tone appropriate".to_string()
        } else {
            format!("Tone issues: {}", problems.join(", "))
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
