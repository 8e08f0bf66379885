//! Risk-keyword detector.
//!
//! Scans case-folded text against the high-risk and safe lexicons. A risk
//! term preceded by a negation cue within the policy's negation window is
//! guidance *against* the risk and does not count as a risky
//! recommendation.

use crate::lexicon::{self, NEGATION_CUES, RISK_KEYWORDS, SAFE_KEYWORDS};
use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, FinancialSituation, HeuristicCheck};

use super::{names, Detector};

const BASE_RISK: f64 = 0.3;
const RISK_TERM_PENALTY: f64 = 0.3;
const SAFE_TERM_CREDIT: f64 = 0.1;
const DEFICIT_SURCHARGE: f64 = 0.2;
const FAIL_RISK: f64 = 0.5;
const CRITICAL_TERM_COUNT: usize = 2;

pub struct RiskKeywordDetector;

impl RiskKeywordDetector {
    /// Whether the occurrence at `pos` is covered by a negation cue in the
    /// preceding window.
    fn is_mitigated(text_lower: &str, pos: usize, window: usize) -> bool {
        let mut start = pos.saturating_sub(window);
        while !text_lower.is_char_boundary(start) {
            start += 1;
        }
        let preceding = &text_lower[start..pos];
        NEGATION_CUES.iter().any(|cue| preceding.contains(cue))
    }
}

impl Detector for RiskKeywordDetector {
    fn name(&self) -> &'static str {
        names::RISK_KEYWORDS
    }

    fn evaluate(
        &self,
        text: &str,
        ctx: &EvaluationContext,
        policy: &EvalPolicy,
    ) -> HeuristicCheck {
        let lower = text.to_lowercase();

        let mut unmitigated: Vec<&str> = Vec::new();
        let mut mitigated: Vec<&str> = Vec::new();

        for term in RISK_KEYWORDS {
            let occurrences = lexicon::find_occurrences(&lower, term);
            if occurrences.is_empty() {
                continue;
            }
            // A term is an actual recommendation if any occurrence lacks a
            // preceding negation cue.
            let recommended = occurrences
                .iter()
                .any(|&pos| !Self::is_mitigated(&lower, pos, policy.negation_window));
            if recommended {
                unmitigated.push(term);
            } else {
                mitigated.push(term);
            }
        }

        let safe_count = lexicon::count_present(&lower, SAFE_KEYWORDS);

        let mut risk = BASE_RISK + RISK_TERM_PENALTY * unmitigated.len() as f64
            - SAFE_TERM_CREDIT * safe_count as f64;
        if ctx.financial_situation == FinancialSituation::Deficit && !unmitigated.is_empty() {
            risk += DEFICIT_SURCHARGE;
        }
        let risk = risk.clamp(0.0, 1.0);

        let passed = risk < FAIL_RISK;
        let is_critical = unmitigated.len() >= CRITICAL_TERM_COUNT;

        let message = if unmitigated.is_empty() {
            if mitigated.is_empty() {
                format!("No high-risk recommendations (risk {:.2})", risk)
            } else {
                format!(
                    "Risk terms present only as warnings: {} (risk {:.2})",
                    mitigated.join(", "),
                    risk
                )
            }
        } else {
            format!(
                "{} unmitigated high-risk recommendation(s): {} (risk {:.2})",
                unmitigated.len(),
                unmitigated.join(", "),
                risk
            )
        };

        HeuristicCheck {
            name: self.name().to_string(),
            passed,
            score: 1.0 - risk,
            is_critical,
            message,
        }
    }
}
