//! Shared lexicons and structural patterns for the detector battery.
//!
//! These lists are shared between detectors (the disclaimer detector keys
//! off the same risk lexicon the risk detector scans), so they live in one
//! module rather than inside any single check.
//!
//! All matching is case-folded substring matching; several entries are
//! deliberately stems ("leverag", "gambl") so inflected forms match once.

use lazy_static::lazy_static;
use regex::Regex;

/// High-risk recommendation terms. A term appearing without a preceding
/// negation cue counts as an actual risky recommendation.
pub const RISK_KEYWORDS: &[&str] = &[
    "crypto",
    "bitcoin",
    "leverag",
    "day trading",
    "options trading",
    "margin",
    "penny stock",
    "meme stock",
    "gambl",
    "payday loan",
    "lottery",
    "forex",
    "short selling",
];

/// Safe or encouraged guidance terms; each one softens the risk score.
pub const SAFE_KEYWORDS: &[&str] = &[
    "emergency fund",
    "budget",
    "saving",
    "diversif",
    "index fund",
    "retirement",
    "pay off debt",
    "debt repayment",
];

/// Negation cues that turn a risk term into guidance against the risk
/// when found in the window immediately preceding the term.
pub const NEGATION_CUES: &[&str] = &[
    "avoid",
    "never",
    "don't",
    "do not",
    "stay away",
    "be careful",
    "beware",
    "steer clear",
    "not recommended",
    "instead of",
    "warn",
];

/// Overly-optimistic promises that have no place in financial guidance.
pub const OPTIMISM_PHRASES: &[&str] = &[
    "guaranteed",
    "risk-free",
    "get rich quick",
    "can't lose",
    "cannot lose",
    "sure thing",
    "no risk",
    "double your money",
    "easy money",
    "foolproof",
];

/// Aggressive command phrasing.
pub const AGGRESSIVE_PHRASES: &[&str] = &[
    "you must",
    "you have to",
    "act now",
    "do this immediately",
    "don't wait",
    "right now",
];

/// Reassuring phrasing expected when the reader is in deficit.
pub const REASSURANCE_PHRASES: &[&str] = &[
    "you're not alone",
    "it's okay",
    "step by step",
    "one step at a time",
    "at your own pace",
    "small steps",
    "no pressure",
    "don't worry",
    "manageable",
];

/// Disclaimer-style phrasing required when risk content is present.
pub const DISCLAIMER_PHRASES: &[&str] = &[
    "risk",
    "consult",
    "at your own risk",
    "not financial advice",
    "do your own research",
    "past performance",
    "may lose value",
    "professional advisor",
    "financial advisor",
];

lazy_static! {
    /// Numbered-list line: "1. item" or "2) item".
    pub static ref NUMBERED_LIST: Regex =
        Regex::new(r"(?m)^\s*\d+[.)]\s").expect("static regex");
}

/// Case-folded check for any of the given terms.
pub fn contains_any(text_lower: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text_lower.contains(term))
}

/// Count how many of the given terms appear at least once.
pub fn count_present(text_lower: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text_lower.contains(*term)).count()
}

/// Whether any risk-lexicon term appears in the (case-folded) text.
pub fn contains_risk_term(text_lower: &str) -> bool {
    contains_any(text_lower, RISK_KEYWORDS)
}

/// Byte offsets of every occurrence of `term` in `text_lower`.
pub fn find_occurrences(text_lower: &str, term: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut from = 0;
    while let Some(pos) = text_lower[from..].find(term) {
        offsets.push(from + pos);
        from += pos + term.len();
    }
    offsets
}
