//! Readability detector.
//!
//! Approximates a Flesch-Kincaid grade level from sentence/word splits and
//! vowel-group syllable counting. Advisory text should land in the grade
//! 8-12 band; the score decays linearly outside it.

use crate::policy::EvalPolicy;
use crate::types::{EvaluationContext, HeuristicCheck};

use super::{names, Detector};

const BAND_LOW: f64 = 8.0;
const BAND_HIGH: f64 = 12.0;
const DECAY_BELOW: f64 = 0.1;
const DECAY_ABOVE: f64 = 0.15;
const FLOOR_BELOW: f64 = 0.5;
const FLOOR_ABOVE: f64 = 0.3;
const PASS_SCORE: f64 = 0.7;

pub struct ReadabilityDetector;

/// Count syllables by contiguous vowel runs, dropping one for a trailing
/// silent vowel on multi-syllable words. Always at least 1.
fn syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut count = 0;
    let mut in_group = false;
    for &c in &letters {
        if is_vowel(c) {
            if !in_group {
                count += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }

    if count > 1 && letters.last() == Some(&'e') {
        count -= 1;
    }

    count.max(1)
}

/// Map a grade level to a score: 1.0 inside the band, linear decay outside.
fn grade_to_score(grade: f64) -> f64 {
    if grade < BAND_LOW {
        (1.0 - DECAY_BELOW * (BAND_LOW - grade)).max(FLOOR_BELOW)
    } else if grade > BAND_HIGH {
        (1.0 - DECAY_ABOVE * (grade - BAND_HIGH)).max(FLOOR_ABOVE)
    } else {
        1.0
    }
}

impl Detector for ReadabilityDetector {
    fn name(&self) -> &'static str {
        names::READABILITY
    }

    fn evaluate(
        &self,
        text: &str,
        _ctx: &EvaluationContext,
        _policy: &EvalPolicy,
    ) -> HeuristicCheck {
        let words: Vec<&str> = text.split_whitespace().collect();

        if words.is_empty() {
            return HeuristicCheck {
                name: self.name().to_string(),
                passed: false,
                score: FLOOR_BELOW,
                is_critical: false,
                message: "Too little text to assess readability".to_string(),
            };
        }

        let sentence_count = text
            .split(['.', '!', '?'])
            .filter(|s| !s.trim().is_empty())
            .count()
            .max(1);

        let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

        let words_per_sentence = words.len() as f64 / sentence_count as f64;
        let syllables_per_word = syllable_count as f64 / words.len() as f64;
        let grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;

        let score = grade_to_score(grade);
        let passed = score >= PASS_SCORE;

        let message = if passed {
            format!("Reading level acceptable (grade {:.1})", grade)
        } else if grade < BAND_LOW {
            format!("Text may be oversimplified (grade {:.1})", grade)
        } else {
            format!("Text too complex for the target audience (grade {:.1})", grade)
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
