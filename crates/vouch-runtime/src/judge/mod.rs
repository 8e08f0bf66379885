//! Judge criterion evaluator.
//!
//! Builds the rubric prompt, makes the single LLM call under a timeout,
//! and aligns the parsed reply to the expected criteria. Never raises to
//! its caller: every failure mode becomes a [`SkipReason`] and the
//! evaluation degrades to heuristics-only.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use vouch_core::{CriterionResult, EvalPolicy, EvaluationContext, EXPECTED_CRITERIA};

use crate::providers::{CompletionConfig, LlmClient};

pub mod parser;
pub mod prompt;

pub use parser::{ParseFailure, RawCriterion};
pub use prompt::{build_user_prompt, JUDGE_SYSTEM_PROMPT};

/// Why the judge did not contribute to an evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("LLM client not configured")]
    NotConfigured,

    #[error("Judge disabled by caller")]
    Disabled,

    #[error("Heuristics critically failed")]
    CriticalHeuristicFailure,

    #[error("Judge call failed: {0}")]
    Transport(String),

    #[error("Judge call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Judge reply unusable: {0}")]
    Malformed(#[from] ParseFailure),
}

/// Evaluates the four rubric criteria with one LLM call.
pub struct JudgeEvaluator {
    client: Arc<dyn LlmClient>,
    completion: CompletionConfig,
}

impl JudgeEvaluator {
    pub fn new(client: Arc<dyn LlmClient>, completion: CompletionConfig) -> Self {
        Self { client, completion }
    }

    /// Score the response against the rubric. One attempt; the only retry
    /// anywhere is the in-process JSON sanitize retry inside the parser.
    pub async fn evaluate(
        &self,
        text: &str,
        ctx: &EvaluationContext,
        policy: &EvalPolicy,
    ) -> Result<Vec<CriterionResult>, SkipReason> {
        let user_prompt = build_user_prompt(text, ctx, policy);

        let call = self
            .client
            .chat_complete(JUDGE_SYSTEM_PROMPT, &user_prompt, &self.completion);

        let reply = match tokio::time::timeout(self.completion.timeout, call).await {
            Err(_) => return Err(SkipReason::Timeout(self.completion.timeout)),
            Ok(Err(e)) => return Err(SkipReason::Transport(e.to_string())),
            Ok(Ok(reply)) => reply,
        };

        let entries = parser::parse_reply(&reply)?;
        Ok(align_criteria(entries))
    }
}

/// Align parsed entries to the expected criteria, in rubric order.
///
/// A criterion the judge did not cover gets a neutral placeholder; one
/// missing criterion must not invalidate the other three. Matching is
/// case-insensitive on the criterion name.
pub fn align_criteria(entries: Vec<RawCriterion>) -> Vec<CriterionResult> {
    EXPECTED_CRITERIA
        .iter()
        .map(|name| {
            match entries
                .iter()
                .find(|e| e.criterion.eq_ignore_ascii_case(name))
            {
                Some(entry) => {
                    CriterionResult::new(*name, entry.score, entry.confidence, &entry.reasoning)
                }
                None => {
                    tracing::debug!(criterion = name, "judge omitted criterion, using placeholder");
                    CriterionResult::not_evaluated(*name)
                }
            }
        })
        .collect()
}
