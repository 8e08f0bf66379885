//! Hybrid evaluation entry point.
//!
//! Wires the deterministic heuristic battery to the optional judge call and
//! the feedback sink. `evaluate` is total: whatever happens to the judge or
//! the sink, the caller always gets a result built from at least the
//! heuristic tier.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use vouch_core::{
    combine, flatten, run_heuristics, EvalPolicy, EvaluationContext, HybridEvalResult,
    PolicyError,
};

use crate::judge::{JudgeEvaluator, SkipReason};
use crate::providers::{CompletionConfig, LlmClient};
use crate::sink::FeedbackSink;

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Skip the judge even when a client is configured.
    pub skip_judge: bool,
    /// Identifier the feedback sink records scores under. Without one,
    /// feedback dispatch is skipped.
    pub trace_id: Option<String>,
}

/// Resolved judge disposition for one call. Made explicit so the precedence
/// of skip conditions is a data decision, not scattered control flow.
enum JudgePath {
    Skip(SkipReason),
    Run(Arc<dyn LlmClient>),
}

/// Two-tier evaluator: heuristic battery plus optional LLM judge.
pub struct HybridEvaluator {
    policy: EvalPolicy,
    client: Option<Arc<dyn LlmClient>>,
    completion: CompletionConfig,
    sink: Option<Arc<dyn FeedbackSink>>,
}

impl HybridEvaluator {
    pub fn builder() -> HybridEvaluatorBuilder {
        HybridEvaluatorBuilder::default()
    }

    /// Evaluate one response against its reader context.
    ///
    /// `raw_context` is the caller's loosely-typed request payload; the
    /// fields the engine understands are extracted, everything else is
    /// ignored.
    pub async fn evaluate(
        &self,
        response_text: &str,
        raw_context: &JsonValue,
        options: &EvalOptions,
    ) -> HybridEvalResult {
        let ctx = EvaluationContext::from_raw(raw_context);
        let report = run_heuristics(response_text, &ctx, &self.policy);

        let path = if options.skip_judge {
            JudgePath::Skip(SkipReason::Disabled)
        } else if report.critical_failed {
            JudgePath::Skip(SkipReason::CriticalHeuristicFailure)
        } else {
            match &self.client {
                Some(client) => JudgePath::Run(Arc::clone(client)),
                None => JudgePath::Skip(SkipReason::NotConfigured),
            }
        };

        let (criteria, skip_reason) = match path {
            JudgePath::Skip(reason) => {
                tracing::info!(reason = %reason, "judge skipped");
                (None, Some(reason.to_string()))
            }
            JudgePath::Run(client) => {
                let judge = JudgeEvaluator::new(client, self.completion.clone());
                match judge.evaluate(response_text, &ctx, &self.policy).await {
                    Ok(criteria) => (Some(criteria), None),
                    Err(reason) => {
                        tracing::warn!(reason = %reason, "judge unavailable, heuristics-only");
                        (None, Some(reason.to_string()))
                    }
                }
            }
        };

        let result = combine(report, criteria, skip_reason, &self.policy);
        self.dispatch_feedback(&result, options);
        result
    }

    /// Hand the flattened scores to the sink without blocking the caller.
    fn dispatch_feedback(&self, result: &HybridEvalResult, options: &EvalOptions) {
        let (Some(sink), Some(trace_id)) = (&self.sink, &options.trace_id) else {
            return;
        };

        let sink = Arc::clone(sink);
        let trace_id = trace_id.clone();
        let scores = flatten(result);
        tokio::spawn(async move {
            if let Err(e) = sink.record(&trace_id, scores).await {
                tracing::warn!(trace_id, error = %e, "feedback dispatch failed");
            }
        });
    }
}

#[derive(Default)]
pub struct HybridEvaluatorBuilder {
    policy: Option<EvalPolicy>,
    client: Option<Arc<dyn LlmClient>>,
    completion: Option<CompletionConfig>,
    sink: Option<Arc<dyn FeedbackSink>>,
}

impl HybridEvaluatorBuilder {
    pub fn policy(mut self, policy: EvalPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn completion(mut self, completion: CompletionConfig) -> Self {
        self.completion = Some(completion);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn FeedbackSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate the policy and assemble the evaluator.
    pub fn build(self) -> Result<HybridEvaluator, PolicyError> {
        let policy = self.policy.unwrap_or_default();
        policy.validate()?;
        Ok(HybridEvaluator {
            policy,
            client: self.client,
            completion: self.completion.unwrap_or_default(),
            sink: self.sink,
        })
    }
}
