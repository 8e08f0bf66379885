//! End-to-end evaluator behavior with a stubbed judge client.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vouch_core::{flatten, FeedbackScore};
use vouch_runtime::sink::{FeedbackSink, SinkError};
use vouch_runtime::{
    ClientError, CompletionConfig, EvalOptions, HybridEvaluator, LlmClient,
};

const RUBRIC_REPLY: &str = r#"```json
{
    "evaluations": [
        {"criterion": "appropriateness", "reasoning": "fits a small budget", "score": 4, "confidence": 0.9},
        {"criterion": "safety", "reasoning": "no risky recommendations", "score": 5, "confidence": 0.95},
        {"criterion": "coherence", "reasoning": "clear structure", "score": 4, "confidence": 0.8},
        {"criterion": "actionability", "reasoning": "concrete first steps", "score": 4, "confidence": 0.85}
    ]
}
```"#;

const SAFE_ADVICE: &str = "Start by building an emergency fund that covers three months of \
expenses. Keep a simple monthly budget and review it once a month. This is not financial \
advice; consult a professional advisor before making changes.";

const RECKLESS_ADVICE: &str = "Invest in crypto with leveraged trading for guaranteed returns.";

/// Judge stub with a canned reply and a call counter.
struct StubClient {
    reply: String,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubClient {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(reply: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for StubClient {
    async fn chat_complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
        _config: &CompletionConfig,
    ) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Sink that forwards every recorded batch over a channel.
struct ChannelSink {
    tx: tokio::sync::mpsc::UnboundedSender<(String, Vec<FeedbackScore>)>,
}

#[async_trait]
impl FeedbackSink for ChannelSink {
    async fn record(&self, trace_id: &str, scores: Vec<FeedbackScore>) -> Result<(), SinkError> {
        self.tx
            .send((trace_id.to_string(), scores))
            .map_err(|e| SinkError::Transport(e.to_string()))
    }
}

/// Install a test-writer subscriber so judge skip/degrade logs show up
/// under `--nocapture`. Idempotent across tests.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn evaluator_with(client: Arc<StubClient>) -> HybridEvaluator {
    init_tracing();
    HybridEvaluator::builder()
        .client(client)
        .build()
        .expect("default policy is valid")
}

#[tokio::test]
async fn happy_path_blends_both_tiers() {
    let client = StubClient::replying(RUBRIC_REPLY);
    let evaluator = evaluator_with(Arc::clone(&client));

    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    assert_eq!(client.call_count(), 1);
    assert!(result.judge_skip_reason.is_none());

    let criteria = result.criteria.as_ref().expect("judge ran");
    assert_eq!(criteria.len(), 4);
    assert!(result.llm_score > 0.0);
    assert_ne!(result.final_score, result.heuristic_score);

    assert_eq!(flatten(&result).len(), 13);
}

#[tokio::test]
async fn no_client_degrades_to_heuristics_only() {
    init_tracing();
    let evaluator = HybridEvaluator::builder().build().unwrap();

    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    assert_eq!(result.llm_score, 0.0);
    assert_eq!(result.final_score, result.heuristic_score);
    assert!(result.criteria.is_none());
    assert_eq!(
        result.judge_skip_reason.as_deref(),
        Some("LLM client not configured")
    );
    assert_eq!(flatten(&result).len(), 9);
}

#[tokio::test]
async fn critical_heuristic_failure_never_calls_the_judge() {
    let client = StubClient::replying(RUBRIC_REPLY);
    let evaluator = evaluator_with(Arc::clone(&client));

    let result = evaluator
        .evaluate(
            RECKLESS_ADVICE,
            &serde_json::json!({}),
            &EvalOptions::default(),
        )
        .await;

    assert_eq!(client.call_count(), 0);
    assert_eq!(
        result.judge_skip_reason.as_deref(),
        Some("Heuristics critically failed")
    );
    assert!(!result.passed);
    assert!(result.criteria.is_none());
}

#[tokio::test]
async fn skip_judge_option_wins_even_with_a_client() {
    let client = StubClient::replying(RUBRIC_REPLY);
    let evaluator = evaluator_with(Arc::clone(&client));

    let options = EvalOptions {
        skip_judge: true,
        ..Default::default()
    };
    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &options)
        .await;

    assert_eq!(client.call_count(), 0);
    assert_eq!(
        result.judge_skip_reason.as_deref(),
        Some("Judge disabled by caller")
    );
    assert_eq!(result.final_score, result.heuristic_score);
}

#[tokio::test]
async fn malformed_judge_reply_degrades_instead_of_failing() {
    let client = StubClient::replying("I cannot evaluate this response.");
    let evaluator = evaluator_with(client);

    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    assert!(result.criteria.is_none());
    assert_eq!(result.final_score, result.heuristic_score);
    let reason = result.judge_skip_reason.expect("skip reason recorded");
    assert!(reason.contains("no JSON"), "unexpected reason: {reason}");
}

#[tokio::test]
async fn missing_criterion_is_filled_with_a_placeholder() {
    let partial = r#"{"evaluations": [
        {"criterion": "appropriateness", "reasoning": "ok", "score": 4, "confidence": 0.9},
        {"criterion": "coherence", "reasoning": "ok", "score": 4, "confidence": 0.8},
        {"criterion": "actionability", "reasoning": "ok", "score": 4, "confidence": 0.85}
    ]}"#;
    let evaluator = evaluator_with(StubClient::replying(partial));

    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    let criteria = result.criteria.expect("judge ran");
    assert_eq!(criteria.len(), 4);
    let safety = criteria.iter().find(|c| c.criterion == "safety").unwrap();
    assert_eq!(safety.raw_score, 3);
    assert_eq!(safety.confidence, 0.5);
    assert_eq!(safety.reasoning, "Not evaluated");
}

#[tokio::test]
async fn slow_judge_times_out_and_degrades() {
    init_tracing();
    let client = StubClient::slow(RUBRIC_REPLY, Duration::from_millis(200));
    let evaluator = HybridEvaluator::builder()
        .client(client)
        .completion(CompletionConfig {
            timeout: Duration::from_millis(50),
            ..Default::default()
        })
        .build()
        .unwrap();

    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    assert!(result.criteria.is_none());
    assert_eq!(result.final_score, result.heuristic_score);
    let reason = result.judge_skip_reason.expect("skip reason recorded");
    assert!(reason.contains("timed out"), "unexpected reason: {reason}");
}

#[tokio::test]
async fn identical_inputs_give_identical_results() {
    let evaluator = evaluator_with(StubClient::replying(RUBRIC_REPLY));
    let context = serde_json::json!({
        "monthly_income": 2200,
        "monthly_expenses": 2500,
        "is_student": true
    });

    let first = evaluator
        .evaluate(SAFE_ADVICE, &context, &EvalOptions::default())
        .await;
    let second = evaluator
        .evaluate(SAFE_ADVICE, &context, &EvalOptions::default())
        .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn feedback_reaches_the_sink_with_the_trace_id() {
    init_tracing();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let evaluator = HybridEvaluator::builder()
        .client(StubClient::replying(RUBRIC_REPLY))
        .sink(Arc::new(ChannelSink { tx }))
        .build()
        .unwrap();

    let options = EvalOptions {
        skip_judge: false,
        trace_id: Some("trace-42".to_string()),
    };
    let result = evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &options)
        .await;

    let (trace_id, scores) = rx.recv().await.expect("sink received a batch");
    assert_eq!(trace_id, "trace-42");
    assert_eq!(scores, flatten(&result));
}

#[tokio::test]
async fn no_trace_id_means_no_feedback_dispatch() {
    init_tracing();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let evaluator = HybridEvaluator::builder()
        .client(StubClient::replying(RUBRIC_REPLY))
        .sink(Arc::new(ChannelSink { tx }))
        .build()
        .unwrap();

    evaluator
        .evaluate(SAFE_ADVICE, &serde_json::json!({}), &EvalOptions::default())
        .await;

    assert!(rx.try_recv().is_err());
}
