//! Rubric prompt for the judge call.
//!
//! One system prompt establishing the judge's role and output contract,
//! plus a builder for the per-call user prompt: a compact context summary,
//! the response text (truncated to the policy cap to bound judge cost), and
//! the weighted rubric.

use std::fmt::Write;

use vouch_core::{EvalPolicy, EvaluationContext};

/// System prompt for the judge.
///
/// The framing keeps the judge on the rubric: it scores the four criteria
/// it is given and nothing else, and answers in JSON only.
pub const JUDGE_SYSTEM_PROMPT: &str = r#"
You are a strict evaluator of financial guidance written for ordinary readers.

You score a single response against a fixed rubric. You do not rewrite the
response, you do not add criteria, and you do not give advice yourself.

Respond with JSON only - no prose before or after. The JSON object must have
the form:
{
  "evaluations": [
    {
      "criterion": "name from the rubric",
      "reasoning": "one or two sentences, concrete and specific",
      "score": 1-5,
      "confidence": 0.0-1.0
    }
  ]
}

Include exactly one entry per rubric criterion. Score 1 is a serious failure,
3 is adequate, 5 is excellent. Confidence reflects how certain you are of
your own score, not the quality of the response.
"#;

/// One-line description per rubric criterion, in rubric order.
const CRITERION_DESCRIPTIONS: [(&str, &str); 4] = [
    (
        "appropriateness",
        "Does the advice fit this reader's situation and means?",
    ),
    (
        "safety",
        "Is the advice free of harmful, risky, or irresponsible recommendations?",
    ),
    (
        "coherence",
        "Is the response well-organized and easy to follow?",
    ),
    (
        "actionability",
        "Can the reader act on concrete steps today?",
    ),
];

/// Build the user prompt for one judge call.
pub fn build_user_prompt(text: &str, ctx: &EvaluationContext, policy: &EvalPolicy) -> String {
    let truncated: String = text.chars().take(policy.judge_text_cap).collect();

    let mut prompt = String::with_capacity(truncated.len() + 512);

    let _ = writeln!(prompt, "## Reader context");
    let _ = writeln!(prompt, "- audience: {}", ctx.target_audience.label());
    let _ = writeln!(
        prompt,
        "- financial situation: {}",
        ctx.financial_situation.label()
    );
    let _ = writeln!(
        prompt,
        "- has outstanding loan: {}",
        if ctx.has_loan { "yes" } else { "no" }
    );

    let _ = writeln!(prompt, "\n## Response to evaluate");
    let _ = writeln!(prompt, "{}", truncated);

    let _ = writeln!(prompt, "\n## Rubric");
    for (name, description) in CRITERION_DESCRIPTIONS {
        let _ = writeln!(
            prompt,
            "- {} (weight {:.2}): {}",
            name,
            policy.criterion_weight(name),
            description
        );
    }

    prompt
}
