//! AI summaries and questions over session logs.
//!
//! Everything here talks to the Gemini API with prompts tuned for
//! terminal transcripts. Two entry points: [`summarize`] produces the
//! structured writeup embedded in reports, [`answer`] handles ad-hoc
//! questions (or, without a question, error analysis with a suggested
//! fix). Both need `GEMINI_API_KEY` in the environment; callers decide
//! whether a missing key is fatal or just leaves a note in the report.

mod gemini;

pub use gemini::GeminiClient;

use thiserror::Error;

use crate::config::SummaryConfig;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Gemini API error: {0}")]
    Request(String),
    #[error("Gemini returned an empty response")]
    EmptyResponse,
    #[error("unexpected Gemini response: {0}")]
    InvalidResponse(String),
}

const GENERIC_SYSTEM_PROMPT: &str = "\
You are an expert CLI developer assistant named FixTrace.
Your goal is to help developers debug errors and understand their terminal sessions.
You are provided with the raw text output from a terminal session.

IMPORTANT:
- The logs may contain previous calls to `fixtrace ask` and your own previous responses.
- IGNORE these previous Q&A interactions.
- Focus ONLY on the actual shell commands and system outputs that occurred before the most recent `fixtrace` invocation.
- Do not analyze `fixtrace` commands themselves unless the user specifically asks about them.
";

const SUGGESTION_PROMPT: &str = "\
Analyze the provided terminal logs and:
1. Identify the most recent error or failed command.
2. Explain the error briefly (1-2 sentences).
3. Provide the EXACT shell command to fix it.

Format your response exactly as follows:
💡 Analysis:
<Explanation>

🚀 Suggestion:
<Command>

If no clear error is found, say: \"No error detected in the recent logs.\"
";

const QA_PROMPT: &str = "\
Answer the user's question based on the provided terminal logs.
Be concise and specific. Quote parts of the log if relevant.

Format your response as:
💬 Answer:
<Your answer>
";

const SUMMARY_PROMPT: &str = "\
You are a software engineer helping document a debugging session. The input is a raw terminal log recorded while setting up or debugging a project.
It may contain failed commands, repeated attempts, error messages, and unrelated shell output.

Your job is to:
- Identify the actual problem the developer was trying to solve
- Pick out the commands that mattered
- Summarize the errors that blocked progress
- Explain the steps that ultimately fixed the issue

Focus on high-signal information only.
Write the summary so that a future developer could understand what went wrong and how to fix it, without reading the full terminal log.

Review the debugging session and generate a short, structured summary that explains:
- What problem was being faced
- Which commands were important
- What errors occurred
- What steps resolved the issue

Rules:
- Ignore duplicated commands unless they show a before/after fix.
- Ignore shell noise, prompts, timestamps, and unrelated output.
- Do NOT include secrets, tokens, credentials, or environment values.
- If secrets appear, replace them with descriptive placeholders like:
  - API keys → [YOUR-API-KEY-HERE]
  - Tokens → [YOUR-TOKEN-HERE]
  - Passwords → [YOUR-PASSWORD-HERE]
  - Database URLs → [YOUR-DATABASE-URL-HERE]
  - Other secrets → [YOUR-SECRET-HERE]
- Be factual: only infer causes if strongly supported by the session.
- If the root cause is unclear, say \"Root cause not definitively identified\".
- Use clear, simple language suitable for onboarding documentation.

Output exactly in the following format:

🛠 FixTrace Summary

Problem:
- <1–2 bullet points>

Key Commands:
- <command>
- <command>

Errors Encountered:
- <short description of error>
- <short description of error>

Resolution Steps:
1. <step>
2. <step>

Root Cause:
- <single concise explanation>

Notes:
- <optional insights, gotchas, or onboarding tips>

Do not include any text outside this format.

---

Here is the terminal session log:
";

/// Generate the structured session summary used in reports.
pub fn summarize(session_log: &str, config: &SummaryConfig) -> Result<String, SummaryError> {
    let client = GeminiClient::from_config(config)?;
    client.generate(&summary_prompt(session_log))
}

/// Answer a question about the session, or without a question, analyze
/// the most recent error and suggest a fix.
pub fn answer(
    context: &str,
    question: Option<&str>,
    config: &SummaryConfig,
) -> Result<String, SummaryError> {
    let client = GeminiClient::from_config(config)?;
    client.generate(&query_prompt(context, question))
}

fn summary_prompt(session_log: &str) -> String {
    format!("{SUMMARY_PROMPT}\n{session_log}")
}

fn query_prompt(context: &str, question: Option<&str>) -> String {
    let instruction = match question {
        Some(question) => format!("{QA_PROMPT}\n\nUSER QUESTION:\n{question}"),
        None => SUGGESTION_PROMPT.to_string(),
    };
    format!("{GENERIC_SYSTEM_PROMPT}\n\nTERMINAL LOGS:\n{context}\n\nINSTRUCTIONS:\n{instruction}")
}
