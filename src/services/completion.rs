//! External text-completion collaborator.
//!
//! The chat handler only depends on `complete(prompt, mode) → text`; the
//! language model behind it is opaque. Any upstream failure is mapped to an
//! error the caller turns into a canned supportive fallback, never a failed
//! user-facing request.

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionMode {
    Supportive,
    Reflection,
}

impl CompletionMode {
    fn system_prompt(self) -> &'static str {
        match self {
            CompletionMode::Supportive => {
                "You are a warm, supportive mental-wellness companion. Listen, validate, and \
                 gently encourage healthy coping strategies. Keep replies to 2-4 sentences. \
                 Never diagnose, never prescribe, and never present yourself as a therapist."
            }
            CompletionMode::Reflection => {
                "You help users reflect on their journal entries and mood patterns. Ask one \
                 thoughtful follow-up question. Keep replies to 2-3 sentences."
            }
        }
    }
}

/// Canned responses used when the completion service is unavailable or not
/// configured. Rotated by message length so repeated failures do not repeat
/// the same line.
const FALLBACK_RESPONSES: &[&str] = &[
    "Thank you for sharing that with me. It takes courage to put feelings into words. \
     What's one small thing that helped you get through today?",
    "That sounds like a lot to carry. Be gentle with yourself — progress isn't always \
     a straight line.",
    "I hear you. Sometimes just naming what we're feeling is a meaningful first step. \
     Would writing a few lines in your journal help untangle it?",
];

pub fn fallback_response(message: &str) -> &'static str {
    FALLBACK_RESPONSES[message.len() % FALLBACK_RESPONSES.len()]
}

pub async fn complete(
    config: &Config,
    prompt: &str,
    mode: CompletionMode,
) -> Result<String, anyhow::Error> {
    if config.completion_api_key.is_empty() {
        anyhow::bail!("completion API key not configured");
    }

    // 30-second timeout to prevent indefinite hangs
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let response = client
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", &config.completion_api_key)
        .header("anthropic-version", "2023-06-01")
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "model": config.completion_model,
            "max_tokens": 512,
            "system": mode.system_prompt(),
            "messages": [{
                "role": "user",
                "content": prompt
            }]
        }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("completion API error {}: {}", status, body);
    }

    let completion: serde_json::Value = response.json().await?;
    let text = completion["content"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();

    if text.is_empty() {
        anyhow::bail!("completion API returned an empty message");
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic_per_message() {
        let a = fallback_response("hello");
        let b = fallback_response("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn fallback_always_returns_something() {
        for msg in ["", "a", "a longer message about a difficult day"] {
            assert!(!fallback_response(msg).is_empty());
        }
    }
}
