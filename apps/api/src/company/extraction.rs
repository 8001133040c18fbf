//! Company profile extraction from document text.
//!
//! Flow: validate input → fixed schema prompt → one completion call → parse.
//! Parsing is a two-stage strategy: strict JSON first, then the first
//! `{...}` substring of the reply for models that wrap the object in prose.

use crate::errors::AppError;
use crate::llm_client::prompts::profile_extraction_prompt;
use crate::llm_client::{CompletionApi, LlmError};
use crate::models::company::CompanyProfile;

/// Produces a [`CompanyProfile`] from extracted document text.
///
/// Empty input is rejected before any outbound call. The profile is returned
/// to the caller, who decides whether to store it.
pub async fn extract_company_profile(
    text: &str,
    api: &dyn CompletionApi,
) -> Result<CompanyProfile, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Document text is empty".to_string(),
        ));
    }

    let prompt = profile_extraction_prompt(text);
    let reply = api.complete(&prompt).await.map_err(|e| match e {
        LlmError::MissingApiKey => AppError::Configuration(e.to_string()),
        other => AppError::Upstream(other.to_string()),
    })?;

    parse_profile_reply(&reply)
        .ok_or_else(|| AppError::Upstream("failed to parse company information".to_string()))
}

/// Strict parse, then brace-extraction fallback. A missing or wrong-typed
/// required field fails either stage; the "Not specified" substitution is the
/// model's job per the prompt, never defaulted here.
fn parse_profile_reply(reply: &str) -> Option<CompanyProfile> {
    let trimmed = reply.trim();

    if let Ok(profile) = serde_json::from_str::<CompanyProfile>(trimmed) {
        return Some(profile);
    }

    let embedded = first_json_object(trimmed)?;
    serde_json::from_str::<CompanyProfile>(embedded).ok()
}

/// Returns the greedy first-`{`-to-last-`}` substring, spanning newlines.
fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock backend that records how many calls were made.
    struct RecordingApi {
        calls: AtomicUsize,
        reply: String,
    }

    impl RecordingApi {
        fn replying(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: reply.to_string(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionApi for RecordingApi {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    #[tokio::test]
    async fn test_empty_text_fails_before_any_call() {
        let api = RecordingApi::replying("{}");
        let result = extract_company_profile("   \n  ", &api).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clean_json_reply_parses_directly() {
        let api = RecordingApi::replying(
            r#"{"name":"Acme","url":"https://acme.example","scope":"Widgets"}"#,
        );
        let profile = extract_company_profile("Acme builds widgets.", &api)
            .await
            .unwrap();
        assert_eq!(profile.name, "Acme");
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_json_embedded_in_prose_parses_via_fallback() {
        let api = RecordingApi::replying(
            "Here is the data: {\"name\":\"Acme\",\"url\":\"a.com\",\"scope\":\"x\"}",
        );
        let profile = extract_company_profile("some text", &api).await.unwrap();
        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.url, "a.com");
        assert_eq!(profile.scope, "x");
    }

    #[tokio::test]
    async fn test_missing_field_is_an_upstream_failure() {
        let api = RecordingApi::replying(r#"{"name":"Acme","url":"a.com"}"#);
        let result = extract_company_profile("some text", &api).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_an_upstream_failure() {
        let api = RecordingApi::replying("I could not find any company information.");
        let result = extract_company_profile("some text", &api).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_maps_to_configuration_error() {
        struct NoKeyApi;

        #[async_trait]
        impl CompletionApi for NoKeyApi {
            async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
                Err(LlmError::MissingApiKey)
            }
        }

        let result = extract_company_profile("some text", &NoKeyApi).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_first_json_object_spans_newlines() {
        let text = "reply:\n{\n  \"name\": \"Acme\"\n}\ndone";
        assert_eq!(first_json_object(text), Some("{\n  \"name\": \"Acme\"\n}"));
    }

    #[test]
    fn test_first_json_object_is_greedy() {
        // Greedy match: first opening brace to last closing brace.
        let text = "{\"a\":{\"b\":1}} trailing";
        assert_eq!(first_json_object(text), Some("{\"a\":{\"b\":1}}"));
    }

    #[test]
    fn test_first_json_object_none_without_braces() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("} reversed {"), None);
    }
}
