// Network-backed translator speaking the Gemini generateContent protocol

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::core::config::TranslationConfig;
use crate::core::errors::{TranslationError, TranslationResult};
use crate::core::types::TranslatedText;
use crate::services::translation::failure_gate::FailureGate;
use crate::services::translation::Translator;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// JSON payload the model is asked to produce.
#[derive(Debug, Serialize, Deserialize)]
struct TranslationPayload {
    translated_text: String,
}

/// Production translator: one HTTP request per call, structured JSON
/// response, no retries. A failure gate makes the client fail fast while
/// the service is down instead of queueing doomed requests.
pub struct HttpTranslator {
    config: TranslationConfig,
    http_client: reqwest::Client,
    gate: FailureGate,
}

impl HttpTranslator {
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .pool_max_idle_per_host(4)
            .build()?;

        let gate = FailureGate::new(config.failure_threshold, config.cooldown());

        Ok(Self {
            config,
            http_client,
            gate,
        })
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.config.model, api_key
        )
    }

    fn build_request_body(&self, text: &str) -> serde_json::Value {
        let prompt = format!(
            "Translate the following text into {}. \
             Preserve line breaks. \
             Return JSON with a single field 'translated_text' containing \
             only the translation.",
            self.config.target_language
        );

        serde_json::json!({
            "contents": [{
                "parts": [
                    {"text": prompt},
                    {"text": text}
                ]
            }],
            "generationConfig": {
                "response_mime_type": "application/json",
                "response_schema": {
                    "type": "object",
                    "properties": {
                        "translated_text": {"type": "string"}
                    },
                    "required": ["translated_text"]
                }
            }
        })
    }

    fn extract_translation(response: &serde_json::Value) -> TranslationResult<TranslatedText> {
        let payload_json = response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                TranslationError::InvalidResponse("missing candidate text".to_string())
            })?;

        let payload: TranslationPayload = serde_json::from_str(payload_json)
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        Ok(payload.translated_text)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str) -> TranslationResult<TranslatedText> {
        if text.is_empty() {
            return Err(TranslationError::EmptyText);
        }

        if !self.gate.allow_request() {
            warn!("translation service gate is open, failing fast");
            return Err(TranslationError::ServiceUnavailable);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(TranslationError::MissingApiKey)?;

        let url = self.endpoint(api_key);
        let body = self.build_request_body(text);

        let response = match self.http_client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                self.gate.record_failure();
                return Err(TranslationError::RequestFailed(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            self.gate.record_failure();
            return Err(TranslationError::InvalidResponse(format!(
                "HTTP {status}"
            )));
        }

        let value: serde_json::Value = match response.json().await {
            Ok(value) => value,
            Err(e) => {
                self.gate.record_failure();
                return Err(TranslationError::RequestFailed(e));
            }
        };

        match Self::extract_translation(&value) {
            Ok(translated) => {
                self.gate.record_success();
                debug!(chars = translated.len(), "translation received");
                Ok(translated)
            }
            Err(e) => {
                self.gate.record_failure();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(api_key: Option<&str>) -> TranslationConfig {
        TranslationConfig {
            api_key: api_key.map(|s| s.to_string()),
            model: "gemini-2.5-flash".to_string(),
            target_language: "en".to_string(),
            timeout_seconds: 5,
            connect_timeout_seconds: 2,
            failure_threshold: 2,
            cooldown_seconds: 60,
        }
    }

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let translator = HttpTranslator::new(config(Some("k123"))).unwrap();
        let url = translator.endpoint("k123");
        assert!(url.starts_with(API_BASE));
        assert!(url.contains("gemini-2.5-flash:generateContent"));
        assert!(url.ends_with("key=k123"));
    }

    #[test]
    fn test_request_body_carries_prompt_and_source_text() {
        let translator = HttpTranslator::new(config(Some("k"))).unwrap();
        let body = translator.build_request_body("BONJOUR");

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("into en"));
        assert_eq!(parts[1]["text"], "BONJOUR");
        assert_eq!(
            body["generationConfig"]["response_mime_type"],
            "application/json"
        );
    }

    #[test]
    fn test_extract_translation_from_candidate_json() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"translated_text\": \"HELLO\"}"}]
                }
            }]
        });
        assert_eq!(
            HttpTranslator::extract_translation(&response).unwrap(),
            "HELLO"
        );
    }

    #[test]
    fn test_extract_translation_rejects_malformed_response() {
        let missing = serde_json::json!({"candidates": []});
        assert!(matches!(
            HttpTranslator::extract_translation(&missing),
            Err(TranslationError::InvalidResponse(_))
        ));

        let not_json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "plain text"}]}}]
        });
        assert!(matches!(
            HttpTranslator::extract_translation(&not_json),
            Err(TranslationError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_dispatch() {
        let translator = HttpTranslator::new(config(Some("k"))).unwrap();
        assert!(matches!(
            translator.translate("").await,
            Err(TranslationError::EmptyText)
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected_before_dispatch() {
        let translator = HttpTranslator::new(config(None)).unwrap();
        assert!(matches!(
            translator.translate("hola").await,
            Err(TranslationError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_open_gate_fails_fast() {
        let translator = HttpTranslator::new(config(Some("k"))).unwrap();
        translator.gate.record_failure();
        translator.gate.record_failure();

        assert!(matches!(
            translator.translate("hola").await,
            Err(TranslationError::ServiceUnavailable)
        ));
    }

    #[test]
    fn test_client_construction_respects_timeouts() {
        // Mostly a smoke test: builder options must compose without panic.
        let mut cfg = config(Some("k"));
        cfg.timeout_seconds = 1;
        cfg.cooldown_seconds = Duration::from_secs(1).as_secs();
        assert!(HttpTranslator::new(cfg).is_ok());
    }
}
