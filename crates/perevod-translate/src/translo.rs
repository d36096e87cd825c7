//! RapidAPI Translo client.
//!
//! The service takes a form-encoded POST with `from`, `to` and `text` and
//! answers with JSON:
//!
//! ```text
//! {"ok": true, "text_lang": "ru", "translated_text": "hello"}
//! ```
//!
//! Failures come back as non-2xx statuses, or occasionally as a 200 with
//! `"ok": false` and an `error` message.

use std::sync::Arc;
use std::time::Duration;

use perevod_core::languages::LanguagePair;
use serde::Deserialize;
use tracing::{debug, info};

use crate::client::{BoxFuture, TranslationClient, TranslationRequest, TranslationResponse};
use crate::error::TranslateError;

pub const DEFAULT_ENDPOINT: &str = "https://translo.p.rapidapi.com/api/v3/translate";
pub const DEFAULT_HOST: &str = "translo.p.rapidapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct TransloConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_host: String,
    pub timeout: Duration,
}

impl TransloConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            api_host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct TransloClient {
    agent: ureq::Agent,
    config: Arc<TransloConfig>,
}

impl TransloClient {
    pub fn new(config: TransloConfig) -> Result<Self, TranslateError> {
        if config.api_key.trim().is_empty() {
            return Err(TranslateError::Config("API key is not set".to_string()));
        }
        if config.endpoint.trim().is_empty() {
            return Err(TranslateError::Config("endpoint is not set".to_string()));
        }

        // Status codes are mapped by `interpret_response`, not by ureq.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            config: Arc::new(config),
        })
    }
}

impl TranslationClient for TransloClient {
    fn translate<'a>(
        &'a self,
        request: &'a TranslationRequest,
    ) -> BoxFuture<'a, Result<TranslationResponse, TranslateError>> {
        Box::pin(async move {
            if request.text.trim().is_empty() {
                return Err(TranslateError::EmptyText);
            }

            let agent = self.agent.clone();
            let config = Arc::clone(&self.config);
            let owned = request.clone();

            // ureq is blocking; keep it off the async workers.
            let (status, body) =
                tokio::task::spawn_blocking(move || post_form(&agent, &config, &owned))
                    .await
                    .map_err(|e| TranslateError::Network(format!("request task failed: {e}")))??;

            debug!(status, bytes = body.len(), "translation service responded");
            let response = interpret_response(status, &body, request.pair)?;
            info!(
                from = %request.pair.from,
                to = %request.pair.to,
                chars = request.text.chars().count(),
                "text translated"
            );
            Ok(response)
        })
    }
}

fn post_form(
    agent: &ureq::Agent,
    config: &TransloConfig,
    request: &TranslationRequest,
) -> Result<(u16, String), TranslateError> {
    let mut response = agent
        .post(&config.endpoint)
        .header("X-RapidAPI-Key", &config.api_key)
        .header("X-RapidAPI-Host", &config.api_host)
        .send_form([
            ("from", request.pair.from.code()),
            ("to", request.pair.to.code()),
            ("text", request.text.as_str()),
        ])
        .map_err(|e| TranslateError::Network(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| TranslateError::Network(format!("failed to read response body: {e}")))?;

    Ok((status, body))
}

#[derive(Debug, Deserialize)]
struct TransloReply {
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    translated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Map a raw HTTP status and body onto a translation result.
///
/// - 429 → `RateLimit`
/// - 400 / 422 → `UnsupportedLanguagePair` (the service's answer to an
///   unknown or disallowed direction)
/// - any other non-2xx → `Network`
/// - 2xx without `translated_text`, or with `"ok": false` → `InvalidResponse`
pub fn interpret_response(
    status: u16,
    body: &str,
    pair: LanguagePair,
) -> Result<TranslationResponse, TranslateError> {
    match status {
        200..=299 => {}
        429 => return Err(TranslateError::RateLimit(summarize(body))),
        400 | 422 => {
            debug!(status, body = %summarize(body), "translation request rejected");
            return Err(TranslateError::UnsupportedLanguagePair {
                from: pair.from,
                to: pair.to,
            });
        }
        _ => {
            return Err(TranslateError::Network(format!(
                "HTTP {status}: {}",
                summarize(body)
            )));
        }
    }

    let reply: TransloReply = serde_json::from_str(body)
        .map_err(|e| TranslateError::InvalidResponse(format!("malformed JSON: {e}")))?;

    if reply.ok == Some(false) {
        let reason = reply
            .error
            .or(reply.message)
            .unwrap_or_else(|| "service reported failure".to_string());
        return Err(TranslateError::InvalidResponse(reason));
    }

    match reply.translated_text {
        Some(text) if !text.trim().is_empty() => Ok(TranslationResponse {
            translated_text: text,
        }),
        _ => Err(TranslateError::InvalidResponse(
            "missing translated_text".to_string(),
        )),
    }
}

/// First line of a response body, capped for log and error messages.
fn summarize(body: &str) -> String {
    const MAX: usize = 200;
    let line = body.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX {
        return line.to_string();
    }
    let cut: String = line.chars().take(MAX).collect();
    format!("{cut}…")
}
