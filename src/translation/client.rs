use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use super::language::{SOURCE_LANGUAGE, api_language};
use super::policy::with_timeout;
use crate::config::{DEFAULT_TIMEOUT_MS, Project};
use crate::error::{Error, Result};

/// Default Google Translate v2 endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Something that can translate one message into a project locale.
pub trait Translator {
    fn translate(
        &self,
        text: &str,
        target_locale: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Translator backed by the Google Translate v2 REST API.
///
/// Every call is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl GoogleTranslator {
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            timeout,
        }
    }

    /// Builds a translator from the project configuration.
    ///
    /// The configured `googleApiKey` wins; `api_key` is used when it is empty.
    pub fn from_project(project: &Project, api_key: Option<&str>) -> Result<Self> {
        let config = &project.config;
        let request_options = &config.translate_options.request_options;

        let api_key = if config.google_api_key.is_empty() {
            api_key.unwrap_or_default().to_string()
        } else {
            config.google_api_key.clone()
        };
        let endpoint = request_options
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout =
            Duration::from_millis(request_options.timeout.unwrap_or(DEFAULT_TIMEOUT_MS));

        let mut builder = Client::builder();
        if let Some(proxy) = &request_options.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Translation(format!("Invalid proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Translation(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            timeout,
        })
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn request(&self, text: &str, target_locale: &str) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            source: SOURCE_LANGUAGE,
            target: api_language(target_locale),
            format: "text",
        };

        let url = reqwest::Url::parse_with_params(&self.endpoint, [("key", &self.api_key)])
            .map_err(|e| Error::Translation(format!("Invalid endpoint {}: {e}", self.endpoint)))?;

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::Translation(format!("Failed to connect to {}: {e}", self.endpoint))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Translation(format!("Failed to read response: {e}")))?;

        parse_response(status.is_success(), &body).map_err(|message| {
            Error::Translation(format!("API request failed with status {status}: {message}"))
        })
    }
}

impl Translator for GoogleTranslator {
    fn translate(
        &self,
        text: &str,
        target_locale: &str,
    ) -> impl Future<Output = Result<String>> + Send {
        with_timeout(self.request(text, target_locale), self.timeout)
    }
}

/// Extracts the translated text, or a human-readable failure reason.
fn parse_response(success: bool, body: &str) -> std::result::Result<String, String> {
    let parsed: TranslateResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !success => return Err(body.trim().to_string()),
        Err(e) => return Err(format!("unexpected response body: {e}")),
    };

    if let Some(error) = parsed.error {
        return Err(error.message);
    }

    parsed
        .data
        .and_then(|data| data.translations.into_iter().next())
        .map(|translation| translation.translated_text)
        .ok_or_else(|| "response contained no translations".to_string())
}
