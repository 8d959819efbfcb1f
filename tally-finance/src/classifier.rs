//! Zero-shot classifier client for descriptions the rule table cannot place.
//!
//! The classifier is an external collaborator: callers construct one handle
//! per process and inject it into [`crate::CategoryAssigner`]. Any failure
//! here is expected to be absorbed by the caller, never propagated up the
//! pipeline.

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// One candidate label with the classifier's confidence, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredLabel {
    pub label: String,
    pub score: f64,
}

/// A ranked zero-shot text classifier.
pub trait ZeroShotClassifier {
    /// Rank `labels` for `text`, highest confidence first.
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>>;
}

/// Hugging Face inference API client for zero-shot classification
/// (`facebook/bart-large-mnli` by default).
pub struct HfZeroShot {
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "facebook/bart-large-mnli";

impl HfZeroShot {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_token,
        }
    }

    /// Handle with the default public inference endpoint and model; token
    /// read from `HF_API_TOKEN` if set.
    pub fn from_env() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, std::env::var("HF_API_TOKEN").ok())
    }

    async fn classify_async(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>> {
        #[derive(Serialize)]
        struct Params<'a> {
            candidate_labels: &'a [&'a str],
        }

        #[derive(Serialize)]
        struct Req<'a> {
            inputs: &'a str,
            parameters: Params<'a>,
        }

        #[derive(Deserialize)]
        struct Resp {
            labels: Vec<String>,
            scores: Vec<f64>,
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("invalid api token")?;
            headers.insert(AUTHORIZATION, value);
        }

        let url = format!("{}/models/{}", self.endpoint.trim_end_matches('/'), self.model);
        let client = reqwest::Client::new();
        let resp = client
            .post(&url)
            .headers(headers)
            .json(&Req {
                inputs: text,
                parameters: Params { candidate_labels: labels },
            })
            .send()
            .await
            .with_context(|| format!("POST {}", url))?;

        let status = resp.status();
        let body = resp.text().await.context("reading classifier response")?;
        if !status.is_success() {
            bail!("classifier returned {}: {}", status, body.trim());
        }

        let parsed: Resp = serde_json::from_str(&body).context("parsing classifier response")?;
        Ok(parsed
            .labels
            .into_iter()
            .zip(parsed.scores)
            .map(|(label, score)| ScoredLabel { label, score })
            .collect())
    }
}

impl ZeroShotClassifier for HfZeroShot {
    fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<ScoredLabel>> {
        // Callers are synchronous, but we may already be inside a tokio
        // runtime (library use). block_on inside a running runtime panics,
        // so pick the bridge accordingly.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.classify_async(text, labels)))
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(self.classify_async(text, labels))
        }
    }
}
