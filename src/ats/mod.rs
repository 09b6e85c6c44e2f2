//! Client for the external ATS analyzer.
//!
//! Handlers hold an `Arc<dyn AtsGateway>` so the HTTP analyzer can be swapped
//! for another scorer at startup or in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AtsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analyzer returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("analyzer response has no data")]
    MissingData,

    #[error("malformed analyzer response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Request body sent to the analyzer.
#[derive(Debug, Serialize)]
pub struct AtsRequest<'a> {
    pub resume_data: &'a serde_json::Value,
    pub job_description: &'a str,
}

/// Scores and feedback produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AtsAnalysis {
    pub ats_score: f64,
    pub formatting_score: f64,
    pub keyword_score: f64,
    pub structure_score: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub job_match: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AtsEnvelope {
    #[serde(default)]
    data: Option<AtsAnalysis>,
}

/// Scores a resume snapshot against an optional job description.
#[async_trait]
pub trait AtsGateway: Send + Sync {
    async fn analyze(
        &self,
        resume_data: &serde_json::Value,
        job_description: &str,
    ) -> Result<AtsAnalysis, AtsError>;
}

/// Gateway backed by the analyzer's HTTP endpoint. No retries.
#[derive(Clone)]
pub struct HttpAtsGateway {
    client: Client,
    url: String,
}

impl HttpAtsGateway {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AtsError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AtsGateway for HttpAtsGateway {
    async fn analyze(
        &self,
        resume_data: &serde_json::Value,
        job_description: &str,
    ) -> Result<AtsAnalysis, AtsError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AtsRequest {
                resume_data,
                job_description,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("ATS analyzer returned {}: {}", status, body);
            return Err(AtsError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let analysis = parse_response(&body)?;
        debug!("ATS analysis succeeded: ats_score={}", analysis.ats_score);
        Ok(analysis)
    }
}

/// Extract the analysis from the analyzer's `{success, data}` envelope.
pub fn parse_response(body: &str) -> Result<AtsAnalysis, AtsError> {
    let envelope: AtsEnvelope = serde_json::from_str(body)?;
    envelope.data.ok_or(AtsError::MissingData)
}
