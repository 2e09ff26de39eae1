//! Counting assist clients.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AssistError;
use crate::request::EstimateRequest;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// An estimated item count. Confidence is advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountEstimate {
    pub count: u32,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub description: String,
}

/// Something that can estimate how many of an item a photo shows.
#[async_trait]
pub trait CountingAssist: Send + Sync {
    async fn estimate_count(&self, request: &EstimateRequest)
        -> Result<CountEstimate, AssistError>;
}

/// Vision endpoint settings.
#[derive(Clone)]
pub struct AssistConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl AssistConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AssistConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    image_base64: String,
    mime_type: &'a str,
    item_label: &'a str,
}

#[derive(Deserialize)]
struct WireResponse {
    count: Option<i64>,
    confidence: Option<f64>,
    description: Option<String>,
}

impl WireResponse {
    fn into_estimate(self) -> Result<CountEstimate, AssistError> {
        let count = self
            .count
            .ok_or_else(|| AssistError::InvalidResponse("missing count".to_string()))?;
        let count = u32::try_from(count).map_err(|_| {
            AssistError::InvalidResponse(format!("count out of range: {count}"))
        })?;
        let confidence = self
            .confidence
            .filter(|c| c.is_finite())
            .ok_or_else(|| AssistError::InvalidResponse("missing confidence".to_string()))?;
        let description = self
            .description
            .ok_or_else(|| AssistError::InvalidResponse("missing description".to_string()))?;
        Ok(CountEstimate {
            count,
            confidence: confidence.clamp(0.0, 1.0),
            description,
        })
    }
}

/// Posts images to an HTTP vision endpoint.
#[derive(Clone)]
pub struct HttpCountingAssist {
    client: Client,
    config: AssistConfig,
}

impl HttpCountingAssist {
    pub fn new(config: AssistConfig) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AssistError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CountingAssist for HttpCountingAssist {
    async fn estimate_count(
        &self,
        request: &EstimateRequest,
    ) -> Result<CountEstimate, AssistError> {
        let body = WireRequest {
            image_base64: request.image_base64(),
            mime_type: request.mime_type(),
            item_label: request.item_label(),
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&body);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.inspect_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "Counting assist request failed");
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_body, "Counting assist returned an error");
            return Err(AssistError::Upstream {
                status: status.as_u16(),
            });
        }

        let wire: WireResponse = response.json().await?;
        let estimate = wire.into_estimate()?;
        debug!(
            item_label = request.item_label(),
            count = estimate.count,
            confidence = estimate.confidence,
            "Counting assist estimate"
        );
        Ok(estimate)
    }
}

/// Used when no vision endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableCountingAssist;

#[async_trait]
impl CountingAssist for UnavailableCountingAssist {
    async fn estimate_count(
        &self,
        _request: &EstimateRequest,
    ) -> Result<CountEstimate, AssistError> {
        Err(AssistError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(count: Option<i64>, confidence: Option<f64>, description: Option<&str>) -> WireResponse {
        WireResponse {
            count,
            confidence,
            description: description.map(String::from),
        }
    }

    #[test]
    fn test_confidence_is_clamped() {
        let estimate = wire(Some(4), Some(1.7), Some("four towels"))
            .into_estimate()
            .unwrap();
        assert_eq!(estimate.confidence, 1.0);

        let estimate = wire(Some(4), Some(-0.2), Some("")).into_estimate().unwrap();
        assert_eq!(estimate.confidence, 0.0);
    }

    #[test]
    fn test_negative_count_rejected() {
        assert!(matches!(
            wire(Some(-1), Some(0.5), Some("")).into_estimate(),
            Err(AssistError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(wire(None, Some(0.5), Some("")).into_estimate().is_err());
        assert!(wire(Some(1), None, Some("")).into_estimate().is_err());
        assert!(wire(Some(1), Some(0.5), None).into_estimate().is_err());
        assert!(wire(Some(1), Some(f64::NAN), Some("")).into_estimate().is_err());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = AssistConfig::new("http://vision").with_api_key("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_unavailable_assist() {
        let req = EstimateRequest::new(vec![1], "Towels", None).unwrap();
        assert!(matches!(
            UnavailableCountingAssist.estimate_count(&req).await,
            Err(AssistError::Unavailable)
        ));
    }
}
