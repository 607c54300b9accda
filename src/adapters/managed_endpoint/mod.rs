// Managed endpoint adapter - Text-to-video through a model-serving endpoint

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::adapters::inference_http;
use crate::adapters::toml_config::BackendConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Backend invoking a deployed model endpoint
pub struct ManagedEndpointAdapter {
    client: Client,
    url: String,
    token: Option<String>,
}

impl ManagedEndpointAdapter {
    /// Create new managed endpoint adapter
    pub fn new(config: &BackendConfig) -> Result<Self, DomainError> {
        Ok(Self {
            client: inference_http::build_client(config.timeout_secs)?,
            url: Self::invocation_url(config)?,
            token: config.endpoint_token.clone(),
        })
    }

    /// Explicit endpoint URL, or one derived from base and endpoint name
    pub fn invocation_url(config: &BackendConfig) -> Result<String, DomainError> {
        if let Some(url) = config.endpoint_url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.trim().to_string());
        }
        match config.endpoint_base.as_deref() {
            Some(base) if !config.endpoint_name.trim().is_empty() => Ok(format!(
                "{}/endpoints/{}/invocations",
                base.trim_end_matches('/'),
                config.endpoint_name.trim()
            )),
            _ => Err(DomainError::Config(
                "The managed backend needs endpoint_url, or endpoint_base with endpoint_name"
                    .to_string(),
            )),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerationPort for ManagedEndpointAdapter {
    fn name(&self) -> &str {
        "managed"
    }

    async fn submit(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<Frame>, DomainError> {
        info!(
            "Invoking endpoint for {} frames at {}x{}",
            params.frame_count, params.width, params.height
        );
        inference_http::request_frames(&self.client, &self.url, self.token.as_deref(), prompt, params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_url_wins() {
        let mut config = BackendConfig::default();
        config.endpoint_url = Some("https://models.example.test/ltx".to_string());
        config.endpoint_base = Some("https://ignored.example.test".to_string());
        assert_eq!(
            ManagedEndpointAdapter::invocation_url(&config).unwrap(),
            "https://models.example.test/ltx"
        );
    }

    #[test]
    fn test_url_derived_from_base_and_name() {
        let mut config = BackendConfig::default();
        config.endpoint_base = Some("https://runtime.example.test/".to_string());
        let adapter = ManagedEndpointAdapter::new(&config).unwrap();
        assert_eq!(
            adapter.url(),
            "https://runtime.example.test/endpoints/ltx-video-realtime-endpoint/invocations"
        );
    }

    #[test]
    fn test_missing_location_rejected() {
        let config = BackendConfig::default();
        assert!(matches!(
            ManagedEndpointAdapter::new(&config),
            Err(DomainError::Config(_))
        ));
    }
}
