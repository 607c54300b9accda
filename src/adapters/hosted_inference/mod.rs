// Hosted inference adapter - Text-to-video through a hosted inference API

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::adapters::inference_http;
use crate::adapters::toml_config::BackendConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Backend addressing a model by id on a hosted inference API
pub struct HostedInferenceAdapter {
    client: Client,
    url: String,
    token: Option<String>,
}

impl HostedInferenceAdapter {
    /// Create new hosted inference adapter
    pub fn new(config: &BackendConfig) -> Result<Self, DomainError> {
        if config.model.trim().is_empty() {
            return Err(DomainError::Config(
                "A model id is required for the hosted backend".to_string(),
            ));
        }

        Ok(Self {
            client: inference_http::build_client(config.timeout_secs)?,
            url: Self::model_url(&config.api_base, &config.model),
            token: config.api_token.clone(),
        })
    }

    /// Inference URL for a model id
    pub fn model_url(api_base: &str, model: &str) -> String {
        format!("{}/models/{}", api_base.trim_end_matches('/'), model.trim())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerationPort for HostedInferenceAdapter {
    fn name(&self) -> &str {
        "hosted"
    }

    async fn submit(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<Vec<Frame>, DomainError> {
        info!(
            "Requesting {} frames at {}x{} from hosted model",
            params.frame_count, params.width, params.height
        );
        inference_http::request_frames(&self.client, &self.url, self.token.as_deref(), prompt, params)
            .await
    }
}
