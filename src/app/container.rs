// Application container - Wires adapters into interactors

use std::sync::Arc;

use tracing::debug;

use crate::adapters::toml_config::{AppConfig, BackendKind};
use crate::adapters::{FFmpegAdapter, FsScriptStore, HostedInferenceAdapter, ManagedEndpointAdapter};
use crate::app::generate_interactor::GenerateInteractor;
use crate::domain::errors::DomainError;
use crate::ports::{EncodePort, GenerationPort, ScriptStorePort};

pub trait AppContainer: Send + Sync {
    fn generate_interactor(&self) -> Arc<GenerateInteractor>;
    fn script_store(&self) -> Arc<dyn ScriptStorePort>;
}

pub struct DefaultAppContainer {
    generate_interactor: Arc<GenerateInteractor>,
    script_store: Arc<dyn ScriptStorePort>,
}

impl DefaultAppContainer {
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let generation_port = Self::backend(config)?;
        let encode_port: Arc<dyn EncodePort> = Arc::new(FFmpegAdapter::new(config.encoder.clone()));
        let script_store: Arc<dyn ScriptStorePort> = Arc::new(FsScriptStore::new());

        let generate_interactor = Arc::new(GenerateInteractor::new(
            generation_port,
            encode_port,
            Arc::clone(&script_store),
        ));

        Ok(Self {
            generate_interactor,
            script_store,
        })
    }

    fn backend(config: &AppConfig) -> Result<Arc<dyn GenerationPort>, DomainError> {
        match config.backend.kind {
            BackendKind::Hosted => {
                let adapter = HostedInferenceAdapter::new(&config.backend)?;
                debug!("Using hosted backend at {}", adapter.url());
                Ok(Arc::new(adapter))
            }
            BackendKind::Managed => {
                let adapter = ManagedEndpointAdapter::new(&config.backend)?;
                debug!("Using managed endpoint at {}", adapter.url());
                Ok(Arc::new(adapter))
            }
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn generate_interactor(&self) -> Arc<GenerateInteractor> {
        Arc::clone(&self.generate_interactor)
    }

    fn script_store(&self) -> Arc<dyn ScriptStorePort> {
        Arc::clone(&self.script_store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_hosted_container() {
        assert!(DefaultAppContainer::new(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_managed_backend_needs_an_address() {
        let mut config = AppConfig::default();
        config.backend.kind = BackendKind::Managed;
        assert!(matches!(
            DefaultAppContainer::new(&config),
            Err(DomainError::Config(_))
        ));

        config.backend.endpoint_url = Some("http://localhost:8080/invocations".to_string());
        assert!(DefaultAppContainer::new(&config).is_ok());
    }
}
