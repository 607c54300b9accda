// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_script;
pub mod hosted_inference;
pub mod inference_http;
pub mod managed_endpoint;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_script::FsScriptStore;
pub use hosted_inference::HostedInferenceAdapter;
pub use managed_endpoint::ManagedEndpointAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::{init_tracing, LogFormat};
