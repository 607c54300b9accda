//! shortgen library
//!
//! Short-video scripts with timing validation and a stable JSON interchange
//! format, rendered to video through text-to-video inference backends and an
//! ffmpeg encoder.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{create_template, Frame, GenerationParams, Script, ScriptSection};
pub use domain::rules::{ScriptValidator, ValidationIssue};
