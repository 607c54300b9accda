// Application layer - Use case interactors

pub mod container;
pub mod generate_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use generate_interactor::{ClipRequest, GenerateInteractor, GenerateRequest, GenerationReport};
