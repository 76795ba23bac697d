//! Service layer modules.
//!
//! Request normalization, prompt rendering, the LLM provider clients and
//! the menu generator that ties them together.

pub mod extract;
pub mod llm;
pub mod menu_generator;
pub mod normalizer;
pub mod prompt;

pub use llm::ProviderRegistry;
pub use menu_generator::{GenerationError, MenuGenerator};
pub use normalizer::{normalize, NormalizeError};
