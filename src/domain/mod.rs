//! Domain types and DTOs
//!
//! Request shapes coming from the UI and the menu shape returned to it.

pub mod lenient;
pub mod menu;
pub mod request;

pub use menu::{Difficulty, GenerateMenuResponse, GeneratedMenu};
pub use request::{AiProvider, GenerateMenuBody, GenerationRequest, Ingredient};
