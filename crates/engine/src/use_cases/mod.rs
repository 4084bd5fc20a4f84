//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod story;

// Re-export main types
pub use story::{GenerateStory, StoryError, StoryUseCases};
