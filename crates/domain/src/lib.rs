//! StoryForge domain types.
//!
//! Request-scoped values only: the client's selection, the validated
//! selection, the rendered prompt and the generated result. No I/O.

pub mod error;
pub mod prompt;
pub mod story;

pub use error::DomainError;
pub use prompt::PromptText;
pub use story::{
    SelectionCategory, SelectionRequest, StoryComponents, StoryResult, StorySelection,
    SELECTION_REQUIRED_MESSAGE,
};
