//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    ports::ClockPort,
    provider::ProviderHandle,
};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub story: use_cases::StoryUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(provider: ProviderHandle) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock::new()))
    }

    /// Create an App with an explicit clock (tests pin time this way).
    pub fn with_clock(provider: ProviderHandle, clock: Arc<dyn ClockPort>) -> Self {
        let generate = Arc::new(use_cases::GenerateStory::new(provider, clock));

        Self {
            use_cases: UseCases {
                story: use_cases::StoryUseCases::new(generate),
            },
        }
    }
}
