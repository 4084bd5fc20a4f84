//! Unified error types for the domain layer
//!
//! Provides a common error type for selection validation so adapters never
//! need to fall back to String or anyhow for domain failures.

use thiserror::Error;

use crate::story::SelectionCategory;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A selection category was missing or empty
    #[error("No {0} selected")]
    MissingSelection(SelectionCategory),
}

impl DomainError {
    /// Create a missing selection error for the given category
    pub fn missing_selection(category: SelectionCategory) -> Self {
        Self::MissingSelection(category)
    }
}
