//! Story selection and generated result types.
//!
//! Everything here lives for the duration of one request. A
//! [`SelectionRequest`] arrives from the client, is narrowed to a
//! [`StorySelection`] (the first entry of each category), and the generated
//! text is packaged into a [`StoryResult`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Message returned to the caller when any category is left empty.
pub const SELECTION_REQUIRED_MESSAGE: &str =
    "Please select a Genre, Theme, and Character to generate a story.";

/// One of the three categories a user picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionCategory {
    Genre,
    Theme,
    CharacterType,
}

impl SelectionCategory {
    /// Field name used in the request payload.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Genre => "genres",
            Self::Theme => "themes",
            Self::CharacterType => "character_types",
        }
    }
}

impl fmt::Display for SelectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genre => write!(f, "genre"),
            Self::Theme => write!(f, "theme"),
            Self::CharacterType => write!(f, "character type"),
        }
    }
}

/// Raw selection payload as posted by the client.
///
/// Each category is a list, but only the first entry is used. Missing and
/// `null` fields deserialize to an empty list so validation can report them
/// uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub themes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub character_types: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SelectionRequest {
    pub fn new(
        genres: impl IntoIterator<Item = impl Into<String>>,
        themes: impl IntoIterator<Item = impl Into<String>>,
        character_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            genres: genres.into_iter().map(Into::into).collect(),
            themes: themes.into_iter().map(Into::into).collect(),
            character_types: character_types.into_iter().map(Into::into).collect(),
        }
    }

    fn first_of(&self, category: SelectionCategory) -> Result<&str, DomainError> {
        let values = match category {
            SelectionCategory::Genre => &self.genres,
            SelectionCategory::Theme => &self.themes,
            SelectionCategory::CharacterType => &self.character_types,
        };
        values
            .first()
            .map(String::as_str)
            .ok_or_else(|| DomainError::missing_selection(category))
    }
}

/// The validated genre/theme/character triple a story is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySelection {
    genre: String,
    theme: String,
    character: String,
}

impl StorySelection {
    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    /// Echo of the selection for the response payload.
    pub fn components(&self) -> StoryComponents {
        StoryComponents {
            genre: self.genre.clone(),
            theme: self.theme.clone(),
            character: self.character.clone(),
        }
    }
}

impl TryFrom<&SelectionRequest> for StorySelection {
    type Error = DomainError;

    /// Takes the first entry of each category; any empty category fails.
    fn try_from(request: &SelectionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            genre: request.first_of(SelectionCategory::Genre)?.to_string(),
            theme: request.first_of(SelectionCategory::Theme)?.to_string(),
            character: request
                .first_of(SelectionCategory::CharacterType)?
                .to_string(),
        })
    }
}

/// The selected components echoed back with a generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryComponents {
    pub genre: String,
    pub theme: String,
    pub character: String,
}

/// A generated story idea and the metadata returned with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryResult {
    pub story_prompt: String,
    pub components: StoryComponents,
    pub timestamp: DateTime<Utc>,
    pub ai_generated: bool,
}

impl StoryResult {
    /// Package provider output for a selection. Always marked AI-generated.
    pub fn generated(
        story_prompt: impl Into<String>,
        selection: &StorySelection,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            story_prompt: story_prompt.into(),
            components: selection.components(),
            timestamp,
            ai_generated: true,
        }
    }
}
