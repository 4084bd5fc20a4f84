//! The fixed story-idea prompt template.

use std::fmt;

use crate::story::StorySelection;

/// Prompt text ready to send to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    /// Render the story-idea template for a selection.
    ///
    /// Deterministic: the same selection always renders the same text.
    pub fn for_selection(selection: &StorySelection) -> Self {
        Self(format!(
            "
Generate a compelling, concise story idea suitable for a professional writer.
Focus on these core elements:

Genre: {genre}
Theme: {theme}
Main Character: {character}

The idea should be a single, inspiring paragraph (50-80 words) that includes:
- A clear, intriguing premise for the character.
- The central conflict or unique challenge they face.
- A strong emotional hook.
",
            genre = selection.genre(),
            theme = selection.theme(),
            character = selection.character(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
