//! Editor configuration.

use std::time::Duration;

/// Tunables shared by all editors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Characters of rendered text shown in a collection preview.
    pub preview_char_limit: usize,
    /// Delay before a suggestion fetch starts.
    pub suggestion_debounce: Duration,
    /// Name of the control that expands a collection field into a popover.
    /// Losing focus to it does not commit the field.
    pub expand_button_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            preview_char_limit: 50,
            suggestion_debounce: Duration::from_millis(300),
            expand_button_name: "ExpandButton".to_string(),
        }
    }
}

impl EditorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the collection preview length.
    #[must_use]
    pub fn with_preview_char_limit(mut self, limit: usize) -> Self {
        self.preview_char_limit = limit;
        self
    }

    /// Sets the suggestion debounce delay.
    #[must_use]
    pub fn with_suggestion_debounce(mut self, debounce: Duration) -> Self {
        self.suggestion_debounce = debounce;
        self
    }

    /// Sets the expand control name.
    #[must_use]
    pub fn with_expand_button_name(mut self, name: impl Into<String>) -> Self {
        self.expand_button_name = name.into();
        self
    }
}
