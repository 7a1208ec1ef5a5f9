//! Editor for `String` primitives.

use valspec_codec::EMPTY_PLACEHOLDER;
use valspec_foundation::{Literal, PrimitiveInstanceValue, ValueSpecification};

use crate::host::EditorHost;
use crate::suggest::SuggestionLoader;

/// Free-text editor with optional suggestions.
///
/// Every keystroke is a commit: the value is written and the host notified
/// immediately.
#[derive(Debug)]
pub struct StringEditor {
    value: PrimitiveInstanceValue,
    suggestions: Option<SuggestionLoader>,
}

impl StringEditor {
    /// Creates an editor for `value`.
    #[must_use]
    pub fn new(value: PrimitiveInstanceValue) -> Self {
        Self {
            value,
            suggestions: None,
        }
    }

    /// Attaches a suggestion loader, turning the field into a selector.
    #[must_use]
    pub fn with_suggestions(mut self, loader: SuggestionLoader) -> Self {
        self.suggestions = Some(loader);
        self
    }

    /// Returns the edited value.
    #[must_use]
    pub fn value(&self) -> &PrimitiveInstanceValue {
        &self.value
    }

    /// Consumes the editor, returning the edited value.
    #[must_use]
    pub fn into_value(self) -> PrimitiveInstanceValue {
        self.value
    }

    /// Returns the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.value.value().and_then(Literal::as_str).unwrap_or("")
    }

    /// Returns the hint shown when the text is empty.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.text().is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    /// Returns the suggestion loader, if any.
    #[must_use]
    pub fn suggestions(&self) -> Option<&SuggestionLoader> {
        self.suggestions.as_ref()
    }

    /// Returns true if the value holds a string.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value.is_valid()
    }

    /// Handles typed input: writes it, then refreshes suggestions.
    pub fn input(&mut self, text: &str, host: &mut dyn EditorHost) {
        self.write(text, host);
        if let Some(loader) = &mut self.suggestions {
            if let Err(err) = loader.reload(text) {
                host.alert_unhandled_error(&err);
            }
        }
    }

    /// Handles choosing a suggestion; `None` clears the field.
    pub fn select(&mut self, choice: Option<&str>, host: &mut dyn EditorHost) {
        self.write(choice.unwrap_or(""), host);
    }

    /// Handles focus leaving the field.
    pub fn blur(&mut self) {
        if let Some(loader) = &mut self.suggestions {
            loader.clean_up();
        }
    }

    /// Forwards pending suggestion failures to the host.
    pub fn poll_errors(&mut self, host: &mut dyn EditorHost) {
        if let Some(loader) = &mut self.suggestions {
            loader.poll_errors(host);
        }
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }

    fn write(&mut self, text: &str, host: &mut dyn EditorHost) {
        self.value.set_value(text);
        host.value_changed(&ValueSpecification::Primitive(self.value.clone()));
    }
}
