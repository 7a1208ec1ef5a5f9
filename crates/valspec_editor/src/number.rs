//! Editor for numeric primitives.
//!
//! The field keeps its own raw text, separate from the stored number, so the
//! user can type an arithmetic expression such as `60 * 24`. Typing a plain
//! number writes it straight away; anything else waits for [`commit`], which
//! evaluates the expression. A failed evaluation quietly puts the last stored
//! number back into the field.
//!
//! [`commit`]: NumberEditor::commit

use valspec_foundation::{
    Literal, PrimitiveInstanceValue, PrimitiveType, ValueSpecification, parse_number,
};

use crate::host::EditorHost;

/// A numeric text field with inline expression evaluation.
#[derive(Clone, Debug)]
pub struct NumberEditor {
    value: PrimitiveInstanceValue,
    text: String,
}

impl NumberEditor {
    /// Creates an editor showing the stored value of `value`.
    #[must_use]
    pub fn new(value: PrimitiveInstanceValue) -> Self {
        let text = stored_text(&value);
        Self { value, text }
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

    /// Returns the raw field text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the field stores whole numbers.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.value.ty == PrimitiveType::Integer
    }

    /// Returns true if the stored value fits the declared type.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value.is_valid()
    }

    /// Handles typed input.
    ///
    /// Plain numbers are written immediately; blank text asks the host to
    /// reset; anything else is kept as text until [`NumberEditor::commit`].
    pub fn input(&mut self, text: &str, host: &mut dyn EditorHost) {
        self.text = text.to_string();
        if text.trim().is_empty() {
            host.reset_value();
        } else if let Some(literal) = parse_number(text).and_then(|n| self.literal_for(n)) {
            self.write(literal, host);
        }
    }

    /// Handles Enter, focus loss, or the evaluate button.
    pub fn commit(&mut self, host: &mut dyn EditorHost) {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            host.reset_value();
            return;
        }

        let number = match parse_number(&text) {
            Some(n) => Some(n),
            None => match valspec_expr::evaluate(&text) {
                Ok(n) => {
                    tracing::debug!(expression = %text, result = n, "evaluated number field");
                    Some(n)
                }
                Err(err) => {
                    tracing::debug!(expression = %text, %err, "reverting number field");
                    None
                }
            },
        };

        match number.and_then(|n| self.literal_for(n)) {
            Some(literal) => {
                self.text = literal.scalar_text();
                self.write(literal, host);
            }
            None => self.revert(host),
        }
    }

    /// Re-reads the stored value after the host changed it.
    ///
    /// An unfinished expression in the field is left alone.
    pub fn sync(&mut self) {
        let typed = parse_number(&self.text).and_then(|n| self.literal_for(n));
        if let Some(typed) = typed {
            if typed.as_number() != self.stored_number() {
                self.text = stored_text(&self.value);
            }
        }
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }

    fn literal_for(&self, n: f64) -> Option<Literal> {
        Literal::number_for(self.value.ty, n)
    }

    fn stored_number(&self) -> Option<f64> {
        self.value.value().and_then(Literal::as_number)
    }

    fn write(&mut self, literal: Literal, host: &mut dyn EditorHost) {
        if literal.as_number() == self.stored_number() {
            return;
        }
        self.value.set_value(literal);
        host.value_changed(&ValueSpecification::Primitive(self.value.clone()));
    }

    fn revert(&mut self, host: &mut dyn EditorHost) {
        let previous = stored_text(&self.value);
        if previous.is_empty() {
            host.reset_value();
        }
        self.text = previous;
    }
}

fn stored_text(value: &PrimitiveInstanceValue) -> String {
    value.value().map(Literal::scalar_text).unwrap_or_default()
}
