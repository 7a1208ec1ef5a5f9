//! Editor for `Boolean` primitives.

use valspec_foundation::{Literal, PrimitiveInstanceValue, ValueSpecification};

use crate::host::EditorHost;

/// A checkbox.
#[derive(Clone, Debug)]
pub struct BooleanEditor {
    value: PrimitiveInstanceValue,
}

impl BooleanEditor {
    /// Creates an editor for `value`.
    #[must_use]
    pub fn new(value: PrimitiveInstanceValue) -> Self {
        Self { value }
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

    /// Returns the checkbox state. A missing value reads as unchecked.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.value.value().and_then(Literal::as_bool).unwrap_or(false)
    }

    /// Flips the checkbox and notifies the host.
    pub fn toggle(&mut self, host: &mut dyn EditorHost) {
        let next = !self.checked();
        self.value.set_value(next);
        tracing::debug!(value = next, "toggled boolean");
        host.value_changed(&ValueSpecification::Primitive(self.value.clone()));
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }
}
