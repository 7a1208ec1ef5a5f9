//! Read-only view of a variable reference.

use valspec_foundation::VariableExpression;

use crate::host::EditorHost;

/// Tooltip contents for a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableInfo {
    /// Type name, or `(unknown)` for an untyped variable.
    pub type_name: String,
    /// Variable name.
    pub name: String,
    /// Multiplicity, e.g. `[1]` or `[0..*]`.
    pub multiplicity: String,
}

/// Shows a variable in place of a value. The variable itself is not editable,
/// only resettable.
#[derive(Clone, Debug)]
pub struct VariableEditor {
    variable: VariableExpression,
    constant: bool,
}

impl VariableEditor {
    /// Creates a view of `variable`. `constant` marks a reference to a
    /// constant rather than a parameter.
    #[must_use]
    pub fn new(variable: VariableExpression, constant: bool) -> Self {
        Self { variable, constant }
    }

    /// Returns the variable.
    #[must_use]
    pub fn variable(&self) -> &VariableExpression {
        &self.variable
    }

    /// Consumes the view, returning the variable.
    #[must_use]
    pub fn into_value(self) -> VariableExpression {
        self.variable
    }

    /// Returns true for a constant reference.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Returns the tooltip contents.
    #[must_use]
    pub fn info(&self) -> VariableInfo {
        VariableInfo {
            type_name: self
                .variable
                .ty
                .as_ref()
                .map_or_else(|| "(unknown)".to_string(), |ty| ty.name().to_string()),
            name: self.variable.name.clone(),
            multiplicity: self.variable.multiplicity.describe(),
        }
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }
}
