//! Single-select editor for enumeration values.

use valspec_foundation::{EnumMember, EnumValueInstanceValue, Result, ValueSpecification};

use crate::host::EditorHost;

/// Hint shown while no member is selected.
pub const SELECT_PLACEHOLDER: &str = "Select value";

/// Dropdown over the members of the value's enumeration.
#[derive(Clone, Debug)]
pub struct EnumEditor {
    value: EnumValueInstanceValue,
}

impl EnumEditor {
    /// Creates an editor for `value`.
    #[must_use]
    pub fn new(value: EnumValueInstanceValue) -> Self {
        Self { value }
    }

    /// Returns the edited value.
    #[must_use]
    pub fn value(&self) -> &EnumValueInstanceValue {
        &self.value
    }

    /// Consumes the editor, returning the edited value.
    #[must_use]
    pub fn into_value(self) -> EnumValueInstanceValue {
        self.value
    }

    /// Returns the selectable members in declaration order.
    #[must_use]
    pub fn options(&self) -> Vec<EnumMember> {
        self.value.enumeration.all_members()
    }

    /// Returns the name of the selected member.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.value.member().map(|m| m.name.as_str())
    }

    /// Returns the hint shown while nothing is selected.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.value.member().is_none().then_some(SELECT_PLACEHOLDER)
    }

    /// Selects the member called `name`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMember` if the enumeration has no such member. The
    /// value is left untouched.
    pub fn select(&mut self, name: &str, host: &mut dyn EditorHost) -> Result<()> {
        let member = self.value.enumeration.require_member(name)?;
        self.value.set_member(member);
        host.value_changed(&ValueSpecification::Enum(self.value.clone()));
        Ok(())
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }
}
