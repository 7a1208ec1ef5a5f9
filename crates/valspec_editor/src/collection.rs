//! Editors for collections of primitive or enum values.
//!
//! [`CollectionEditor`] edits the elements as one line of CSV text. It shows
//! a short preview until the user starts editing, and only parses the text on
//! commit. A popover offers the same text in a larger field; moving focus to
//! the control that opens it must not commit, and closing it keeps the text
//! uncommitted until Enter or blur.
//!
//! [`EnumCollectionEditor`] is a multi-select over enum members.

use std::sync::Arc;

use valspec_codec::{parse, placeholder, preview, render, set_collection_value};
use valspec_foundation::{
    CollectionInstanceValue, EnumMember, EnumValueInstanceValue, Enumeration, Error, Result, Type,
    ValueSpecification,
};

use crate::config::EditorConfig;
use crate::host::EditorHost;

/// Text editor for a typed collection.
#[derive(Clone, Debug)]
pub struct CollectionEditor {
    value: CollectionInstanceValue,
    element_type: Type,
    text: String,
    editing: bool,
    popover: bool,
    preview_char_limit: usize,
    expand_button_name: String,
}

impl CollectionEditor {
    /// Creates an editor parsing text as elements of `element_type`.
    #[must_use]
    pub fn new(value: CollectionInstanceValue, element_type: Type, config: &EditorConfig) -> Self {
        let text = render(value.values());
        Self {
            value,
            element_type,
            text,
            editing: false,
            popover: false,
            preview_char_limit: config.preview_char_limit,
            expand_button_name: config.expand_button_name.clone(),
        }
    }

    /// Returns the edited value.
    #[must_use]
    pub fn value(&self) -> &CollectionInstanceValue {
        &self.value
    }

    /// Consumes the editor, returning the edited value.
    #[must_use]
    pub fn into_value(self) -> CollectionInstanceValue {
        self.value
    }

    /// Returns the element type text is parsed against.
    #[must_use]
    pub fn element_type(&self) -> &Type {
        &self.element_type
    }

    /// Returns the field text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the read-only summary shown outside edit mode.
    #[must_use]
    pub fn preview(&self) -> String {
        preview(self.value.values(), self.preview_char_limit)
    }

    /// Returns the hint shown in an empty field.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        placeholder(&self.element_type)
    }

    /// Returns true while the text field is shown.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Returns true while the popover is shown.
    #[must_use]
    pub fn is_popover_open(&self) -> bool {
        self.popover
    }

    /// Switches from the preview to the text field.
    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Replaces the field text without parsing it.
    pub fn input(&mut self, text: &str) {
        self.editing = true;
        self.text = text.to_string();
    }

    /// Parses the field text into the collection.
    ///
    /// The field is re-rendered from the stored elements, so dropped tokens
    /// and duplicates disappear from the text. When the element type cannot
    /// be edited as text the collection is left as it was and the host is not
    /// notified.
    pub fn commit(&mut self, host: &mut dyn EditorHost) {
        let replaced = set_collection_value(&mut self.value, &self.element_type, &self.text);
        self.text = render(self.value.values());
        self.editing = false;
        self.popover = false;
        if replaced {
            tracing::debug!(
                element_type = %self.element_type,
                len = self.value.len(),
                "committed collection"
            );
            host.value_changed(&ValueSpecification::Collection(self.value.clone()));
        }
    }

    /// Handles focus leaving the field for `target`.
    ///
    /// Commits unless focus moved to the expand control.
    pub fn blur(&mut self, target: Option<&str>, host: &mut dyn EditorHost) {
        if target == Some(self.expand_button_name.as_str()) {
            return;
        }
        self.commit(host);
    }

    /// Opens the popover with the current text.
    pub fn open_popover(&mut self) {
        self.editing = true;
        self.popover = true;
    }

    /// Closes the popover. The text stays in the field, still uncommitted.
    pub fn close_popover(&mut self) {
        self.popover = false;
    }

    /// Leaves edit mode and discards the typed text.
    pub fn cancel(&mut self) {
        self.text = render(self.value.values());
        self.editing = false;
        self.popover = false;
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }
}

/// Multi-select editor for a collection of enum values.
///
/// Selection changes are staged and written on [`EnumCollectionEditor::commit`].
#[derive(Clone, Debug)]
pub struct EnumCollectionEditor {
    value: CollectionInstanceValue,
    enumeration: Arc<Enumeration>,
    selected: Vec<EnumMember>,
    preview_char_limit: usize,
}

impl EnumCollectionEditor {
    /// Creates an editor for a collection of `enumeration` members.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the collection's element type is not an
    /// enumeration.
    pub fn new(value: CollectionInstanceValue, config: &EditorConfig) -> Result<Self> {
        let enumeration = value
            .element_type
            .as_ref()
            .and_then(Type::as_enumeration)
            .cloned()
            .ok_or_else(|| Error::unsupported("collection elements are not enum values"))?;
        Ok(Self::for_enumeration(value, enumeration, config))
    }

    pub(crate) fn for_enumeration(
        value: CollectionInstanceValue,
        enumeration: Arc<Enumeration>,
        config: &EditorConfig,
    ) -> Self {
        let selected = value
            .values()
            .iter()
            .filter_map(|v| v.unwrap_propagated().as_enum())
            .filter_map(|e| e.member().cloned())
            .collect();
        Self {
            value,
            enumeration,
            selected,
            preview_char_limit: config.preview_char_limit,
        }
    }

    /// Returns the edited value.
    #[must_use]
    pub fn value(&self) -> &CollectionInstanceValue {
        &self.value
    }

    /// Consumes the editor, returning the edited value.
    #[must_use]
    pub fn into_value(self) -> CollectionInstanceValue {
        self.value
    }

    /// Returns the staged selection in selection order.
    #[must_use]
    pub fn selected(&self) -> &[EnumMember] {
        &self.selected
    }

    /// Returns the members that are not selected yet.
    #[must_use]
    pub fn available(&self) -> Vec<EnumMember> {
        self.enumeration
            .all_members()
            .into_iter()
            .filter(|m| !self.selected.contains(m))
            .collect()
    }

    /// Adds the member called `name` to the selection.
    ///
    /// Selecting an already selected member does nothing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMember` if the enumeration has no such member.
    pub fn select(&mut self, name: &str) -> Result<()> {
        let member = self.enumeration.require_member(name)?;
        if !self.selected.contains(&member) {
            self.selected.push(member);
        }
        Ok(())
    }

    /// Replaces the staged selection with the members named in CSV `text`.
    ///
    /// Unknown names and repeats are dropped.
    pub fn paste(&mut self, text: &str) {
        let target = Type::Enumeration(Arc::clone(&self.enumeration));
        if let Some(values) = parse(text, &target).into_values() {
            self.selected = values
                .iter()
                .filter_map(ValueSpecification::as_enum)
                .filter_map(|e| e.member().cloned())
                .collect();
        }
    }

    /// Removes the member called `name` from the selection.
    pub fn deselect(&mut self, name: &str) {
        self.selected.retain(|m| m.name != name);
    }

    /// Writes the staged selection into the collection.
    pub fn commit(&mut self, host: &mut dyn EditorHost) {
        let values = self
            .selected
            .iter()
            .map(|m| {
                EnumValueInstanceValue::with_member(Arc::clone(&self.enumeration), m.clone()).into()
            })
            .collect();
        self.value.set_values(values);
        host.value_changed(&ValueSpecification::Collection(self.value.clone()));
    }

    /// Returns the read-only summary of the stored elements.
    #[must_use]
    pub fn preview(&self) -> String {
        preview(self.value.values(), self.preview_char_limit)
    }

    /// Asks the host to reset the value.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        host.reset_value();
    }
}
