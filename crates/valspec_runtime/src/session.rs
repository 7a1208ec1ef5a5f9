//! Session state for the REPL.
//!
//! A session is a small query form: a set of declared enumerations and a set
//! of typed parameters, each holding a value specification. Every edit goes
//! through the editor the dispatcher picks for that parameter, and the
//! session acts as the editor's host, writing back committed values and
//! restoring defaults on reset.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use valspec_editor::{
    DateFunction, Editor, EditorConfig, EditorKind, HostEvent, RecordingHost,
};
use valspec_foundation::{
    CollectionInstanceValue, EnumValueInstanceValue, Enumeration, Error, Multiplicity,
    PrimitiveInstanceValue, PrimitiveType, Result, SimpleFunctionExpression, Type,
    TypeCheckOption, ValueSpecification, VariableExpression,
};

use crate::gesture::{DAY_OF_WEEK, DURATION_UNIT, apply_text};

/// A declared parameter and its current value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type. For a many-valued parameter this is the element type.
    pub ty: Type,
    /// Declared multiplicity.
    pub multiplicity: Multiplicity,
    /// Current value.
    pub value: ValueSpecification,
    /// Value restored on reset.
    pub default: ValueSpecification,
}

impl Parameter {
    /// Returns the parameter as a variable reference.
    #[must_use]
    pub fn variable(&self) -> VariableExpression {
        VariableExpression::new(self.name.clone(), Some(self.ty.clone()), self.multiplicity)
    }

    /// Returns the type check used to pick and drive the parameter's editor.
    #[must_use]
    pub fn type_check(&self) -> TypeCheckOption {
        TypeCheckOption::new(self.ty.clone())
    }
}

/// Session state for an interactive REPL session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Enumerations keyed by short name.
    enumerations: BTreeMap<String, Arc<Enumeration>>,

    /// Parameters keyed by name.
    parameters: BTreeMap<String, Parameter>,

    /// Editor tunables.
    #[serde(skip)]
    config: EditorConfig,

    /// Current load path for relative file resolution.
    #[serde(skip)]
    load_path: PathBuf,
}

impl Session {
    /// Creates a session with only the built-in date enumerations.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates a session whose editors use `config`.
    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        let enumerations = [&*DAY_OF_WEEK, &*DURATION_UNIT]
            .into_iter()
            .map(|e| (e.name().to_string(), Arc::clone(e)))
            .collect();
        Self {
            enumerations,
            parameters: BTreeMap::new(),
            config,
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Returns the editor configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the editor configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    /// Gets the current load path.
    #[must_use]
    pub fn load_path(&self) -> &PathBuf {
        &self.load_path
    }

    /// Sets the load path (used when loading files).
    pub fn set_load_path(&mut self, path: PathBuf) {
        self.load_path = path;
    }

    /// Resolves a path relative to the current load path.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let p = PathBuf::from(path);
        if p.is_absolute() {
            p
        } else {
            self.load_path.join(p)
        }
    }

    /// Returns the declared enumerations.
    pub fn enumerations(&self) -> impl Iterator<Item = &Arc<Enumeration>> {
        self.enumerations.values()
    }

    /// Returns the declared parameters in name order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    /// Declares an enumeration, replacing any with the same short name.
    ///
    /// Parameters already declared with the old enumeration keep it.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` if the short name is a primitive type name or
    /// the member list is empty.
    pub fn define_enum<I, S>(&mut self, path: &str, members: I) -> Result<Arc<Enumeration>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let enumeration = Enumeration::new(path, members);
        let name = enumeration.name().to_string();
        if PrimitiveType::from_name(&name).is_some() {
            return Err(Error::unsupported(format!("{name} is a primitive type")));
        }
        if enumeration.members.is_empty() {
            return Err(Error::unsupported(format!("{name} has no members")));
        }
        tracing::debug!(%name, members = enumeration.members.len(), "defined enumeration");
        let enumeration = Arc::new(enumeration);
        self.enumerations.insert(name, Arc::clone(&enumeration));
        Ok(enumeration)
    }

    /// Resolves a type name: a primitive type, or an enumeration by short
    /// name or full path.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` if nothing has this name.
    pub fn resolve_type(&self, name: &str) -> Result<Type> {
        if let Some(primitive) = PrimitiveType::from_name(name) {
            return Ok(primitive.into());
        }
        self.enumerations
            .get(name)
            .or_else(|| self.enumerations.values().find(|e| e.path == name))
            .map(|e| Type::Enumeration(Arc::clone(e)))
            .ok_or_else(|| Error::unknown_type(name))
    }

    /// Declares a parameter and sets it to its default value, replacing any
    /// parameter with the same name.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` for an empty name.
    pub fn declare(&mut self, name: &str, ty: Type, multiplicity: Multiplicity) -> Result<()> {
        if name.is_empty() {
            return Err(Error::unsupported("parameter name is empty"));
        }
        let default = default_value(&ty, multiplicity);
        tracing::debug!(%name, %ty, %multiplicity, "declared parameter");
        self.parameters.insert(
            name.to_string(),
            Parameter {
                name: name.to_string(),
                ty,
                multiplicity,
                value: default.clone(),
                default,
            },
        );
        Ok(())
    }

    /// Looks up a parameter.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn parameter(&self, name: &str) -> Result<&Parameter> {
        self.parameters
            .get(name)
            .ok_or_else(|| Error::unknown_parameter(name))
    }

    fn parameter_mut(&mut self, name: &str) -> Result<&mut Parameter> {
        self.parameters
            .get_mut(name)
            .ok_or_else(|| Error::unknown_parameter(name))
    }

    /// Returns a parameter's current value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn value(&self, name: &str) -> Result<&ValueSpecification> {
        self.parameter(name).map(|p| &p.value)
    }

    /// Replaces a parameter's value without going through an editor.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn set_value(&mut self, name: &str, value: ValueSpecification) -> Result<()> {
        self.parameter_mut(name)?.value = value;
        Ok(())
    }

    /// Opens the editor for a parameter's current value.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn open(&self, name: &str) -> Result<Editor> {
        let parameter = self.parameter(name)?;
        Ok(Editor::open_with(
            parameter.value.clone(),
            &parameter.type_check(),
            &self.config,
        ))
    }

    /// Returns the editor family a parameter's value is edited with.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn kind(&self, name: &str) -> Result<EditorKind> {
        self.open(name).map(|editor| editor.kind())
    }

    /// Returns the text a parameter's editor shows.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn render(&self, name: &str) -> Result<String> {
        self.open(name).map(|editor| editor.summary())
    }

    /// Edits a parameter by applying `text` as its editor's gesture.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared, or the editor's
    /// error when it rejects the text. A rejected edit leaves the value
    /// untouched.
    pub fn edit(&mut self, name: &str, text: &str) -> Result<()> {
        self.with_editor(name, |editor, host| apply_text(editor, text, host))
    }

    /// Flips a boolean parameter.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared, or `TypeMismatch`
    /// if its editor is not a toggle.
    pub fn toggle(&mut self, name: &str) -> Result<()> {
        self.with_editor(name, |editor, host| match editor {
            Editor::Boolean(e) => {
                e.toggle(host);
                Ok(())
            }
            other => Err(Error::unsupported(format!(
                "{:?} editors cannot be toggled",
                other.kind()
            ))),
        })
    }

    /// Resets a parameter to its default through its editor.
    ///
    /// Read-only placeholders have no reset control, so their value stays.
    ///
    /// # Errors
    ///
    /// Returns `UnknownParameter` if it is not declared.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        self.with_editor(name, |editor, host| {
            editor.reset(host);
            Ok(())
        })
    }

    /// Opens an editor, runs `gesture` on it, and applies what the editor
    /// reported. Nothing is applied when the gesture fails.
    fn with_editor<F>(&mut self, name: &str, gesture: F) -> Result<()>
    where
        F: FnOnce(&mut Editor, &mut RecordingHost) -> Result<()>,
    {
        let mut editor = self.open(name)?;
        let mut host = RecordingHost::new();
        gesture(&mut editor, &mut host)?;

        let parameter = self.parameter_mut(name)?;
        for event in host.take_events() {
            match event {
                HostEvent::Changed(value) => {
                    tracing::debug!(parameter = %name, %value, "value changed");
                    *parameter.value.unwrap_propagated_mut() = value;
                }
                HostEvent::Reset => {
                    tracing::debug!(parameter = %name, "value reset");
                    parameter.value = parameter.default.clone();
                }
                HostEvent::Alert(message) => {
                    tracing::warn!(parameter = %name, %message, "editor alert");
                }
            }
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The value a freshly declared parameter starts with.
///
/// Many-valued parameters start as an empty typed collection. Dates start as
/// the matching relative function so they stay current.
#[must_use]
pub fn default_value(ty: &Type, multiplicity: Multiplicity) -> ValueSpecification {
    if multiplicity.is_many() {
        return CollectionInstanceValue::new(ty.clone()).into();
    }
    match ty {
        Type::Primitive(primitive) => match primitive {
            PrimitiveType::String => {
                PrimitiveInstanceValue::with_value(*primitive, "").into()
            }
            PrimitiveType::Boolean => PrimitiveInstanceValue::with_value(*primitive, false).into(),
            PrimitiveType::Integer => PrimitiveInstanceValue::with_value(*primitive, 0_i64).into(),
            PrimitiveType::Number | PrimitiveType::Float | PrimitiveType::Decimal => {
                PrimitiveInstanceValue::with_value(*primitive, 0.0).into()
            }
            PrimitiveType::Date | PrimitiveType::StrictDate => relative(DateFunction::Today),
            PrimitiveType::DateTime => relative(DateFunction::Now),
            PrimitiveType::LatestDate
            | PrimitiveType::Binary
            | PrimitiveType::Byte
            | PrimitiveType::StrictTime => PrimitiveInstanceValue::new(*primitive).into(),
        },
        Type::Enumeration(enumeration) => match enumeration.all_members().into_iter().next() {
            Some(member) => {
                EnumValueInstanceValue::with_member(Arc::clone(enumeration), member).into()
            }
            None => EnumValueInstanceValue::new(Arc::clone(enumeration)).into(),
        },
        Type::Class(_) => CollectionInstanceValue::sentinel().into(),
    }
}

fn relative(function: DateFunction) -> ValueSpecification {
    SimpleFunctionExpression::new(function.name(), Vec::new())
        .with_return_type(function.return_type().into())
        .into()
}
