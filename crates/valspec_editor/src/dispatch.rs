//! Choosing an editor for a value and its expected type.
//!
//! [`EditorKind::select`] is the single decision point: it looks through
//! propagated wrappers, maps primitive types to their editors, and accepts
//! function applications only where a dedicated editor understands them
//! (relative dates and foldable `minus`). Everything else is
//! [`EditorKind::Unsupported`].

use valspec_foundation::{PrimitiveType, Type, TypeCheckOption, ValueSpecification};

use crate::boolean::BooleanEditor;
use crate::collection::{CollectionEditor, EnumCollectionEditor};
use crate::config::EditorConfig;
use crate::date::{DateEditor, DateFunction, DateValue};
use crate::enum_value::EnumEditor;
use crate::host::EditorHost;
use crate::number::NumberEditor;
use crate::simplify::{MINUS, simplify_minus};
use crate::string::StringEditor;
use crate::variable::VariableEditor;

/// The editor family a value is shown with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Free text.
    String,
    /// Toggle.
    Boolean,
    /// Numeric field with expression evaluation.
    Number {
        /// Whether the field stores whole numbers.
        integer: bool,
    },
    /// Date picker.
    Date,
    /// Enum dropdown.
    Enum,
    /// Collection text field or enum multi-select.
    Collection,
    /// Read-only variable reference.
    Variable,
    /// Read-only placeholder.
    Unsupported,
}

impl EditorKind {
    /// Picks the editor family for `value` edited against `check`.
    #[must_use]
    pub fn select(value: &ValueSpecification, check: &TypeCheckOption) -> Self {
        match value {
            ValueSpecification::Primitive(p) => Self::for_primitive(p.ty),
            ValueSpecification::Enum(_) => Self::Enum,
            ValueSpecification::Collection(c) if c.element_type.is_some() => Self::Collection,
            ValueSpecification::Collection(_) => Self::Unsupported,
            ValueSpecification::Variable(_) => Self::Variable,
            ValueSpecification::Propagated(inner) => Self::select(inner, check),
            ValueSpecification::Function(f) => {
                let expected = &check.expected_type;
                if expected.is_sub_type_of(&PrimitiveType::Date.into()) {
                    if DateFunction::of(f).is_some() {
                        Self::Date
                    } else {
                        Self::Unsupported
                    }
                } else if expected.is_sub_type_of(&PrimitiveType::Number.into())
                    && f.matches_name(MINUS)
                {
                    simplify_minus(f)
                        .filter(|p| p.ty.is_numeric())
                        .map_or(Self::Unsupported, |p| Self::Number {
                            integer: p.ty == PrimitiveType::Integer,
                        })
                } else {
                    Self::Unsupported
                }
            }
        }
    }

    fn for_primitive(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::String => Self::String,
            PrimitiveType::Boolean => Self::Boolean,
            PrimitiveType::Number
            | PrimitiveType::Integer
            | PrimitiveType::Float
            | PrimitiveType::Decimal => Self::Number {
                integer: ty == PrimitiveType::Integer,
            },
            PrimitiveType::Date
            | PrimitiveType::StrictDate
            | PrimitiveType::DateTime
            | PrimitiveType::LatestDate => Self::Date,
            PrimitiveType::Binary | PrimitiveType::Byte | PrimitiveType::StrictTime => {
                Self::Unsupported
            }
        }
    }

    /// Returns true for the read-only families.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Variable | Self::Unsupported)
    }
}

/// Placeholder for a value no editor supports.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedEditor {
    value: ValueSpecification,
}

impl UnsupportedEditor {
    /// The only text the placeholder shows.
    pub const DESCRIPTION: &'static str = "Unsupported value";

    /// Wraps `value` unchanged.
    #[must_use]
    pub fn new(value: ValueSpecification) -> Self {
        Self { value }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub fn value(&self) -> &ValueSpecification {
        &self.value
    }

    /// Returns the placeholder text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }
}

/// An open editor of any family.
#[derive(Debug)]
pub enum Editor {
    /// See [`StringEditor`].
    String(StringEditor),
    /// See [`BooleanEditor`].
    Boolean(BooleanEditor),
    /// See [`NumberEditor`].
    Number(NumberEditor),
    /// See [`DateEditor`].
    Date(DateEditor),
    /// See [`EnumEditor`].
    Enum(EnumEditor),
    /// See [`CollectionEditor`].
    Collection(CollectionEditor),
    /// See [`EnumCollectionEditor`].
    EnumCollection(EnumCollectionEditor),
    /// See [`VariableEditor`].
    Variable(VariableEditor),
    /// See [`UnsupportedEditor`].
    Unsupported(UnsupportedEditor),
}

impl Editor {
    /// Opens the editor for `value` with the default configuration.
    #[must_use]
    pub fn open(value: ValueSpecification, check: &TypeCheckOption) -> Self {
        Self::open_with(value, check, &EditorConfig::default())
    }

    /// Opens the editor for `value`.
    ///
    /// Propagated wrappers are stripped. A foldable `minus` is replaced by
    /// its folded literal, so the editor holds the simplified value.
    #[must_use]
    pub fn open_with(
        value: ValueSpecification,
        check: &TypeCheckOption,
        config: &EditorConfig,
    ) -> Self {
        let kind = EditorKind::select(&value, check);
        let value = strip_propagated(value);
        tracing::debug!(?kind, expected = %check.expected_type, "opening editor");

        match (kind, value) {
            (EditorKind::String, ValueSpecification::Primitive(p)) => {
                Self::String(StringEditor::new(p))
            }
            (EditorKind::Boolean, ValueSpecification::Primitive(p)) => {
                Self::Boolean(BooleanEditor::new(p))
            }
            (EditorKind::Number { .. }, ValueSpecification::Primitive(p)) => {
                Self::Number(NumberEditor::new(p))
            }
            (EditorKind::Number { .. }, ValueSpecification::Function(f)) => {
                match simplify_minus(&f) {
                    Some(p) => Self::Number(NumberEditor::new(p)),
                    None => Self::Unsupported(UnsupportedEditor::new(f.into())),
                }
            }
            (EditorKind::Date, ValueSpecification::Primitive(p)) => {
                let ty = date_field_type(&check.expected_type).unwrap_or(p.ty);
                Self::Date(DateEditor::new(DateValue::Absolute(p), ty))
            }
            (EditorKind::Date, ValueSpecification::Function(f)) => {
                let ty = date_field_type(&check.expected_type).unwrap_or(PrimitiveType::Date);
                Self::Date(DateEditor::new(DateValue::Relative(f), ty))
            }
            (EditorKind::Enum, ValueSpecification::Enum(e)) => Self::Enum(EnumEditor::new(e)),
            (EditorKind::Collection, ValueSpecification::Collection(c)) => {
                match check.expected_type.as_enumeration().cloned() {
                    Some(enumeration) => Self::EnumCollection(
                        EnumCollectionEditor::for_enumeration(c, enumeration, config),
                    ),
                    None => Self::Collection(CollectionEditor::new(
                        c,
                        check.expected_type.clone(),
                        config,
                    )),
                }
            }
            (EditorKind::Variable, ValueSpecification::Variable(v)) => {
                Self::Variable(VariableEditor::new(v, false))
            }
            (_, value) => Self::Unsupported(UnsupportedEditor::new(value)),
        }
    }

    /// Returns the editor family.
    #[must_use]
    pub fn kind(&self) -> EditorKind {
        match self {
            Self::String(_) => EditorKind::String,
            Self::Boolean(_) => EditorKind::Boolean,
            Self::Number(e) => EditorKind::Number {
                integer: e.is_integer(),
            },
            Self::Date(_) => EditorKind::Date,
            Self::Enum(_) => EditorKind::Enum,
            Self::Collection(_) | Self::EnumCollection(_) => EditorKind::Collection,
            Self::Variable(_) => EditorKind::Variable,
            Self::Unsupported(_) => EditorKind::Unsupported,
        }
    }

    /// Asks the host to reset the value. The unsupported placeholder has no
    /// reset control and ignores this.
    pub fn reset(&mut self, host: &mut dyn EditorHost) {
        match self {
            Self::String(e) => e.reset(host),
            Self::Boolean(e) => e.reset(host),
            Self::Number(e) => e.reset(host),
            Self::Date(e) => e.reset(host),
            Self::Enum(e) => e.reset(host),
            Self::Collection(e) => e.reset(host),
            Self::EnumCollection(e) => e.reset(host),
            Self::Variable(e) => e.reset(host),
            Self::Unsupported(_) => {}
        }
    }

    /// Returns the text the editor shows when not being edited.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::String(e) => e.placeholder().unwrap_or(e.text()).to_string(),
            Self::Boolean(e) => e.checked().to_string(),
            Self::Number(e) => e.text().to_string(),
            Self::Date(e) => e.text(),
            Self::Enum(e) => e
                .selected()
                .or(e.placeholder())
                .unwrap_or_default()
                .to_string(),
            Self::Collection(e) => e.preview(),
            Self::EnumCollection(e) => e.preview(),
            Self::Variable(e) => format!("${}", e.variable().name),
            Self::Unsupported(e) => e.description().to_string(),
        }
    }

    /// Consumes the editor, returning the value it holds.
    #[must_use]
    pub fn into_value(self) -> ValueSpecification {
        match self {
            Self::String(e) => e.into_value().into(),
            Self::Boolean(e) => e.into_value().into(),
            Self::Number(e) => e.into_value().into(),
            Self::Date(e) => e.into_value().into(),
            Self::Enum(e) => e.into_value().into(),
            Self::Collection(e) => e.into_value().into(),
            Self::EnumCollection(e) => e.into_value().into(),
            Self::Variable(e) => e.into_value().into(),
            Self::Unsupported(e) => e.value,
        }
    }
}

fn strip_propagated(value: ValueSpecification) -> ValueSpecification {
    match value {
        ValueSpecification::Propagated(inner) => strip_propagated(*inner),
        other => other,
    }
}

/// The date type a field is validated against, when the expected type is one.
fn date_field_type(expected: &Type) -> Option<PrimitiveType> {
    expected.as_primitive().filter(|ty| ty.is_date())
}
