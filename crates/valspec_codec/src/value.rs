//! Conversion between collection elements and their text form.

use std::collections::HashSet;
use std::sync::Arc;

use valspec_foundation::{
    CollectionInstanceValue, EnumValueInstanceValue, Enumeration, Literal, PrimitiveInstanceValue,
    PrimitiveType, Type, ValueSpecification, parse_number,
};

use crate::date::{is_date, is_date_time};
use crate::record::{stringify, tokenize};

/// The result of parsing collection text against a target type.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseOutcome {
    /// Replace the collection contents with these elements.
    Replace(Vec<ValueSpecification>),
    /// The target type cannot be edited as text; leave the collection alone.
    Unsupported,
}

impl ParseOutcome {
    /// Returns the replacement elements, if any.
    #[must_use]
    pub fn into_values(self) -> Option<Vec<ValueSpecification>> {
        match self {
            Self::Replace(values) => Some(values),
            Self::Unsupported => None,
        }
    }
}

/// Reduces an element to the scalar text shown in the field.
///
/// Primitives yield their raw value and enum references their member name.
/// Anything else, or an element without a value, is absent.
#[must_use]
pub fn scalar_of(value: &ValueSpecification) -> Option<String> {
    match value {
        ValueSpecification::Primitive(p) => p.value().map(Literal::scalar_text),
        ValueSpecification::Enum(e) => e.member().map(|m| m.name.clone()),
        _ => None,
    }
}

/// Renders elements as one CSV line.
///
/// Absent scalars are dropped; an empty input renders as empty text.
#[must_use]
pub fn render(values: &[ValueSpecification]) -> String {
    stringify(values.iter().filter_map(scalar_of))
}

/// Parses collection text into elements of `target`.
///
/// Blank text is an explicit clear for every target type. Tokens that do not
/// fit the target type are dropped, and duplicates after coercion keep their
/// first occurrence.
#[must_use]
pub fn parse(text: &str, target: &Type) -> ParseOutcome {
    if text.trim().is_empty() {
        return ParseOutcome::Replace(Vec::new());
    }

    let Some(coerce) = Coercion::for_type(target) else {
        tracing::debug!(%target, "collection text editing unsupported for type");
        return ParseOutcome::Unsupported;
    };

    let Some(tokens) = tokenize(text) else {
        return ParseOutcome::Replace(Vec::new());
    };

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let Some(value) = coerce.apply(token) else {
            tracing::trace!(%token, %target, "dropped token");
            continue;
        };
        if scalar_of(&value).is_some_and(|key| seen.insert(key)) {
            values.push(value);
        }
    }

    tracing::debug!(
        %target,
        tokens = tokens.len(),
        accepted = values.len(),
        "parsed collection text"
    );
    ParseOutcome::Replace(values)
}

/// Parses `text` and replaces the contents of `collection` with the result.
///
/// Returns true if the collection was replaced, false if `target` is not
/// editable as text and the collection was left untouched.
pub fn set_collection_value(
    collection: &mut CollectionInstanceValue,
    target: &Type,
    text: &str,
) -> bool {
    match parse(text, target) {
        ParseOutcome::Replace(values) => {
            collection.set_values(values);
            true
        }
        ParseOutcome::Unsupported => false,
    }
}

/// How one token becomes an element of the target type.
enum Coercion {
    String,
    Number(PrimitiveType),
    Date(PrimitiveType),
    DateTime,
    Enum(Arc<Enumeration>),
}

impl Coercion {
    fn for_type(target: &Type) -> Option<Self> {
        match target {
            Type::Primitive(ty) => match ty {
                PrimitiveType::String => Some(Self::String),
                PrimitiveType::Number
                | PrimitiveType::Integer
                | PrimitiveType::Float
                | PrimitiveType::Decimal => Some(Self::Number(*ty)),
                PrimitiveType::Date | PrimitiveType::StrictDate => Some(Self::Date(*ty)),
                PrimitiveType::DateTime => Some(Self::DateTime),
                PrimitiveType::Boolean
                | PrimitiveType::Binary
                | PrimitiveType::Byte
                | PrimitiveType::LatestDate
                | PrimitiveType::StrictTime => None,
            },
            Type::Enumeration(enumeration) => Some(Self::Enum(Arc::clone(enumeration))),
            Type::Class(_) => None,
        }
    }

    fn apply(&self, token: &str) -> Option<ValueSpecification> {
        match self {
            Self::String => Some(primitive(PrimitiveType::String, Literal::String(token.into()))),
            Self::Number(ty) => {
                let n = parse_number(token)?;
                // integer elements only accept whole numbers
                if *ty == PrimitiveType::Integer && n.fract() != 0.0 {
                    return None;
                }
                Literal::number_for(*ty, n).map(|literal| primitive(*ty, literal))
            }
            Self::Date(ty) => {
                let token = token.trim();
                is_date(token).then(|| primitive(*ty, Literal::Date(token.into())))
            }
            Self::DateTime => {
                let token = token.trim();
                is_date_time(token)
                    .then(|| primitive(PrimitiveType::DateTime, Literal::Date(token.into())))
            }
            Self::Enum(enumeration) => {
                let member = enumeration.member(token.trim())?;
                Some(EnumValueInstanceValue::with_member(Arc::clone(enumeration), member).into())
            }
        }
    }
}

fn primitive(ty: PrimitiveType, literal: Literal) -> ValueSpecification {
    PrimitiveInstanceValue::with_value(ty, literal).into()
}
