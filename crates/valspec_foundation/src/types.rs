//! Type descriptors for value specifications.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Primitive types of the host graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrimitiveType {
    /// Text.
    String,
    /// `true` / `false`.
    Boolean,
    /// Any numeric value.
    Number,
    /// Whole numbers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Fixed-point decimals.
    Decimal,
    /// Raw binary payload.
    Binary,
    /// Single byte.
    Byte,
    /// Any date, with or without a time part.
    Date,
    /// Calendar date without time.
    StrictDate,
    /// Date with time.
    DateTime,
    /// The latest available business date.
    LatestDate,
    /// Time of day without date.
    StrictTime,
}

impl PrimitiveType {
    /// All primitive types, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::String,
        Self::Boolean,
        Self::Number,
        Self::Integer,
        Self::Float,
        Self::Decimal,
        Self::Binary,
        Self::Byte,
        Self::Date,
        Self::StrictDate,
        Self::DateTime,
        Self::LatestDate,
        Self::StrictTime,
    ];

    /// Returns the canonical type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::Binary => "Binary",
            Self::Byte => "Byte",
            Self::Date => "Date",
            Self::StrictDate => "StrictDate",
            Self::DateTime => "DateTime",
            Self::LatestDate => "LatestDate",
            Self::StrictTime => "StrictTime",
        }
    }

    /// Looks up a primitive type by its canonical name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns true if this type is `other` or one of its sub-types.
    ///
    /// `Integer`, `Float` and `Decimal` are numbers; `StrictDate`,
    /// `DateTime` and `LatestDate` are dates.
    #[must_use]
    pub const fn is_sub_type_of(self, other: Self) -> bool {
        match other {
            Self::Number => matches!(
                self,
                Self::Number | Self::Integer | Self::Float | Self::Decimal
            ),
            Self::Date => matches!(
                self,
                Self::Date | Self::StrictDate | Self::DateTime | Self::LatestDate
            ),
            _ => self as u8 == other as u8,
        }
    }

    /// Returns true for the numeric family.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_sub_type_of(Self::Number)
    }

    /// Returns true for the date family.
    #[must_use]
    pub const fn is_date(self) -> bool {
        self.is_sub_type_of(Self::Date)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named enumeration with ordered members.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enumeration {
    /// Fully qualified path, e.g. `model::Color`.
    pub path: String,
    /// Member names in declaration order.
    pub members: Vec<String>,
}

impl Enumeration {
    /// Creates an enumeration.
    pub fn new<I, S>(path: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the short name (last path segment).
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit("::").next().unwrap_or(&self.path)
    }

    /// Looks up a member by exact name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.members
            .iter()
            .any(|m| m == name)
            .then(|| EnumMember::new(self.path.clone(), name))
    }

    /// Looks up a member by exact name, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMember` if no member has this name.
    pub fn require_member(&self, name: &str) -> Result<EnumMember> {
        self.member(name)
            .ok_or_else(|| Error::unknown_member(self.path.clone(), name))
    }

    /// Returns all members as references.
    #[must_use]
    pub fn all_members(&self) -> Vec<EnumMember> {
        self.members
            .iter()
            .map(|m| EnumMember::new(self.path.clone(), m.clone()))
            .collect()
    }
}

/// A reference to one member of an enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumMember {
    /// Path of the owning enumeration.
    pub enumeration: String,
    /// Member name.
    pub name: String,
}

impl EnumMember {
    /// Creates a member reference.
    #[must_use]
    pub fn new(enumeration: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            enumeration: enumeration.into(),
            name: name.into(),
        }
    }
}

/// Type descriptor for a value specification.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// A primitive type.
    Primitive(PrimitiveType),
    /// An enumeration.
    Enumeration(Arc<Enumeration>),
    /// Any other (class) type, identified by path.
    Class(String),
}

impl Type {
    /// Creates an enumeration type.
    #[must_use]
    pub fn enumeration(enumeration: Enumeration) -> Self {
        Self::Enumeration(Arc::new(enumeration))
    }

    /// Returns the primitive type, if this is one.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            Self::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the enumeration, if this is one.
    #[must_use]
    pub fn as_enumeration(&self) -> Option<&Arc<Enumeration>> {
        match self {
            Self::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the display name of this type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(p) => p.name(),
            Self::Enumeration(e) => e.name(),
            Self::Class(path) => path.rsplit("::").next().unwrap_or(path),
        }
    }

    /// Returns true if this type is `other` or one of its sub-types.
    ///
    /// Enumerations and classes are only sub-types of themselves.
    #[must_use]
    pub fn is_sub_type_of(&self, other: &Type) -> bool {
        match (self, other) {
            (Self::Primitive(a), Self::Primitive(b)) => a.is_sub_type_of(*b),
            (Self::Enumeration(a), Self::Enumeration(b)) => a.path == b.path,
            (Self::Class(a), Self::Class(b)) => a == b,
            _ => false,
        }
    }

    /// Checks whether a value of type `actual` may be assigned where this
    /// type is expected.
    ///
    /// In non-strict mode auto-boxing is tolerated: any number may stand in
    /// for another number, any date for another date.
    #[must_use]
    pub fn accepts(&self, actual: &Type, strict: bool) -> bool {
        if strict {
            return self == actual;
        }
        match (self, actual) {
            (Self::Primitive(expected), Self::Primitive(actual)) => {
                actual.is_sub_type_of(*expected)
                    || (expected.is_numeric() && actual.is_numeric())
                    || (expected.is_date() && actual.is_date())
            }
            _ => actual.is_sub_type_of(self),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => write!(f, "{p}"),
            Self::Enumeration(e) => write!(f, "enum {}", e.path),
            Self::Class(path) => write!(f, "class {path}"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PrimitiveType> for Type {
    fn from(p: PrimitiveType) -> Self {
        Self::Primitive(p)
    }
}

/// Cardinality range of a variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Multiplicity {
    /// Lower bound (inclusive).
    pub lower: u32,
    /// Upper bound (inclusive), `None` for unbounded.
    pub upper: Option<u32>,
}

impl Multiplicity {
    /// Exactly one.
    pub const ONE: Self = Self::new(1, Some(1));
    /// Optional.
    pub const ZERO_ONE: Self = Self::new(0, Some(1));
    /// Any number.
    pub const ZERO_MANY: Self = Self::new(0, None);
    /// At least one.
    pub const ONE_MANY: Self = Self::new(1, None);

    /// Creates a multiplicity.
    #[must_use]
    pub const fn new(lower: u32, upper: Option<u32>) -> Self {
        Self { lower, upper }
    }

    /// Returns true if more than one value is allowed.
    #[must_use]
    pub const fn is_many(&self) -> bool {
        match self.upper {
            Some(upper) => upper > 1,
            None => true,
        }
    }

    /// Returns true if `count` values satisfy this multiplicity.
    #[must_use]
    pub fn admits(&self, count: usize) -> bool {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        count >= self.lower && self.upper.is_none_or(|upper| count <= upper)
    }

    /// Returns the bracketed description, e.g. `[1]`, `[0..1]`, `[*]`.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.lower, self.upper) {
            (0, None) => "[*]".to_string(),
            (lower, None) => format!("[{lower}..*]"),
            (lower, Some(upper)) if lower == upper => format!("[{lower}]"),
            (lower, Some(upper)) => format!("[{lower}..{upper}]"),
        }
    }

    /// Parses a bracketed description produced by [`Multiplicity::describe`].
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
        if inner == "*" {
            return Some(Self::ZERO_MANY);
        }
        match inner.split_once("..") {
            Some((lower, "*")) => Some(Self::new(lower.parse().ok()?, None)),
            Some((lower, upper)) => {
                let (lower, upper) = (lower.parse().ok()?, upper.parse().ok()?);
                (lower <= upper).then_some(Self::new(lower, Some(upper)))
            }
            None => {
                let n = inner.parse().ok()?;
                Some(Self::new(n, Some(n)))
            }
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// The type context a value is being edited against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeCheckOption {
    /// The expected type.
    pub expected_type: Type,
    /// Disallow auto-boxing (e.g. Integer where Float is expected).
    pub strict: bool,
}

impl TypeCheckOption {
    /// Creates a lenient type check against `expected_type`.
    #[must_use]
    pub fn new(expected_type: impl Into<Type>) -> Self {
        Self {
            expected_type: expected_type.into(),
            strict: false,
        }
    }

    /// Requires an exact type match.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
