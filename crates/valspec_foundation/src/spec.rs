//! Value specifications: the editable expression-tree nodes.
//!
//! A value specification is owned by the surrounding expression tree. Editors
//! mutate it in place through the explicit mutators defined here and then
//! notify their host.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::literal::Literal;
use crate::types::{EnumMember, Enumeration, Multiplicity, PrimitiveType, Type};

/// A node of the value specification tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValueSpecification {
    /// A typed primitive literal.
    Primitive(PrimitiveInstanceValue),
    /// A reference to an enumeration member.
    Enum(EnumValueInstanceValue),
    /// An ordered, homogeneously-typed collection.
    Collection(CollectionInstanceValue),
    /// A named placeholder substituted at execution time.
    Variable(VariableExpression),
    /// A value propagated from elsewhere; editors unwrap it.
    Propagated(Box<ValueSpecification>),
    /// A function application.
    Function(SimpleFunctionExpression),
}

impl ValueSpecification {
    /// Returns the declared type, if any.
    ///
    /// Collections report their element type.
    #[must_use]
    pub fn declared_type(&self) -> Option<Type> {
        match self {
            Self::Primitive(p) => Some(Type::Primitive(p.ty)),
            Self::Enum(e) => Some(Type::Enumeration(Arc::clone(&e.enumeration))),
            Self::Collection(c) => c.element_type.clone(),
            Self::Variable(v) => v.ty.clone(),
            Self::Propagated(inner) => inner.declared_type(),
            Self::Function(f) => f.return_type.clone(),
        }
    }

    /// Strips any number of `Propagated` wrappers.
    #[must_use]
    pub fn unwrap_propagated(&self) -> &Self {
        match self {
            Self::Propagated(inner) => inner.unwrap_propagated(),
            other => other,
        }
    }

    /// Mutable variant of [`ValueSpecification::unwrap_propagated`].
    pub fn unwrap_propagated_mut(&mut self) -> &mut Self {
        match self {
            Self::Propagated(inner) => inner.unwrap_propagated_mut(),
            other => other,
        }
    }

    /// Returns true if the node carries a well-formed value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Primitive(p) => p.is_valid(),
            Self::Enum(e) => e.is_valid(),
            Self::Collection(c) => c.is_valid(),
            Self::Variable(_) => true,
            Self::Propagated(inner) => inner.is_valid(),
            Self::Function(f) => f.parameters.iter().all(Self::is_valid),
        }
    }

    /// Attempts to borrow a primitive instance value.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<&PrimitiveInstanceValue> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Attempts to borrow an enum instance value.
    #[must_use]
    pub const fn as_enum(&self) -> Option<&EnumValueInstanceValue> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Attempts to borrow a collection.
    #[must_use]
    pub const fn as_collection(&self) -> Option<&CollectionInstanceValue> {
        match self {
            Self::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Attempts to borrow a variable.
    #[must_use]
    pub const fn as_variable(&self) -> Option<&VariableExpression> {
        match self {
            Self::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to borrow a function expression.
    #[must_use]
    pub const fn as_function(&self) -> Option<&SimpleFunctionExpression> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for ValueSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => match &p.value {
                Some(Literal::String(s)) => write!(f, "{s:?}"),
                Some(Literal::Date(d)) => write!(f, "%{}", d.trim_start_matches('%')),
                Some(literal) => write!(f, "{literal}"),
                None => write!(f, "<{}>", p.ty),
            },
            Self::Enum(e) => match &e.member {
                Some(m) => write!(f, "{}.{}", e.enumeration.name(), m.name),
                None => write!(f, "<{}>", e.enumeration.name()),
            },
            Self::Collection(c) => {
                write!(f, "[")?;
                for (i, item) in c.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Variable(v) => write!(f, "${}", v.name),
            Self::Propagated(inner) => write!(f, "{inner}"),
            Self::Function(func) => {
                write!(f, "{}(", func.short_name())?;
                for (i, param) in func.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A primitive literal with its declared type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrimitiveInstanceValue {
    /// Declared type.
    pub ty: PrimitiveType,
    /// Zero or one raw value.
    value: Option<Literal>,
}

impl PrimitiveInstanceValue {
    /// Creates an empty value of the given type.
    #[must_use]
    pub const fn new(ty: PrimitiveType) -> Self {
        Self { ty, value: None }
    }

    /// Creates a value carrying `literal`.
    #[must_use]
    pub fn with_value(ty: PrimitiveType, literal: impl Into<Literal>) -> Self {
        Self {
            ty,
            value: Some(literal.into()),
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> Option<&Literal> {
        self.value.as_ref()
    }

    /// Replaces the raw value.
    pub fn set_value(&mut self, literal: impl Into<Literal>) {
        self.value = Some(literal.into());
    }

    /// Removes the raw value.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Returns true if a value is present and its shape fits the declared type.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value
            .as_ref()
            .is_some_and(|literal| literal_fits(self.ty, literal))
    }
}

/// Returns true if `literal` has the shape `ty` stores.
#[must_use]
pub fn literal_fits(ty: PrimitiveType, literal: &Literal) -> bool {
    match literal {
        Literal::String(_) => ty == PrimitiveType::String,
        Literal::Boolean(_) => ty == PrimitiveType::Boolean,
        Literal::Integer(_) => ty.is_numeric(),
        Literal::Number(_) => ty.is_numeric() && ty != PrimitiveType::Integer,
        Literal::Date(_) => ty.is_date(),
    }
}

/// A reference to an enumeration member with its declared enumeration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValueInstanceValue {
    /// Declared enumeration.
    pub enumeration: Arc<Enumeration>,
    /// Zero or one selected member.
    member: Option<EnumMember>,
}

impl EnumValueInstanceValue {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new(enumeration: Arc<Enumeration>) -> Self {
        Self {
            enumeration,
            member: None,
        }
    }

    /// Creates a selection of `member`.
    #[must_use]
    pub const fn with_member(enumeration: Arc<Enumeration>, member: EnumMember) -> Self {
        Self {
            enumeration,
            member: Some(member),
        }
    }

    /// Returns the selected member.
    #[must_use]
    pub const fn member(&self) -> Option<&EnumMember> {
        self.member.as_ref()
    }

    /// Replaces the selected member.
    pub fn set_member(&mut self, member: EnumMember) {
        self.member = Some(member);
    }

    /// Returns true if a member of the declared enumeration is selected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.member.as_ref().is_some_and(|m| {
            m.enumeration == self.enumeration.path && self.enumeration.member(&m.name).is_some()
        })
    }
}

/// An ordered collection of literal values sharing one element type.
///
/// An untyped empty collection is the "no value" sentinel.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionInstanceValue {
    /// Declared element type.
    pub element_type: Option<Type>,
    /// Elements in order.
    values: Vec<ValueSpecification>,
}

impl CollectionInstanceValue {
    /// Creates an empty collection with the given element type.
    #[must_use]
    pub const fn new(element_type: Type) -> Self {
        Self {
            element_type: Some(element_type),
            values: Vec::new(),
        }
    }

    /// Creates the untyped empty sentinel.
    #[must_use]
    pub const fn sentinel() -> Self {
        Self {
            element_type: None,
            values: Vec::new(),
        }
    }

    /// Creates a collection holding `values`.
    #[must_use]
    pub const fn with_values(element_type: Type, values: Vec<ValueSpecification>) -> Self {
        Self {
            element_type: Some(element_type),
            values,
        }
    }

    /// Returns the elements.
    #[must_use]
    pub fn values(&self) -> &[ValueSpecification] {
        &self.values
    }

    /// Replaces all elements at once.
    pub fn set_values(&mut self, values: Vec<ValueSpecification>) {
        self.values = values;
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns true for the untyped empty sentinel.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.element_type.is_none() && self.values.is_empty()
    }

    /// Returns true if every element's declared type fits the element type.
    #[must_use]
    pub fn element_types_match(&self) -> bool {
        let Some(expected) = &self.element_type else {
            return self.values.is_empty();
        };
        self.values.iter().all(|v| {
            v.declared_type()
                .is_some_and(|actual| expected.accepts(&actual, false))
        })
    }

    /// Returns true if typed, well-typed, and every element is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.element_type.is_some()
            && self.element_types_match()
            && self.values.iter().all(ValueSpecification::is_valid)
    }
}

/// A named, typed placeholder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableExpression {
    /// Variable name.
    pub name: String,
    /// Declared type, if known.
    pub ty: Option<Type>,
    /// Cardinality range.
    pub multiplicity: Multiplicity,
}

impl VariableExpression {
    /// Creates a variable.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Option<Type>, multiplicity: Multiplicity) -> Self {
        Self {
            name: name.into(),
            ty,
            multiplicity,
        }
    }
}

/// A function application such as `minus(5)` or `today()`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimpleFunctionExpression {
    /// Function name, optionally package-qualified (`meta::math::minus`).
    pub function_name: String,
    /// Arguments in order.
    pub parameters: Vec<ValueSpecification>,
    /// Declared return type, if known.
    pub return_type: Option<Type>,
}

impl SimpleFunctionExpression {
    /// Creates a function application.
    #[must_use]
    pub fn new(function_name: impl Into<String>, parameters: Vec<ValueSpecification>) -> Self {
        Self {
            function_name: function_name.into(),
            parameters,
            return_type: None,
        }
    }

    /// Sets the return type.
    #[must_use]
    pub fn with_return_type(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Returns the unqualified function name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.function_name
            .rsplit("::")
            .next()
            .unwrap_or(&self.function_name)
    }

    /// Returns true if this function is `name`, qualified or not.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.function_name == name || self.short_name() == name
    }
}

// Convenience From implementations

impl From<PrimitiveInstanceValue> for ValueSpecification {
    fn from(p: PrimitiveInstanceValue) -> Self {
        Self::Primitive(p)
    }
}

impl From<EnumValueInstanceValue> for ValueSpecification {
    fn from(e: EnumValueInstanceValue) -> Self {
        Self::Enum(e)
    }
}

impl From<CollectionInstanceValue> for ValueSpecification {
    fn from(c: CollectionInstanceValue) -> Self {
        Self::Collection(c)
    }
}

impl From<VariableExpression> for ValueSpecification {
    fn from(v: VariableExpression) -> Self {
        Self::Variable(v)
    }
}

impl From<SimpleFunctionExpression> for ValueSpecification {
    fn from(f: SimpleFunctionExpression) -> Self {
        Self::Function(f)
    }
}
