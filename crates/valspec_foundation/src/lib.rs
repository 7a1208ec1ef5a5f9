//! Core types and values for valspec.
//!
//! This crate provides:
//! - [`Type`] - Type descriptors (primitive, enumeration, class)
//! - [`Literal`] - Raw literal values carried by primitive instance values
//! - [`ValueSpecification`] - The editable value specification tree
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod literal;
pub mod spec;
pub mod types;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use literal::{Literal, format_number, parse_number};
pub use spec::{
    CollectionInstanceValue, EnumValueInstanceValue, PrimitiveInstanceValue,
    SimpleFunctionExpression, ValueSpecification, VariableExpression,
};
pub use types::{EnumMember, Enumeration, Multiplicity, PrimitiveType, Type, TypeCheckOption};
