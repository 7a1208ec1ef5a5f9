//! CSV text codec for valspec collection values.
//!
//! A collection field shows its elements as one line of comma separated
//! text. Editing the text and committing it parses the line back into typed
//! elements, dropping tokens that do not fit the element type.
//!
//! This crate provides:
//! - [`render`] - Collection elements to display text
//! - [`parse`] - Display text to typed elements, as a [`ParseOutcome`]
//! - [`set_collection_value`] - Parse and apply to a collection in one step
//! - [`placeholder`] and [`preview`] - Auxiliary display strings
//! - [`date`] - Date and date-time recognition

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod date;
pub mod display;
pub mod record;
pub mod value;

pub use display::{EMPTY_PLACEHOLDER, placeholder, preview};
pub use record::{stringify, tokenize};
pub use value::{ParseOutcome, parse, render, scalar_of, set_collection_value};
