//! Headless editors for valspec value specifications.
//!
//! Each editor owns the value it edits, mutates it through explicit gesture
//! methods, and reports committed edits to an [`EditorHost`]. The
//! [`Editor::open`] entry point picks the editor for a value and its
//! expected type.
//!
//! This crate provides:
//! - [`EditorHost`] - Change, reset, and error notifications
//! - [`EditorKind`] / [`Editor`] - Dispatch over value variants
//! - Per-variant editors: [`StringEditor`], [`BooleanEditor`],
//!   [`NumberEditor`], [`DateEditor`], [`EnumEditor`],
//!   [`CollectionEditor`], [`EnumCollectionEditor`], [`VariableEditor`]
//! - [`SuggestionLoader`] - Debounced, cancellable suggestion fetching

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod boolean;
pub mod collection;
pub mod config;
pub mod date;
pub mod dispatch;
pub mod enum_value;
pub mod host;
pub mod number;
pub mod simplify;
pub mod string;
pub mod suggest;
pub mod variable;

pub use boolean::BooleanEditor;
pub use collection::{CollectionEditor, EnumCollectionEditor};
pub use config::EditorConfig;
pub use date::{DateEditor, DateFunction, DateValue};
pub use dispatch::{Editor, EditorKind, UnsupportedEditor};
pub use enum_value::EnumEditor;
pub use host::{EditorHost, HostEvent, RecordingHost};
pub use number::NumberEditor;
pub use simplify::simplify_minus;
pub use string::StringEditor;
pub use suggest::{SuggestionFuture, SuggestionLoader, SuggestionProvider};
pub use variable::{VariableEditor, VariableInfo};
