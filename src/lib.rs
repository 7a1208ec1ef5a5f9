//! valspec - Editors for typed query-builder value specifications
//!
//! This crate re-exports all layers of the valspec system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: valspec_runtime     - REPL, CLI, session persistence
//! Layer 3: valspec_editor      - Per-variant editors, dispatch, suggestions
//! Layer 2: valspec_codec       - CSV value-to-text codec
//! Layer 1: valspec_expr        - Numeric expression evaluation
//! Layer 0: valspec_foundation  - Core types (Type, Literal, ValueSpecification, Error)
//! ```

pub use valspec_codec as codec;
pub use valspec_editor as editor;
pub use valspec_expr as expr;
pub use valspec_foundation as foundation;
pub use valspec_runtime as runtime;
