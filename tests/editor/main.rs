//! Integration tests for Layer 3: Editors
//!
//! Tests editor selection and the gesture flows of each editor.

mod editors;
