//! Integration tests for Layer 0: Foundation
//!
//! Tests for the type model, literals, value specifications, and errors.

mod errors;
mod types;
