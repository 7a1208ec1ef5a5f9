//! Integration tests for Layer 2: Codec
//!
//! Tests the CSV text form of collection fields.

mod records;
mod values;
