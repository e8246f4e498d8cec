//! Core decoding primitives
//!
//! This module contains the fundamental building blocks for BinaryXML decoding:
//! - Scanner: bounds-checked byte reads and SIMD NUL search using memchr
//! - Tokenizer: two-grammar state machine for token extraction
//! - Attributes: zero-copy key/value records
//! - Error: decode and load error types

pub mod attributes;
pub mod error;
pub mod scanner;
pub mod tokenizer;
