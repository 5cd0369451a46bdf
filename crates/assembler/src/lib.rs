//! FISC assembler library.

/// Top-level two-pass assembler pipeline and listing output.
pub mod assembler;
/// Pass-2 instruction encoding against the shared codec.
pub mod encoder;
/// Label table and pass-1 address assignment.
pub mod labels;
/// Source line analysis (comment, label, instruction text).
pub mod parser;

#[cfg(test)]
use tempfile as _;
