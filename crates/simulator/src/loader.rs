//! Object-file loading.
//!
//! Parses the object-file text through the shared format module and decodes
//! every byte into the instruction shape the engine executes, assigning
//! sequential addresses from zero.

use fisc_core::{decode, object, Instruction, ObjectFormatError};

/// Loads a decoded program from object-file text.
///
/// # Errors
///
/// Returns an [`ObjectFormatError`] when the marker line is missing or
/// mismatched, or when a byte line is not exactly two hexadecimal digits.
pub fn load_program(text: &str) -> Result<Vec<Instruction>, ObjectFormatError> {
    let bytes = object::parse(text)?;
    Ok(bytes.into_iter().map(decode).collect())
}
