//! Object-file text format shared by the assembler and the simulator.
//!
//! An object file is a newline-delimited text rendering of the packed
//! instruction stream: a fixed marker line followed by one two-digit
//! uppercase hex byte per line, in address order.

use std::fmt::Write as _;

use thiserror::Error;

/// Exact first-line marker every object file must carry.
pub const OBJECT_MARKER: &str = "v2.0 raw";

/// Errors raised while parsing an object file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ObjectFormatError {
    /// First line missing or different from [`OBJECT_MARKER`].
    #[error("missing or mismatched format marker (expected \"{OBJECT_MARKER}\")")]
    BadMarker,
    /// A byte line that is not exactly two hexadecimal digits.
    #[error("line {line}: invalid instruction byte {text:?}")]
    BadByte {
        /// 1-indexed line number within the object file.
        line: usize,
        /// The offending line text.
        text: String,
    },
}

/// Renders a packed instruction stream as object-file text.
#[must_use]
pub fn render(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(OBJECT_MARKER.len() + 1 + bytes.len() * 3);
    out.push_str(OBJECT_MARKER);
    out.push('\n');
    for byte in bytes {
        // Infallible for String targets.
        let _ = writeln!(out, "{byte:02X}");
    }
    out
}

/// Parses object-file text back into the packed instruction stream.
///
/// # Errors
///
/// Returns [`ObjectFormatError::BadMarker`] when the first line is absent or
/// not exactly [`OBJECT_MARKER`], and [`ObjectFormatError::BadByte`] for any
/// subsequent line that is not exactly two hexadecimal digits.
pub fn parse(text: &str) -> Result<Vec<u8>, ObjectFormatError> {
    let mut lines = text.lines();

    if lines.next() != Some(OBJECT_MARKER) {
        return Err(ObjectFormatError::BadMarker);
    }

    let mut bytes = Vec::new();
    for (index, line) in lines.enumerate() {
        // from_str_radix tolerates a leading sign; the format does not.
        if line.len() != 2 || !line.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ObjectFormatError::BadByte {
                line: index + 2,
                text: line.to_string(),
            });
        }
        let byte = u8::from_str_radix(line, 16).map_err(|_| ObjectFormatError::BadByte {
            line: index + 2,
            text: line.to_string(),
        })?;
        bytes.push(byte);
    }

    Ok(bytes)
}
