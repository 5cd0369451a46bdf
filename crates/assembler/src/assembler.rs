//! Top-level two-pass assembly pipeline.
//!
//! 1. **Pass 1**: line analysis and address assignment (`labels::lay_out`),
//!    producing the addressed records and the populated label table.
//! 2. **Pass 2**: encoding each record through the shared codec
//!    (`encoder::encode_line_to_byte`), collecting packed bytes in address
//!    order.
//!
//! The main entry point is [`assemble_source`], which takes source text and
//! returns the packed bytes plus the metadata the listing is rendered from.

use std::fmt::Write as _;

use fisc_core::object;

use crate::encoder::{encode_line_to_byte, EncodeError};
use crate::labels::{lay_out, AddressedLine, LabelTable, LayoutError, LayoutErrorKind};

/// Assembly error with source line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleError {
    /// Kind of error.
    pub kind: AssembleErrorKind,
    /// 1-indexed source line where the error occurred.
    pub line: usize,
}

/// Classification of assembly errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleErrorKind {
    /// Pass-1 layout error (duplicate label, address overflow).
    Layout(LayoutErrorKind),
    /// Pass-2 encoding error (unknown mnemonic/register, unknown label,
    /// operand arity, branch range).
    Encode(EncodeError),
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AssembleErrorKind::Layout(kind) => write!(f, "line {}: {kind}", self.line),
            AssembleErrorKind::Encode(e) => write!(f, "line {}: {e}", self.line),
        }
    }
}

impl std::error::Error for AssembleError {}

impl From<LayoutError> for AssembleError {
    fn from(e: LayoutError) -> Self {
        Self {
            kind: AssembleErrorKind::Layout(e.kind),
            line: e.line,
        }
    }
}

/// Result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOutput {
    /// Packed instruction bytes in address order.
    pub bytes: Vec<u8>,
    /// Pass-1 records for the lines that produced those bytes.
    pub lines: Vec<AddressedLine>,
    /// The label table built during pass 1 (kept for listing output).
    pub labels: LabelTable,
}

impl AssembleOutput {
    /// Renders the packed bytes as object-file text.
    #[must_use]
    pub fn object_text(&self) -> String {
        object::render(&self.bytes)
    }
}

/// Assembles source text into a packed instruction stream.
///
/// # Errors
///
/// Returns an [`AssembleError`] carrying the offending source line when
/// either pass fails. The whole run aborts on the first error.
pub fn assemble_source(source: &str) -> Result<AssembleOutput, AssembleError> {
    let layout = lay_out(source)?;

    let mut bytes = Vec::with_capacity(layout.lines.len());
    for record in &layout.lines {
        let byte =
            encode_line_to_byte(&record.text, &layout.labels).map_err(|e| AssembleError {
                kind: AssembleErrorKind::Encode(e),
                line: record.source_line,
            })?;
        bytes.push(byte);
    }

    Ok(AssembleOutput {
        bytes,
        lines: layout.lines,
        labels: layout.labels,
    })
}

/// Renders the listing: every bound label with its address, then every
/// instruction with its address, packed byte, and original text.
#[must_use]
pub fn render_listing(output: &AssembleOutput) -> String {
    let mut text = String::new();

    text.push_str("*** LABEL LIST ***\n");
    for binding in output.labels.bindings() {
        let _ = writeln!(text, "{}\t{:02X}", binding.name, binding.address);
    }

    text.push_str("*** MACHINE PROGRAM ***\n");
    for (record, byte) in output.lines.iter().zip(&output.bytes) {
        let _ = writeln!(text, "{:02X}:{byte:02X}\t{}", record.address, record.text);
    }

    text
}
