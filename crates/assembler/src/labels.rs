//! Label table and pass-1 address assignment.
//!
//! Pass 1 walks the raw source lines, assigns a program address to every
//! line that carries instruction text, and binds each label it meets. The
//! table lives for one assembly run: built here, read-only during pass 2.

use fisc_core::PROGRAM_SLOTS;

use crate::parser::split_line;

/// A label bound to a program address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBinding {
    /// Label text, exactly as written before the `:` (untrimmed).
    pub name: String,
    /// The bound program address.
    pub address: u8,
    /// Source line number where the label was defined.
    pub defined_at: usize,
}

/// Insertion-ordered mapping from label name to program address.
///
/// Append-only for the duration of one assembly run; there is no removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    bindings: Vec<LabelBinding>,
}

/// Errors raised by label table operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// The same label name was bound twice.
    DuplicateLabel {
        /// The label name.
        name: String,
        /// Line of the first definition.
        first_definition: usize,
    },
    /// A referenced label was never bound.
    UnknownLabel {
        /// The label name.
        name: String,
    },
}

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateLabel {
                name,
                first_definition,
            } => write!(
                f,
                "duplicate label '{name}' (first defined at line {first_definition})"
            ),
            Self::UnknownLabel { name } => write!(f, "unknown label '{name}'"),
        }
    }
}

impl std::error::Error for LabelError {}

impl LabelTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a label name to an address.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::DuplicateLabel`] if the name is already bound.
    pub fn bind(&mut self, name: &str, address: u8, source_line: usize) -> Result<(), LabelError> {
        if let Some(existing) = self.lookup(name) {
            return Err(LabelError::DuplicateLabel {
                name: name.to_string(),
                first_definition: existing.defined_at,
            });
        }
        self.bindings.push(LabelBinding {
            name: name.to_string(),
            address,
            defined_at: source_line,
        });
        Ok(())
    }

    /// Resolves a label name to its bound address.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::UnknownLabel`] if the name was never bound.
    pub fn resolve(&self, name: &str) -> Result<u8, LabelError> {
        self.lookup(name)
            .map(|binding| binding.address)
            .ok_or_else(|| LabelError::UnknownLabel {
                name: name.to_string(),
            })
    }

    /// All bindings in insertion order.
    #[must_use]
    pub fn bindings(&self) -> &[LabelBinding] {
        &self.bindings
    }

    fn lookup(&self, name: &str) -> Option<&LabelBinding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }
}

/// A source line that was assigned a program address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedLine {
    /// The assigned program address.
    pub address: u8,
    /// Label text attached to this line, if any.
    pub label: Option<String>,
    /// Trimmed instruction text (always non-empty).
    pub text: String,
    /// Trailing comment text, if any.
    pub comment: String,
    /// 1-indexed source line number.
    pub source_line: usize,
}

/// Result of pass-1 address assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// All instruction-bearing lines with their assigned addresses.
    pub lines: Vec<AddressedLine>,
    /// Label table of definitions.
    pub labels: LabelTable,
}

/// Error during pass-1 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutError {
    /// Kind of error.
    pub kind: LayoutErrorKind,
    /// Source line where the error occurred.
    pub line: usize,
}

/// Classification of layout errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutErrorKind {
    /// Label table error (duplicate binding).
    Label(LabelError),
    /// Program exceeded the addressable slot count.
    AddressOverflow {
        /// Number of addressable program slots.
        slots: usize,
    },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::fmt::Display for LayoutErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Label(e) => write!(f, "{e}"),
            Self::AddressOverflow { slots } => {
                write!(f, "program exceeds the {slots}-slot address space")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Performs pass-1 address assignment over raw source text.
///
/// A line consumes an address only when its instruction text is non-empty
/// after comment and label stripping; a label on an empty line therefore
/// binds to the address of whatever instruction comes next.
///
/// # Errors
///
/// Returns a [`LayoutError`] if a label is bound twice or the program grows
/// past the addressable slot count.
#[allow(clippy::cast_possible_truncation)]
pub fn lay_out(source: &str) -> Result<Layout, LayoutError> {
    let mut labels = LabelTable::new();
    let mut lines = Vec::new();
    let mut address: usize = 0;

    for (index, raw) in source.lines().enumerate() {
        let source_line = index + 1;
        let parts = split_line(raw);

        if parts.is_empty() {
            if let Some(label) = parts.label {
                labels
                    .bind(&label, address as u8, source_line)
                    .map_err(|e| LayoutError {
                        kind: LayoutErrorKind::Label(e),
                        line: source_line,
                    })?;
            }
            continue;
        }

        if address >= PROGRAM_SLOTS {
            return Err(LayoutError {
                kind: LayoutErrorKind::AddressOverflow {
                    slots: PROGRAM_SLOTS,
                },
                line: source_line,
            });
        }

        if let Some(label) = &parts.label {
            labels
                .bind(label, address as u8, source_line)
                .map_err(|e| LayoutError {
                    kind: LayoutErrorKind::Label(e),
                    line: source_line,
                })?;
        }

        lines.push(AddressedLine {
            address: address as u8,
            label: parts.label,
            text: parts.text,
            comment: parts.comment,
            source_line,
        });
        address += 1;
    }

    Ok(Layout { lines, labels })
}
