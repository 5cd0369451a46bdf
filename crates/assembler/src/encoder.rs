//! Pass-2 instruction encoding.
//!
//! Resolves each pass-1 record's instruction text against the mnemonic and
//! register tables and the label table, then packs the result through the
//! shared codec.

use fisc_core::{encode, Instruction, Opcode, Reg, MAX_BRANCH_TARGET};

use crate::labels::{LabelError, LabelTable};

/// Mnemonic lookup table. Matching is ASCII case-insensitive.
const MNEMONIC_TABLE: &[(&str, Opcode)] = &[
    ("add", Opcode::Add),
    ("and", Opcode::And),
    ("not", Opcode::Not),
    ("bnz", Opcode::Bnz),
];

/// Register token lookup table. Matching is ASCII case-insensitive.
const REGISTER_TABLE: &[(&str, Reg)] = &[
    ("r0", Reg::R0),
    ("r1", Reg::R1),
    ("r2", Reg::R2),
    ("r3", Reg::R3),
];

/// Errors raised while encoding one instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// First token is not a recognized mnemonic.
    UnknownMnemonic(String),
    /// An operand token is not a recognized register name.
    InvalidRegister(String),
    /// Fewer operands than the mnemonic requires.
    MissingOperand {
        /// The mnemonic.
        mnemonic: String,
        /// Number of operands it requires.
        expected: usize,
    },
    /// More operands than the mnemonic accepts.
    UnexpectedOperand {
        /// The mnemonic.
        mnemonic: String,
        /// Number of operands it requires.
        expected: usize,
    },
    /// Branch operand did not resolve against the label table.
    Label(LabelError),
    /// Branch target address does not fit the 6-bit field.
    BranchTargetOutOfRange {
        /// The referenced label.
        name: String,
        /// Its bound address.
        address: u8,
    },
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownMnemonic(m) => write!(f, "unknown mnemonic: {m}"),
            Self::InvalidRegister(r) => write!(f, "invalid register: {r}"),
            Self::MissingOperand { mnemonic, expected } => {
                write!(f, "{mnemonic} requires {expected} operand(s)")
            }
            Self::UnexpectedOperand { mnemonic, expected } => {
                write!(f, "too many operands for {mnemonic} (takes {expected})")
            }
            Self::Label(e) => write!(f, "{e}"),
            Self::BranchTargetOutOfRange { name, address } => {
                write!(
                    f,
                    "branch target '{name}' at address {address} exceeds {MAX_BRANCH_TARGET}"
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<LabelError> for EncodeError {
    fn from(e: LabelError) -> Self {
        Self::Label(e)
    }
}

/// Resolves a mnemonic token to its opcode. ASCII case-insensitive.
#[must_use]
pub fn resolve_mnemonic(token: &str) -> Option<Opcode> {
    MNEMONIC_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, opcode)| *opcode)
}

/// Resolves a register token to its register. ASCII case-insensitive.
#[must_use]
pub fn resolve_register(token: &str) -> Option<Reg> {
    REGISTER_TABLE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, reg)| *reg)
}

/// Encodes one trimmed instruction text to its decoded instruction.
///
/// # Errors
///
/// Returns an [`EncodeError`] for unknown mnemonics, invalid register
/// tokens, wrong operand counts, unresolved branch labels, and branch
/// targets outside the 6-bit field.
pub fn encode_line(text: &str, labels: &LabelTable) -> Result<Instruction, EncodeError> {
    let mut tokens = text.split_whitespace();
    let mnemonic = tokens.next().unwrap_or_default();
    let operands: Vec<&str> = tokens.collect();

    let opcode =
        resolve_mnemonic(mnemonic).ok_or_else(|| EncodeError::UnknownMnemonic(mnemonic.into()))?;

    let expected = match opcode {
        Opcode::Add | Opcode::And => 3,
        Opcode::Not => 2,
        Opcode::Bnz => 1,
    };
    if operands.len() < expected {
        return Err(EncodeError::MissingOperand {
            mnemonic: mnemonic.into(),
            expected,
        });
    }
    if operands.len() > expected {
        return Err(EncodeError::UnexpectedOperand {
            mnemonic: mnemonic.into(),
            expected,
        });
    }

    match opcode {
        Opcode::Add => Ok(Instruction::Add {
            rd: register_operand(operands[0])?,
            rn: register_operand(operands[1])?,
            rm: register_operand(operands[2])?,
        }),
        Opcode::And => Ok(Instruction::And {
            rd: register_operand(operands[0])?,
            rn: register_operand(operands[1])?,
            rm: register_operand(operands[2])?,
        }),
        Opcode::Not => Ok(Instruction::Not {
            rd: register_operand(operands[0])?,
            rn: register_operand(operands[1])?,
        }),
        Opcode::Bnz => {
            let name = operands[0];
            let address = labels.resolve(name)?;
            if address > MAX_BRANCH_TARGET {
                return Err(EncodeError::BranchTargetOutOfRange {
                    name: name.into(),
                    address,
                });
            }
            Ok(Instruction::Bnz { target: address })
        }
    }
}

/// Encodes one trimmed instruction text straight to its packed byte.
///
/// # Errors
///
/// Same failure modes as [`encode_line`].
pub fn encode_line_to_byte(text: &str, labels: &LabelTable) -> Result<u8, EncodeError> {
    encode_line(text, labels).map(encode)
}

fn register_operand(token: &str) -> Result<Reg, EncodeError> {
    resolve_register(token).ok_or_else(|| EncodeError::InvalidRegister(token.into()))
}
