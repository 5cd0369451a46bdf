//! Architectural register and opcode identifiers for the FISC ISA.

/// Number of architecturally visible general-purpose registers (`R0..R3`).
pub const GENERAL_REGISTER_COUNT: usize = 4;

/// Number of addressable program slots (6-bit branch target space).
pub const PROGRAM_SLOTS: usize = 64;

/// Maximum encodable branch target address.
pub const MAX_BRANCH_TARGET: u8 = 63;

/// Architecturally visible general-purpose register identifier.
///
/// The register space and the opcode space both happen to span `{0,1,2,3}`;
/// they are kept as two separate enumerations so a register field can never
/// stand in for an opcode field or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Reg {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Reg {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [Self::R0, Self::R1, Self::R2, Self::R3];

    /// Returns the array index for this register (`0..=3`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the 2-bit field value for this register.
    #[must_use]
    pub const fn as_u2(self) -> u8 {
        self as u8
    }

    /// Decodes a 2-bit register field into an architectural register.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            _ => None,
        }
    }
}

/// Operation selector occupying bits 7-6 of a packed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Opcode {
    Add = 0,
    And = 1,
    Not = 2,
    Bnz = 3,
}

impl Opcode {
    /// Ordered list of all assigned opcodes.
    pub const ALL: [Self; 4] = [Self::Add, Self::And, Self::Not, Self::Bnz];

    /// Returns the 2-bit field value for this opcode.
    #[must_use]
    pub const fn as_u2(self) -> u8 {
        self as u8
    }

    /// Decodes a 2-bit opcode field into an assigned opcode.
    ///
    /// The 2-bit field covers the full opcode space, so every in-range value
    /// maps to an opcode; only values above 3 are rejected.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Add),
            1 => Some(Self::And),
            2 => Some(Self::Not),
            3 => Some(Self::Bnz),
            _ => None,
        }
    }

    /// Canonical lower-case mnemonic for this opcode.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::And => "and",
            Self::Not => "not",
            Self::Bnz => "bnz",
        }
    }
}
