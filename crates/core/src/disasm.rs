//! Instruction disassembly.
//!
//! Renders a decoded instruction back to mnemonic text. Branch targets come
//! out as plain decimal addresses: label names are not recoverable from a
//! packed byte.

use crate::codec::Instruction;
use crate::isa::Reg;

/// Renders one decoded instruction as mnemonic text.
///
/// Three-operand forms print destination first, then sources, matching the
/// assembler's source order: `add r3 r0 r0`, `not r0 r1`, `bnz 5`.
#[must_use]
pub fn disassemble(instruction: Instruction) -> String {
    let mnemonic = instruction.opcode().mnemonic();
    match instruction {
        Instruction::Add { rd, rn, rm } | Instruction::And { rd, rn, rm } => {
            format!(
                "{mnemonic} {} {} {}",
                register_name(rd),
                register_name(rn),
                register_name(rm)
            )
        }
        Instruction::Not { rd, rn } => {
            format!("{mnemonic} {} {}", register_name(rd), register_name(rn))
        }
        Instruction::Bnz { target } => format!("{mnemonic} {target}"),
    }
}

const fn register_name(reg: Reg) -> &'static str {
    match reg {
        Reg::R0 => "r0",
        Reg::R1 => "r1",
        Reg::R2 => "r2",
        Reg::R3 => "r3",
    }
}
