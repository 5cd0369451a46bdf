//! Core crate for the FISC toolchain.
//!
//! Holds the contract shared by the assembler and the simulator: the ISA
//! identifiers, the packed-byte codec, the object-file text format, the
//! machine state, the execution engine, and the disassembler.

/// Architectural register and opcode identifiers.
pub mod isa;
pub use isa::{Opcode, Reg, GENERAL_REGISTER_COUNT, MAX_BRANCH_TARGET, PROGRAM_SLOTS};

/// Packed-byte instruction codec.
pub mod codec;
pub use codec::{decode, encode, Instruction};

/// Object-file text format.
pub mod object;
pub use object::{ObjectFormatError, OBJECT_MARKER};

/// Architectural machine state.
pub mod state;
pub use state::MachineState;

/// Fetch-decode-execute engine.
pub mod execute;
pub use execute::{run, step, CycleObservation, RunError, TraceSink, DEFAULT_CYCLE_BUDGET};

/// Instruction disassembly.
pub mod disasm;
pub use disasm::disassemble;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
