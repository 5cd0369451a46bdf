//! Fetch-decode-execute engine for the FISC register machine.
//!
//! One step fetches the instruction at the current program counter, executes
//! it, then applies the post-step wraparound rule. Two related but distinct
//! invariants are enforced in sequence after each step:
//!
//! 1. a program counter equal to the last addressable slot (63) is forced to
//!    0, a property of the fixed 64-slot program space, independent of the
//!    instruction that produced it;
//! 2. a program counter at or beyond the *loaded* instruction count (which
//!    may be smaller than 64) fails the run before the next fetch.

use thiserror::Error;

use crate::codec::Instruction;
use crate::isa::{Reg, MAX_BRANCH_TARGET};
use crate::state::MachineState;

/// Number of steps a run executes when the caller does not specify a budget.
pub const DEFAULT_CYCLE_BUDGET: u32 = 20;

/// Errors that terminate a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunError {
    /// Program counter left the loaded program before the step budget was
    /// exhausted. Cycles completed before this point keep their effects and
    /// their emitted observations.
    #[error("program counter 0x{pc:02X} is outside the loaded program ({loaded} instructions)")]
    ProgramOverrun {
        /// Program counter at the failed fetch.
        pc: u8,
        /// Number of instructions actually loaded.
        loaded: usize,
    },
}

/// Snapshot of machine state emitted after each successfully executed step.
///
/// Observability only: nothing here feeds back into execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CycleObservation {
    /// 1-based index of the completed step.
    pub cycle: u32,
    /// Program counter after the step (wraparound already applied).
    pub pc: u8,
    /// Zero flag after the step.
    pub zero_flag: bool,
    /// All four register values in `R0..R3` order.
    pub gprs: [u8; 4],
    /// The instruction that was executed.
    pub instruction: Instruction,
}

/// Sink trait for per-cycle observations.
pub trait TraceSink {
    /// Records an observation in execution order.
    fn on_cycle(&mut self, observation: &CycleObservation);
}

/// Executes a single instruction against the machine state.
///
/// Covers the execute and post-step wraparound phases only; the caller is
/// responsible for the fetch and for the overrun check against the loaded
/// program length.
pub const fn step(state: &mut MachineState, instruction: Instruction) {
    match instruction {
        Instruction::Add { rd, rn, rm } => {
            let value = state.gpr(rn).wrapping_add(state.gpr(rm));
            retire_alu(state, rd, value);
        }
        Instruction::And { rd, rn, rm } => {
            let value = state.gpr(rn) & state.gpr(rm);
            retire_alu(state, rd, value);
        }
        Instruction::Not { rd, rn } => {
            let value = !state.gpr(rn);
            retire_alu(state, rd, value);
        }
        Instruction::Bnz { target } => {
            // Taken when the most recent ALU result was non-zero. The zero
            // flag itself is never touched here.
            if state.zero_flag() {
                state.set_pc(state.pc().wrapping_add(1));
            } else {
                state.set_pc(target);
            }
        }
    }

    if state.pc() == MAX_BRANCH_TARGET {
        state.set_pc(0);
    }
}

const fn retire_alu(state: &mut MachineState, rd: Reg, value: u8) {
    state.set_gpr(rd, value);
    state.set_zero_flag(value == 0);
    state.set_pc(state.pc().wrapping_add(1));
}

/// Runs `cycles` steps of `program`, reporting each step to `sink`.
///
/// # Errors
///
/// Returns [`RunError::ProgramOverrun`] when the program counter reaches or
/// exceeds the loaded instruction count before the budget is exhausted.
/// Observations for steps completed before the failure have already been
/// delivered to the sink.
pub fn run(
    state: &mut MachineState,
    program: &[Instruction],
    cycles: u32,
    sink: &mut dyn TraceSink,
) -> Result<(), RunError> {
    for cycle in 1..=cycles {
        let pc = state.pc();
        let Some(instruction) = program.get(usize::from(pc)).copied() else {
            return Err(RunError::ProgramOverrun {
                pc,
                loaded: program.len(),
            });
        };

        step(state, instruction);

        sink.on_cycle(&CycleObservation {
            cycle,
            pc: state.pc(),
            zero_flag: state.zero_flag(),
            gprs: state.gprs(),
            instruction,
        });
    }

    Ok(())
}
