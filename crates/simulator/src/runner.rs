//! Cycle runner and per-cycle state rendering.
//!
//! Bridges the engine's trace-sink interface to text output: one state line
//! per executed cycle, with an optional disassembly line after each.

use std::io::Write;

use fisc_core::{
    disassemble, run, CycleObservation, Instruction, MachineState, RunError, TraceSink,
};

/// Formats one observation as a state line.
///
/// Cycle number is decimal; the program counter and registers are 2-digit
/// uppercase hex; the zero flag prints as 0 or 1.
#[must_use]
pub fn format_state_line(observation: &CycleObservation) -> String {
    format!(
        "Cycle:{} State:PC:{:02X} Z:{} R0: {:02X} R1: {:02X} R2: {:02X} R3: {:02X}",
        observation.cycle,
        observation.pc,
        u8::from(observation.zero_flag),
        observation.gprs[0],
        observation.gprs[1],
        observation.gprs[2],
        observation.gprs[3],
    )
}

/// Trace sink that streams state lines (and optionally disassembly) to a
/// writer. Write failures are swallowed; observation output never feeds back
/// into execution.
pub struct StatePrinter<W: Write> {
    out: W,
    disassembly: bool,
}

impl<W: Write> StatePrinter<W> {
    /// Creates a printer over `out`, optionally emitting disassembly lines.
    #[must_use]
    pub const fn new(out: W, disassembly: bool) -> Self {
        Self { out, disassembly }
    }
}

impl<W: Write> TraceSink for StatePrinter<W> {
    fn on_cycle(&mut self, observation: &CycleObservation) {
        let _ = writeln!(self.out, "{}", format_state_line(observation));
        if self.disassembly {
            let _ = writeln!(
                self.out,
                "Disassembly: {}",
                disassemble(observation.instruction)
            );
            let _ = writeln!(self.out);
        }
    }
}

/// Runs a loaded program for `cycles` steps against a fresh machine,
/// streaming observation output to `out`.
///
/// # Errors
///
/// Returns [`RunError::ProgramOverrun`] when the program counter leaves the
/// loaded program early; state lines for completed cycles have already been
/// written by then.
pub fn run_program<W: Write>(
    program: &[Instruction],
    cycles: u32,
    disassembly: bool,
    out: W,
) -> Result<(), RunError> {
    let mut state = MachineState::default();
    let mut printer = StatePrinter::new(out, disassembly);
    run(&mut state, program, cycles, &mut printer)
}
