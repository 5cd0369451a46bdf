//! ISA conformance suite: codec round-trips, ALU semantics over the full
//! 8-bit domain, flag behavior, and the two program-counter invariants.

use proptest::prelude::*;
use rstest::rstest;

#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use fisc_core::{
    decode, disassemble, encode, run, step, CycleObservation, Instruction, MachineState, Reg,
    RunError, TraceSink,
};

fn instruction_strategy() -> impl Strategy<Value = Instruction> {
    let reg = (0u8..4).prop_map(|bits| Reg::from_u2(bits).unwrap());
    prop_oneof![
        (reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(rd, rn, rm)| Instruction::Add { rd, rn, rm }),
        (reg.clone(), reg.clone(), reg.clone())
            .prop_map(|(rd, rn, rm)| Instruction::And { rd, rn, rm }),
        (reg.clone(), reg).prop_map(|(rd, rn)| Instruction::Not { rd, rn }),
        (0u8..64).prop_map(|target| Instruction::Bnz { target }),
    ]
}

#[derive(Default)]
struct RecordingSink {
    observations: Vec<CycleObservation>,
}

impl TraceSink for RecordingSink {
    fn on_cycle(&mut self, observation: &CycleObservation) {
        self.observations.push(*observation);
    }
}

proptest! {
    #[test]
    fn property_decode_inverts_encode_field_for_field(instruction in instruction_strategy()) {
        prop_assert_eq!(decode(encode(instruction)), instruction);
    }

    #[test]
    fn property_every_byte_decodes_and_reencodes_canonically(byte in any::<u8>()) {
        // Re-encoding is byte-identical except for NOT, whose unused
        // source-2 bits are canonicalized to zero.
        let reencoded = encode(decode(byte));
        match decode(byte) {
            Instruction::Not { .. } => prop_assert_eq!(reencoded, byte & 0b1111_0011),
            _ => prop_assert_eq!(reencoded, byte),
        }
    }

    #[test]
    fn property_add_matches_native_wrapping_addition(a in any::<u8>(), b in any::<u8>()) {
        let mut state = MachineState::default();
        state.set_gpr(Reg::R1, a);
        state.set_gpr(Reg::R2, b);

        step(&mut state, Instruction::Add { rd: Reg::R0, rn: Reg::R1, rm: Reg::R2 });

        prop_assert_eq!(state.gpr(Reg::R0), a.wrapping_add(b));
        prop_assert_eq!(state.zero_flag(), a.wrapping_add(b) == 0);
    }

    #[test]
    fn property_and_matches_native_bitwise_and(a in any::<u8>(), b in any::<u8>()) {
        let mut state = MachineState::default();
        state.set_gpr(Reg::R1, a);
        state.set_gpr(Reg::R2, b);

        step(&mut state, Instruction::And { rd: Reg::R0, rn: Reg::R1, rm: Reg::R2 });

        prop_assert_eq!(state.gpr(Reg::R0), a & b);
        prop_assert_eq!(state.zero_flag(), (a & b) == 0);
    }

    #[test]
    fn property_not_is_bitwise_complement(a in any::<u8>()) {
        let mut state = MachineState::default();
        state.set_gpr(Reg::R1, a);

        step(&mut state, Instruction::Not { rd: Reg::R0, rn: Reg::R1 });

        prop_assert_eq!(state.gpr(Reg::R0), 255 - a);
        prop_assert_eq!(state.zero_flag(), a == 0xFF);
    }

    #[test]
    fn property_bnz_taken_iff_zero_flag_clear(zero in any::<bool>(), pc in 0u8..62, target in 0u8..63) {
        let mut state = MachineState::default();
        state.set_pc(pc);
        state.set_zero_flag(zero);

        step(&mut state, Instruction::Bnz { target });

        let expected = if zero { pc + 1 } else { target };
        prop_assert_eq!(state.pc(), expected);
        prop_assert_eq!(state.zero_flag(), zero);
    }

    #[test]
    fn property_pc_never_rests_on_63(instruction in instruction_strategy(), pc in 0u8..63, zero in any::<bool>()) {
        let mut state = MachineState::default();
        state.set_pc(pc);
        state.set_zero_flag(zero);

        step(&mut state, instruction);

        prop_assert_ne!(state.pc(), 63);
    }

    #[test]
    fn property_disassembly_names_the_executed_opcode(instruction in instruction_strategy()) {
        let text = disassemble(instruction);
        prop_assert!(text.starts_with(instruction.opcode().mnemonic()));
    }
}

#[rstest]
#[case::add(Instruction::Add { rd: Reg::R0, rn: Reg::R1, rm: Reg::R2 })]
#[case::and(Instruction::And { rd: Reg::R0, rn: Reg::R1, rm: Reg::R2 })]
#[case::not(Instruction::Not { rd: Reg::R0, rn: Reg::R1 })]
fn alu_ops_set_zero_flag_exactly_when_destination_is_zero(#[case] instruction: Instruction) {
    // All sources zero: ADD and AND produce 0, NOT produces 0xFF.
    let mut state = MachineState::default();
    step(&mut state, instruction);

    let expects_zero = !matches!(instruction, Instruction::Not { .. });
    assert_eq!(state.zero_flag(), expects_zero);
    assert_eq!(state.gpr(Reg::R0) == 0, expects_zero);
}

#[rstest]
#[case::sequential_increment(62, Instruction::Add { rd: Reg::R0, rn: Reg::R0, rm: Reg::R0 })]
#[case::branch_target(0, Instruction::Bnz { target: 63 })]
fn pc_forced_to_zero_when_step_lands_on_63(#[case] start_pc: u8, #[case] instruction: Instruction) {
    let mut state = MachineState::default();
    state.set_pc(start_pc);

    step(&mut state, instruction);

    assert_eq!(state.pc(), 0);
}

#[test]
fn end_to_end_not_and_not_sequence() {
    // not r0 r1 / and r0 r0 r1 / not r1 r0, three cycles from a zeroed
    // machine: R0 ends 0x00, R1 ends 0xFF.
    let program = [
        Instruction::Not {
            rd: Reg::R0,
            rn: Reg::R1,
        },
        Instruction::And {
            rd: Reg::R0,
            rn: Reg::R0,
            rm: Reg::R1,
        },
        Instruction::Not {
            rd: Reg::R1,
            rn: Reg::R0,
        },
    ];
    let mut state = MachineState::default();
    let mut sink = RecordingSink::default();

    run(&mut state, &program, 3, &mut sink).unwrap();

    assert_eq!(state.gpr(Reg::R0), 0x00);
    assert_eq!(state.gpr(Reg::R1), 0xFF);
    assert_eq!(sink.observations.len(), 3);
    assert!(!state.zero_flag());
}

#[test]
fn end_to_end_self_branch_holds_pc_at_zero() {
    let program = [Instruction::Bnz { target: 0 }];
    let mut state = MachineState::default();
    let mut sink = RecordingSink::default();

    run(&mut state, &program, 1, &mut sink).unwrap();

    assert_eq!(state.pc(), 0);
    assert_eq!(
        sink.observations[0],
        CycleObservation {
            cycle: 1,
            pc: 0,
            zero_flag: false,
            gprs: [0, 0, 0, 0],
            instruction: program[0],
        }
    );
}

#[test]
fn end_to_end_overrun_after_straight_line_program_ends() {
    let program = [
        Instruction::Add {
            rd: Reg::R0,
            rn: Reg::R0,
            rm: Reg::R0,
        },
        Instruction::Add {
            rd: Reg::R1,
            rn: Reg::R1,
            rm: Reg::R1,
        },
    ];
    let mut state = MachineState::default();
    let mut sink = RecordingSink::default();

    let err = run(&mut state, &program, 25, &mut sink).unwrap_err();

    assert_eq!(err, RunError::ProgramOverrun { pc: 2, loaded: 2 });
    assert_eq!(sink.observations.len(), 2);
}
