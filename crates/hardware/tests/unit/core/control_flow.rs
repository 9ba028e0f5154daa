//! # Control Flow Tests
//!
//! Branch targets are relative to the following instruction (`pc + 4 + imm`).
//! Conditional branches test the flags left by the most recent `cmpl`; `call`
//! pushes the return address and `ret` pops it, halting the machine when no
//! call frame is active.

use mini86_core::common::SimError;
use mini86_core::sim::ExitStatus;
use rstest::rstest;

use crate::common::builder::instruction::{InstructionBuilder, inst};
use crate::common::harness::TestContext;

/// Runs `cmpl %eax, %ecx; <branch> +4; movl $1, %edx` and reports whether the
/// branch skipped the final move.
fn branch_taken(branch: fn(InstructionBuilder, i16) -> InstructionBuilder, a: i32, b: i32) -> bool {
    let mut ctx = TestContext::new(vec![
        inst().cmpl(0, 1),
        branch(inst(), 4),
        inst().movl_imm(2, 1),
    ]);
    ctx.set_reg(0, a);
    ctx.set_reg(1, b);
    assert_eq!(ctx.run_ok(), ExitStatus::EndOfProgram);
    ctx.reg(2) == 0
}

#[rstest]
#[case(7, 7, true)]
#[case(7, 8, false)]
#[case(-3, -3, true)]
fn je(#[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(branch_taken(InstructionBuilder::je, a, b), taken);
}

#[rstest]
#[case(5, 3, true)]
#[case(3, 5, false)]
#[case(5, 5, false)]
#[case(1, i32::MIN, true)]
fn jl(#[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(branch_taken(InstructionBuilder::jl, a, b), taken);
}

#[rstest]
#[case(5, 5, true)]
#[case(5, 3, true)]
#[case(3, 5, false)]
fn jle(#[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(branch_taken(InstructionBuilder::jle, a, b), taken);
}

#[rstest]
#[case(3, 5, true)]
#[case(5, 5, true)]
#[case(5, 3, false)]
#[case(-1, i32::MAX, true)]
fn jge(#[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(branch_taken(InstructionBuilder::jge, a, b), taken);
}

#[rstest]
#[case(5, 3, true)]
#[case(5, 5, true)]
#[case(3, 5, false)]
#[case(-1, 0, true)]
#[case(0, -1, false)]
fn jbe(#[case] a: i32, #[case] b: i32, #[case] taken: bool) {
    assert_eq!(branch_taken(InstructionBuilder::jbe, a, b), taken);
}

#[test]
fn branch_before_any_compare_uses_clear_flags() {
    // Only jge is taken with CF, ZF, SF, and OF all clear.
    assert!(!branch_taken_without_compare(InstructionBuilder::je));
    assert!(!branch_taken_without_compare(InstructionBuilder::jl));
    assert!(!branch_taken_without_compare(InstructionBuilder::jle));
    assert!(branch_taken_without_compare(InstructionBuilder::jge));
    assert!(!branch_taken_without_compare(InstructionBuilder::jbe));
}

fn branch_taken_without_compare(branch: fn(InstructionBuilder, i16) -> InstructionBuilder) -> bool {
    let mut ctx = TestContext::new(vec![branch(inst(), 4), inst().movl_imm(2, 1)]);
    let _ = ctx.run_ok();
    ctx.reg(2) == 0
}

#[test]
fn jmp_zero_falls_through() {
    let mut ctx = TestContext::new(vec![inst().jmp(0), inst().movl_imm(0, 3)]);
    ctx.step_n(1);
    assert_eq!(ctx.pc(), 4);
}

#[test]
fn jmp_backwards_loops() {
    // Counts r0 down from 3 to 0; the loop body runs three times.
    let mut ctx = TestContext::new(vec![
        inst().movl_imm(0, 3),  // 0
        inst().movl_imm(1, 0),  // 4
        inst().movl_imm(2, 0),  // 8
        inst().cmpl(2, 0),      // 12: flags from r0 - r2
        inst().jle(12),         // 16: r0 <= 0 -> 32
        inst().addl_imm(1, 1),  // 20
        inst().subl(0, 1),      // 24
        inst().jmp(-20),        // 28: -> 12
        inst().printr(1),       // 32
    ]);
    assert_eq!(ctx.run_ok(), ExitStatus::EndOfProgram);
    assert_eq!(ctx.reg(0), 0);
    assert_eq!(ctx.reg(1), 3);
    assert_eq!(ctx.output(), "3 (0x3)\n");
}

#[test]
fn jump_to_end_of_program_finishes() {
    let mut ctx = TestContext::new(vec![inst().jmp(4), inst().movl_imm(0, 1)]);
    assert_eq!(ctx.run_ok(), ExitStatus::EndOfProgram);
    assert_eq!(ctx.reg(0), 0);
}

#[test]
fn jump_past_end_is_an_error() {
    let mut ctx = TestContext::new(vec![inst().jmp(8), inst().movl_imm(0, 1)]);
    match ctx.run() {
        Err(SimError::PcOutOfRange { pc, len }) => {
            assert_eq!(pc, 12);
            assert_eq!(len, 2);
        }
        other => panic!("expected pc out of range, got {other:?}"),
    }
}

#[test]
fn jump_before_start_is_an_error() {
    let mut ctx = TestContext::new(vec![inst().jmp(-8)]);
    assert!(matches!(ctx.run(), Err(SimError::PcOutOfRange { .. })));
}

#[test]
fn misaligned_jump_is_an_error() {
    let mut ctx = TestContext::new(vec![inst().jmp(2), inst().ret(), inst().ret()]);
    match ctx.run() {
        Err(SimError::PcOutOfRange { pc, .. }) => assert_eq!(pc, 6),
        other => panic!("expected pc out of range, got {other:?}"),
    }
}

#[test]
fn call_pushes_return_address() {
    let mut ctx = TestContext::new(vec![
        inst().call(4),        // 0: -> 8
        inst().ret(),          // 4
        inst().movl_imm(0, 1), // 8
    ]);
    ctx.step_n(1);
    assert_eq!(ctx.pc(), 8);
    assert_eq!(ctx.sp(), 1020);
    assert_eq!(ctx.sim.cpu.memory.read_u32(1020), Ok(4));
}

#[test]
fn call_and_return() {
    let mut ctx = TestContext::new(vec![
        inst().movl_imm(0, 1),  // 0
        inst().call(8),         // 4: -> 16, pushes 8
        inst().movl_imm(3, 42), // 8
        inst().ret(),           // 12: top level, halts
        inst().movl_imm(1, 7),  // 16
        inst().addl_imm(1, 1),  // 20
        inst().ret(),           // 24: back to 8
    ]);
    assert_eq!(ctx.run_ok(), ExitStatus::Halted);
    assert_eq!(ctx.reg(0), 1);
    assert_eq!(ctx.reg(1), 8);
    assert_eq!(ctx.reg(3), 42);
    assert_eq!(ctx.sp(), 1024);
    assert_eq!(ctx.pc(), 12);
}

#[test]
fn nested_calls_unwind_in_order() {
    let mut ctx = TestContext::new(vec![
        inst().call(8),         // 0: -> 12
        inst().printr(0),       // 4
        inst().ret(),           // 8: halt
        inst().call(8),         // 12: -> 24
        inst().addl_imm(0, 10), // 16
        inst().ret(),           // 20: -> 4
        inst().addl_imm(0, 1),  // 24
        inst().ret(),           // 28: -> 16
    ]);
    assert_eq!(ctx.run_ok(), ExitStatus::Halted);
    assert_eq!(ctx.output(), "11 (0xb)\n");
    assert_eq!(ctx.sp(), 1024);
    assert_eq!(ctx.sim.cpu.stats.peak_stack_depth, 8);
}

#[test]
fn ret_at_top_level_halts_immediately() {
    let mut ctx = TestContext::new(vec![inst().ret(), inst().movl_imm(0, 1)]);
    assert_eq!(ctx.run_ok(), ExitStatus::Halted);
    assert_eq!(ctx.reg(0), 0);
}

#[test]
fn recursion_past_stack_bottom_faults() {
    let mut ctx = TestContext::new(vec![inst().call(-4)]);
    match ctx.run() {
        Err(SimError::Memory { pc, .. }) => assert_eq!(pc, 0),
        other => panic!("expected memory fault, got {other:?}"),
    }
    // 256 frames fill the 1024-byte region; the 257th call faults without
    // moving SP.
    assert_eq!(ctx.sp(), 0);
    assert_eq!(ctx.sim.cpu.stats.peak_stack_depth, 1024);
    assert_eq!(ctx.sim.cpu.stats.inst_call_ret, 256);
}

#[test]
fn ret_with_moved_stack_pointer_pops_whatever_is_there() {
    // Moving SP by hand makes ret treat memory as a return address.
    let mut ctx = TestContext::new(vec![
        inst().movl_imm(0, 12), // 0
        inst().store(0, -4, 6), // 4: mem[1020] = 12
        inst().subl(6, 4),      // 8: sp = 1020
        inst().ret(),           // 12
        inst().printr(0),       // 16
    ]);
    // First ret pops 12 and resumes at itself; with SP back at the top the
    // second execution halts.
    assert_eq!(ctx.run_ok(), ExitStatus::Halted);
    assert_eq!(ctx.sp(), 1024);
    assert!(ctx.output().is_empty());
}
