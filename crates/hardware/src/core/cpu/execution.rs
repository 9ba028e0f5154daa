//! Instruction Execution.
//!
//! This module implements the effect of a single instruction on the CPU state. It performs the following:
//! 1. **Dispatch:** Maps the opcode field onto the closed opcode table, applying the
//!    unknown-opcode policy for unassigned values.
//! 2. **Data Path:** Register arithmetic, moves, and memory loads/stores.
//! 3. **Condition Codes:** `cmpl` recomputes all four flags; nothing else touches them.
//! 4. **Control Flow:** Branches, `call`, and `ret`, including the top-level halt.
//! 5. **I/O:** `printr` and `readr` through the attached console.
//!
//! Branch, jump, and call displacements are relative to the following instruction:
//! a taken transfer lands on `pc + 4 + imm`.

use tracing::{debug, warn};

use super::Cpu;
use crate::common::constants::{SP_INDEX, WORD_BYTES};
use crate::common::error::{DecodeError, SimError};
use crate::config::UnknownOpcodePolicy;
use crate::core::arch::Flags;
use crate::isa::{Instruction, Opcode};
use crate::soc::Console;

/// Outcome of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Continue at the given program counter.
    Next(u32),
    /// A `ret` executed with no active call frame; the program finished.
    Halt,
}

impl<C: Console> Cpu<C> {
    /// Executes `inst` as the instruction at the current PC.
    ///
    /// The PC itself is not modified; the caller installs the returned value.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] for strict-mode unknown opcodes, invalid or reserved
    /// register operands, out-of-range memory accesses, and console failures.
    pub fn execute(&mut self, inst: &Instruction) -> Result<Step, SimError> {
        let pc = self.pc;
        let next = pc.wrapping_add(WORD_BYTES as u32);

        let op = match inst.operation() {
            Ok(op) => op,
            Err(opcode) => {
                return match self.unknown_opcode {
                    UnknownOpcodePolicy::Strict => {
                        Err(DecodeError::UnknownOpcode { opcode, pc }.into())
                    }
                    UnknownOpcodePolicy::Lenient => {
                        warn!(opcode, pc, "skipping unknown opcode");
                        self.stats.record_unknown();
                        Ok(Step::Next(next))
                    }
                };
            }
        };
        let step = self.dispatch(op, inst)?;
        self.stats.record(op);
        Ok(step)
    }

    /// Applies a known operation without touching the instruction counters.
    fn dispatch(&mut self, op: Opcode, inst: &Instruction) -> Result<Step, SimError> {
        let pc = self.pc;
        let next = pc.wrapping_add(WORD_BYTES as u32);
        let r1 = inst.first_register;
        let r2 = inst.second_register;
        let imm = inst.immediate;
        let target = next.wrapping_add(imm as u32);

        match op {
            Opcode::Subl => {
                let v = self.reg(r1)?;
                self.set_reg(r1, v.wrapping_sub(imm))?;
            }
            Opcode::AddlRegReg => {
                let v = self.reg(r1)?.wrapping_add(self.reg(r2)?);
                self.set_reg(r2, v)?;
            }
            Opcode::AddlImmReg => {
                let v = self.reg(r1)?;
                self.set_reg(r1, v.wrapping_add(imm))?;
            }
            Opcode::Imull => {
                let v = self.reg(r1)?.wrapping_mul(self.reg(r2)?);
                self.set_reg(r2, v)?;
            }
            Opcode::Shrl => {
                let v = self.reg(r1)? as u32 >> 1;
                self.set_reg(r1, v as i32)?;
            }
            Opcode::MovlRegReg => {
                let v = self.reg(r1)?;
                self.set_reg(r2, v)?;
            }
            Opcode::MovlDerefReg => {
                let addr = i64::from(self.reg(r1)?) + i64::from(imm);
                let v = self.load(addr)?;
                self.set_reg(r2, v)?;
            }
            Opcode::MovlRegDeref => {
                let addr = i64::from(self.reg(r2)?) + i64::from(imm);
                let v = self.reg(r1)?;
                self.store(addr, v)?;
            }
            Opcode::MovlImmReg => self.set_reg(r1, imm)?,
            Opcode::Cmpl => {
                let flags = Flags::compare(self.reg(r1)?, self.reg(r2)?);
                self.regs.set_flags(flags);
            }
            Opcode::Je => return Ok(self.branch(self.regs.flags().equal(), next, target)),
            Opcode::Jl => return Ok(self.branch(self.regs.flags().less(), next, target)),
            Opcode::Jle => {
                return Ok(self.branch(self.regs.flags().less_or_equal(), next, target));
            }
            Opcode::Jge => {
                return Ok(self.branch(self.regs.flags().greater_or_equal(), next, target));
            }
            Opcode::Jbe => {
                return Ok(self.branch(self.regs.flags().below_or_equal(), next, target));
            }
            Opcode::Jmp => return Ok(self.branch(true, next, target)),
            Opcode::Call => {
                self.push(next as i32)?;
                debug!(pc, target, return_to = next, "call");
                return Ok(Step::Next(target));
            }
            Opcode::Ret => {
                if self.at_stack_top() {
                    debug!(pc, "top-level return");
                    return Ok(Step::Halt);
                }
                let return_to = self.load(self.sp_addr())? as u32;
                self.release_slot();
                debug!(pc, return_to, "ret");
                return Ok(Step::Next(return_to));
            }
            Opcode::Pushl => {
                // `pushl %esp` stores the decremented stack pointer.
                let v = if usize::from(r1) == SP_INDEX {
                    self.pushed_sp()
                } else {
                    self.reg(r1)?
                };
                self.push(v)?;
            }
            Opcode::Popl => {
                let v = self.load(self.sp_addr())?;
                self.set_reg(r1, v)?;
                self.release_slot();
            }
            Opcode::Printr => {
                let v = self.reg(r1)?;
                self.console
                    .write_line(&format!("{v} (0x{:x})", v as u32))
                    .map_err(SimError::Output)?;
            }
            Opcode::Readr => {
                let v = self.read_integer()?;
                self.set_reg(r1, v)?;
            }
        }

        Ok(Step::Next(next))
    }

    /// Resolves a branch and records its outcome.
    fn branch(&mut self, taken: bool, next: u32, target: u32) -> Step {
        self.stats.record_branch(taken);
        Step::Next(if taken { target } else { next })
    }

    /// Reads one decimal integer token from the console.
    fn read_integer(&mut self) -> Result<i32, SimError> {
        let token = self
            .console
            .next_token()
            .map_err(|e| SimError::Input(e.to_string()))?
            .ok_or_else(|| SimError::Input("end of input".to_string()))?;
        token
            .parse::<i32>()
            .map_err(|e| SimError::Input(format!("'{token}' is not a 32-bit integer: {e}")))
    }
}
