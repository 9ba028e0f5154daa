//! Instruction Disassembler.
//!
//! Renders a decoded instruction as AT&T-flavored assembly text for debug
//! tracing, the `--disassemble` listing, and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use mini86_core::isa::{Instruction, Opcode};
//! use mini86_core::isa::disasm::disassemble;
//!
//! let inst = Instruction::new(Opcode::MovlDerefReg, 6, 1, 8);
//! assert_eq!(disassemble(&inst), "movl 8(%esp), %ecx");
//! ```

use std::fmt;

use crate::common::constants::FLAGS_INDEX;
use crate::core::arch::gpr::GPR_NAMES;
use crate::isa::instruction::Instruction;
use crate::isa::opcode::Opcode;

/// Returns the display name for a register index, `%` prefix included.
fn reg(idx: u8) -> String {
    match usize::from(idx) {
        FLAGS_INDEX => "%eflags".to_string(),
        i => GPR_NAMES
            .get(i)
            .map_or_else(|| format!("%r{i}?"), |name| format!("%{name}")),
    }
}

/// Formats a PC-relative displacement with an explicit sign.
fn rel(imm: i32) -> String {
    if imm < 0 {
        format!("-{}", imm.unsigned_abs())
    } else {
        format!("+{imm}")
    }
}

/// Disassembles an instruction into a human-readable string.
///
/// Returns `.word 0x...` for instructions whose opcode is unassigned.
pub fn disassemble(inst: &Instruction) -> String {
    let Ok(op) = inst.operation() else {
        return format!(".word {:#010x}", inst.raw);
    };
    let r1 = reg(inst.first_register);
    let r2 = reg(inst.second_register);
    let imm = inst.immediate;

    match op {
        Opcode::Subl | Opcode::AddlImmReg | Opcode::MovlImmReg => format!("{op} ${imm}, {r1}"),
        Opcode::AddlRegReg | Opcode::Imull | Opcode::MovlRegReg | Opcode::Cmpl => {
            format!("{op} {r1}, {r2}")
        }
        Opcode::MovlDerefReg => format!("{op} {imm}({r1}), {r2}"),
        Opcode::MovlRegDeref => format!("{op} {r1}, {imm}({r2})"),
        Opcode::Je
        | Opcode::Jl
        | Opcode::Jle
        | Opcode::Jge
        | Opcode::Jbe
        | Opcode::Jmp
        | Opcode::Call => format!("{op} {}", rel(imm)),
        Opcode::Ret => op.to_string(),
        Opcode::Shrl | Opcode::Pushl | Opcode::Popl | Opcode::Printr | Opcode::Readr => {
            format!("{op} {r1}")
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&disassemble(self))
    }
}
