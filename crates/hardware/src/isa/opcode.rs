//! Opcode table.
//!
//! The machine has a closed set of 22 operations identified by the 5-bit opcode
//! field. Values 22-31 are unassigned. The numeric assignment below is fixed by
//! the binaries the interpreter must run and may not be reordered.

use std::fmt;

/// Every operation the machine can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Opcode {
    /// `reg1 -= imm`
    Subl = 0,
    /// `reg2 += reg1`
    AddlRegReg = 1,
    /// `reg1 += imm`
    AddlImmReg = 2,
    /// `reg2 *= reg1`
    Imull = 3,
    /// `reg1 = (reg1 as u32) >> 1`
    Shrl = 4,
    /// `reg2 = reg1`
    MovlRegReg = 5,
    /// `reg2 = mem[reg1 + imm]`
    MovlDerefReg = 6,
    /// `mem[reg2 + imm] = reg1`
    MovlRegDeref = 7,
    /// `reg1 = imm`
    MovlImmReg = 8,
    /// `flags = compare(reg2 - reg1)`
    Cmpl = 9,
    /// Branch if equal (ZF).
    Je = 10,
    /// Branch if less (SF xor OF).
    Jl = 11,
    /// Branch if less or equal ((SF xor OF) or ZF).
    Jle = 12,
    /// Branch if greater or equal (not (SF xor OF)).
    Jge = 13,
    /// Branch if below or equal, unsigned (CF or ZF).
    Jbe = 14,
    /// Unconditional relative jump.
    Jmp = 15,
    /// Push the return address and jump.
    Call = 16,
    /// Pop the return address, or halt at the top level.
    Ret = 17,
    /// Push `reg1`.
    Pushl = 18,
    /// Pop into `reg1`.
    Popl = 19,
    /// Print `reg1` to the console.
    Printr = 20,
    /// Read an integer from the console into `reg1`.
    Readr = 21,
}

impl Opcode {
    /// All opcodes in numeric order.
    pub const ALL: [Self; 22] = [
        Self::Subl,
        Self::AddlRegReg,
        Self::AddlImmReg,
        Self::Imull,
        Self::Shrl,
        Self::MovlRegReg,
        Self::MovlDerefReg,
        Self::MovlRegDeref,
        Self::MovlImmReg,
        Self::Cmpl,
        Self::Je,
        Self::Jl,
        Self::Jle,
        Self::Jge,
        Self::Jbe,
        Self::Jmp,
        Self::Call,
        Self::Ret,
        Self::Pushl,
        Self::Popl,
        Self::Printr,
        Self::Readr,
    ];

    /// Returns the assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Subl => "subl",
            Self::AddlRegReg | Self::AddlImmReg => "addl",
            Self::Imull => "imull",
            Self::Shrl => "shrl",
            Self::MovlRegReg | Self::MovlDerefReg | Self::MovlRegDeref | Self::MovlImmReg => {
                "movl"
            }
            Self::Cmpl => "cmpl",
            Self::Je => "je",
            Self::Jl => "jl",
            Self::Jle => "jle",
            Self::Jge => "jge",
            Self::Jbe => "jbe",
            Self::Jmp => "jmp",
            Self::Call => "call",
            Self::Ret => "ret",
            Self::Pushl => "pushl",
            Self::Popl => "popl",
            Self::Printr => "printr",
            Self::Readr => "readr",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    /// Maps a raw opcode field onto the table, returning the raw value if unassigned.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(value)).copied().ok_or(value)
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op as Self
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
