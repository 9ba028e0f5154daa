//! Condition Flags.
//!
//! This module models the four condition codes of the machine as named booleans
//! rather than loose bits in a register. It provides:
//! 1. **Comparison:** `Flags::compare` computes a fresh flag set from two operands.
//! 2. **Conditions:** Predicates for each conditional branch.
//! 3. **Packing:** Conversion to the x86 `EFLAGS` bit layout
//!    (CF = bit 0, ZF = bit 6, SF = bit 7, OF = bit 11), used when register 16 is
//!    read as an operand.

use std::fmt;

use crate::common::constants::{CF_BIT, OF_BIT, SF_BIT, ZF_BIT};

/// Condition flags produced by the most recent comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Carry: the first operand was greater than the second, compared unsigned.
    pub carry: bool,
    /// Zero: the difference was zero.
    pub zero: bool,
    /// Sign: bit 31 of the difference was set.
    pub sign: bool,
    /// Overflow: the difference did not fit in a signed 32-bit word.
    pub overflow: bool,
}

impl Flags {
    /// Computes the flags for `cmpl first, second`, which reflect `second - first`.
    ///
    /// The subtraction is performed in 64 bits so that signed overflow can be
    /// detected by range rather than by inspecting operand signs.
    ///
    /// # Arguments
    ///
    /// * `first` - Value of the first register operand (the subtrahend).
    /// * `second` - Value of the second register operand (the minuend).
    pub const fn compare(first: i32, second: i32) -> Self {
        let wide = second as i64 - first as i64;
        Self {
            carry: (first as u32) > (second as u32),
            zero: wide == 0,
            sign: wide & 0x8000_0000 != 0,
            overflow: wide > i32::MAX as i64 || wide < i32::MIN as i64,
        }
    }

    /// `je`: equal.
    pub const fn equal(self) -> bool {
        self.zero
    }

    /// `jl`: signed less than.
    pub const fn less(self) -> bool {
        self.sign ^ self.overflow
    }

    /// `jle`: signed less than or equal.
    pub const fn less_or_equal(self) -> bool {
        self.less() || self.zero
    }

    /// `jge`: signed greater than or equal.
    pub const fn greater_or_equal(self) -> bool {
        !self.less()
    }

    /// `jbe`: unsigned below or equal.
    pub const fn below_or_equal(self) -> bool {
        self.carry || self.zero
    }

    /// Packs the flags into the `EFLAGS` bit layout.
    pub const fn bits(self) -> u32 {
        (self.carry as u32) << CF_BIT
            | (self.zero as u32) << ZF_BIT
            | (self.sign as u32) << SF_BIT
            | (self.overflow as u32) << OF_BIT
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |set: bool, name: &'static str| if set { name } else { "--" };
        write!(
            f,
            "[{} {} {} {}]",
            mark(self.carry, "CF"),
            mark(self.zero, "ZF"),
            mark(self.sign, "SF"),
            mark(self.overflow, "OF")
        )
    }
}
