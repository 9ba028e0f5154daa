//! Stack Slot Management.
//!
//! The stack grows downward from `stack_top`. A push writes the word one slot
//! below the stack pointer and only then moves the pointer down, so a push that
//! leaves the region faults with SP and the peak depth untouched. A pop reads at
//! the current address; the caller moves the pointer up once the popped value
//! has been consumed.

use super::Cpu;
use crate::common::constants::WORD_BYTES;
use crate::common::error::SimError;
use crate::soc::Console;

const SLOT: i32 = WORD_BYTES as i32;

impl<C: Console> Cpu<C> {
    /// Current stack pointer as a memory address.
    pub(crate) fn sp_addr(&self) -> i64 {
        i64::from(self.regs.sp())
    }

    /// Stack pointer value after the next push.
    pub(crate) const fn pushed_sp(&self) -> i32 {
        self.regs.sp().wrapping_sub(SLOT)
    }

    /// Stores `val` one slot below SP, then moves SP down to that slot.
    pub(crate) fn push(&mut self, val: i32) -> Result<(), SimError> {
        let sp = self.pushed_sp();
        self.store(i64::from(sp), val)?;
        self.regs.set_sp(sp);
        let depth = i64::from(self.stack_top) - i64::from(sp);
        if let Ok(depth) = u32::try_from(depth) {
            self.stats.observe_stack_depth(depth);
        }
        Ok(())
    }

    /// Moves the stack pointer up one word.
    pub(crate) const fn release_slot(&mut self) {
        self.regs.set_sp(self.regs.sp().wrapping_add(SLOT));
    }

    /// Returns `true` when no call frame is active.
    pub fn at_stack_top(&self) -> bool {
        self.regs.sp() == self.stack_top
    }
}
