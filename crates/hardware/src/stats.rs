//! Simulation statistics collection and reporting.
//!
//! This module tracks execution metrics for a run. It provides:
//! 1. **Throughput:** Retired instructions, wall-clock time, and instructions per second.
//! 2. **Instruction mix:** Counts by category (ALU, load, store, compare, branch, call/ret, stack, I/O).
//! 3. **Control flow:** Taken and not-taken conditional branches.
//! 4. **Stack usage:** Peak stack depth in bytes.

use std::time::Instant;

use crate::isa::Opcode;

/// Simulation statistics structure.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Number of instructions executed, including lenient no-ops.
    pub instructions_retired: u64,

    /// Register arithmetic, shifts, and register/immediate moves.
    pub inst_alu: u64,
    /// Memory-to-register moves.
    pub inst_load: u64,
    /// Register-to-memory moves.
    pub inst_store: u64,
    /// `cmpl` instructions.
    pub inst_compare: u64,
    /// Conditional branches and `jmp`.
    pub inst_branch: u64,
    /// `call` and `ret` instructions.
    pub inst_call_ret: u64,
    /// `pushl` and `popl` instructions.
    pub inst_stack: u64,
    /// `printr` and `readr` instructions.
    pub inst_io: u64,
    /// Unknown opcodes skipped under the lenient policy.
    pub inst_unknown: u64,

    /// Branches (including `jmp`) that redirected the program counter.
    pub branches_taken: u64,
    /// Conditional branches that fell through.
    pub branches_not_taken: u64,

    /// Deepest stack reached, in bytes below the top of stack.
    pub peak_stack_depth: u32,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_compare: 0,
            inst_branch: 0,
            inst_call_ret: 0,
            inst_stack: 0,
            inst_io: 0,
            inst_unknown: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            peak_stack_depth: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction in its category.
    pub const fn record(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        match op {
            Opcode::Subl
            | Opcode::AddlRegReg
            | Opcode::AddlImmReg
            | Opcode::Imull
            | Opcode::Shrl
            | Opcode::MovlRegReg
            | Opcode::MovlImmReg => self.inst_alu += 1,
            Opcode::MovlDerefReg => self.inst_load += 1,
            Opcode::MovlRegDeref => self.inst_store += 1,
            Opcode::Cmpl => self.inst_compare += 1,
            Opcode::Je | Opcode::Jl | Opcode::Jle | Opcode::Jge | Opcode::Jbe | Opcode::Jmp => {
                self.inst_branch += 1;
            }
            Opcode::Call | Opcode::Ret => self.inst_call_ret += 1,
            Opcode::Pushl | Opcode::Popl => self.inst_stack += 1,
            Opcode::Printr | Opcode::Readr => self.inst_io += 1,
        }
    }

    /// Counts one skipped unknown opcode.
    pub const fn record_unknown(&mut self) {
        self.instructions_retired += 1;
        self.inst_unknown += 1;
    }

    /// Records the outcome of a branch.
    pub const fn record_branch(&mut self, taken: bool) {
        if taken {
            self.branches_taken += 1;
        } else {
            self.branches_not_taken += 1;
        }
    }

    /// Updates the peak stack depth.
    pub fn observe_stack_depth(&mut self, depth: u32) {
        self.peak_stack_depth = self.peak_stack_depth.max(depth);
    }

    /// Prints a report to stderr.
    pub fn print(&self) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let ips = if elapsed > 0.0 {
            self.instructions_retired as f64 / elapsed
        } else {
            0.0
        };
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                n as f64 * 100.0 / self.instructions_retired as f64
            }
        };

        eprintln!("==========================================================");
        eprintln!("EXECUTION STATISTICS");
        eprintln!("==========================================================");
        eprintln!("  instructions   {:>12}", self.instructions_retired);
        eprintln!("  host time      {:>12.6} s", elapsed);
        eprintln!("  throughput     {:>12.0} inst/s", ips);
        eprintln!("----------------------------------------------------------");
        for (name, count) in [
            ("alu", self.inst_alu),
            ("load", self.inst_load),
            ("store", self.inst_store),
            ("compare", self.inst_compare),
            ("branch", self.inst_branch),
            ("call/ret", self.inst_call_ret),
            ("stack", self.inst_stack),
            ("i/o", self.inst_io),
            ("unknown", self.inst_unknown),
        ] {
            eprintln!("  {:<14} {:>12} ({:>5.1}%)", name, count, pct(count));
        }
        eprintln!("----------------------------------------------------------");
        eprintln!("  branches taken {:>12}", self.branches_taken);
        eprintln!("  not taken      {:>12}", self.branches_not_taken);
        eprintln!("  peak stack     {:>12} bytes", self.peak_stack_depth);
        eprintln!("==========================================================");
    }
}
