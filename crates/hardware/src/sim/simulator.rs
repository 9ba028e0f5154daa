//! Simulator: owns the CPU and the decoded program side-by-side.
//!
//! The simulation loop fetches the instruction at `program[pc / 4]`, executes
//! it, and installs the returned program counter, one instruction at a time.
//! It stops when the program counter lands exactly on the end of the program,
//! when a top-level `ret` halts the machine, when the host cancels the run, or
//! when the configured instruction limit is reached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, trace};

use crate::common::constants::WORD_BYTES;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::{Cpu, Step};
use crate::isa::{Instruction, decode_program};
use crate::soc::Console;

/// How a run ended without error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// A `ret` executed with no active call frame.
    Halted,
    /// The program counter reached the address just past the last instruction.
    EndOfProgram,
    /// The host set the cancellation token.
    Cancelled,
    /// The configured instruction limit was reached.
    StepLimit,
}

impl ExitStatus {
    /// Returns `true` if the program finished on its own.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Halted | Self::EndOfProgram)
    }

    /// Process exit code for this status.
    pub const fn exit_code(self) -> i32 {
        if self.is_success() { 0 } else { 2 }
    }
}

/// Shared flag a host sets to stop a running simulation.
///
/// The loop checks it once per instruction.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Top-level simulator: CPU state + decoded program.
#[derive(Debug)]
pub struct Simulator<C> {
    /// CPU architectural state (registers, memory, console, stats).
    pub cpu: Cpu<C>,
    program: Vec<Instruction>,
    trace_instructions: bool,
    max_instructions: Option<u64>,
    cancel: CancelToken,
}

impl<C: Console> Simulator<C> {
    /// Creates a simulator in the reset state for an already decoded program.
    pub fn new(program: Vec<Instruction>, config: &Config, console: C) -> Self {
        Self {
            cpu: Cpu::new(config, console),
            program,
            trace_instructions: config.general.trace_instructions,
            max_instructions: config.general.max_instructions,
            cancel: CancelToken::new(),
        }
    }

    /// Decodes raw instruction words and creates a simulator for them.
    pub fn from_words(words: &[u32], config: &Config, console: C) -> Self {
        Self::new(decode_program(words), config, console)
    }

    /// Replaces the cancellation token, e.g. with one shared with a signal handler.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns a handle that cancels this simulation.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the decoded program.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Byte address one past the last instruction.
    fn end_address(&self) -> u64 {
        self.program.len() as u64 * WORD_BYTES as u64
    }

    /// Fetches the instruction at the current program counter.
    fn fetch(&self) -> Result<Instruction, SimError> {
        let pc = self.cpu.pc;
        let out_of_range = || SimError::PcOutOfRange {
            pc,
            len: self.program.len(),
        };
        if pc as usize % WORD_BYTES != 0 {
            return Err(out_of_range());
        }
        self.program
            .get(pc as usize / WORD_BYTES)
            .copied()
            .ok_or_else(out_of_range)
    }

    /// Executes exactly one instruction.
    ///
    /// # Returns
    ///
    /// `Some(status)` if the machine stopped, `None` if it can continue.
    ///
    /// # Errors
    ///
    /// Returns a [`SimError`] if the program counter is outside the program or
    /// the instruction faults.
    pub fn step(&mut self) -> Result<Option<ExitStatus>, SimError> {
        if u64::from(self.cpu.pc) == self.end_address() {
            return Ok(Some(ExitStatus::EndOfProgram));
        }
        let inst = self.fetch()?;
        if self.trace_instructions {
            trace!("{:#06x}: {}", self.cpu.pc, inst);
        }
        match self.cpu.execute(&inst)? {
            Step::Next(pc) => {
                self.cpu.pc = pc;
                Ok((u64::from(pc) == self.end_address()).then_some(ExitStatus::EndOfProgram))
            }
            Step::Halt => Ok(Some(ExitStatus::Halted)),
        }
    }

    /// Runs until the program stops.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError`] raised by [`Simulator::step`].
    pub fn run(&mut self) -> Result<ExitStatus, SimError> {
        let status = loop {
            if self.cancel.is_cancelled() {
                break ExitStatus::Cancelled;
            }
            if self
                .max_instructions
                .is_some_and(|max| self.cpu.stats.instructions_retired >= max)
            {
                break ExitStatus::StepLimit;
            }
            if let Some(status) = self.step()? {
                break status;
            }
        };
        info!(
            ?status,
            instructions = self.cpu.stats.instructions_retired,
            "simulation finished"
        );
        Ok(status)
    }
}
