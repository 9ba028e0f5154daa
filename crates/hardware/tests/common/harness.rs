use std::io::Cursor;

use mini86_core::Simulator;
use mini86_core::common::SimError;
use mini86_core::config::Config;
use mini86_core::core::arch::Flags;
use mini86_core::isa::Instruction;
use mini86_core::sim::ExitStatus;
use mini86_core::soc::StreamConsole;

use super::builder::instruction::InstructionBuilder;

/// Console whose input is a fixed string and whose output is captured.
pub type TestConsole = StreamConsole<Cursor<Vec<u8>>, Vec<u8>>;

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator<TestConsole>,
}

impl TestContext {
    /// Builds a simulator for `program` with the default configuration and no input.
    pub fn new(program: Vec<InstructionBuilder>) -> Self {
        Self::with_config(program, Config::default(), "")
    }

    /// Builds a simulator with console input available to `readr`.
    pub fn with_input(program: Vec<InstructionBuilder>, input: &str) -> Self {
        Self::with_config(program, Config::default(), input)
    }

    pub fn with_config(program: Vec<InstructionBuilder>, config: Config, input: &str) -> Self {
        let instructions: Vec<Instruction> =
            program.into_iter().map(InstructionBuilder::build).collect();
        Self::from_instructions(instructions, config, input)
    }

    pub fn from_instructions(program: Vec<Instruction>, config: Config, input: &str) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let console = StreamConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Self {
            sim: Simulator::new(program, &config, console),
        }
    }

    pub fn run(&mut self) -> Result<ExitStatus, SimError> {
        self.sim.run()
    }

    /// Runs and panics unless the program finished normally.
    pub fn run_ok(&mut self) -> ExitStatus {
        match self.sim.run() {
            Ok(status) => status,
            Err(e) => panic!("simulation failed: {e}"),
        }
    }

    /// Executes `n` instructions, panicking on any error or early stop.
    ///
    /// Reaching the end of the program on the last of the `n` steps is allowed.
    pub fn step_n(&mut self, n: usize) {
        for i in 0..n {
            match self.sim.step() {
                Ok(None) => {}
                Ok(Some(ExitStatus::EndOfProgram)) if i + 1 == n => {}
                Ok(Some(status)) => panic!("stopped with {status:?} after {i} steps"),
                Err(e) => panic!("step {i} failed: {e}"),
            }
        }
    }

    /// Read a register value.
    pub fn reg(&self, idx: u8) -> i32 {
        self.sim.cpu.regs.read(idx).unwrap()
    }

    /// Set a general-purpose register value.
    pub fn set_reg(&mut self, idx: u8, val: i32) {
        self.sim.cpu.regs.write(idx, val).unwrap();
    }

    pub fn sp(&self) -> i32 {
        self.sim.cpu.regs.sp()
    }

    pub fn pc(&self) -> u32 {
        self.sim.cpu.pc
    }

    pub fn flags(&self) -> Flags {
        self.sim.cpu.regs.flags()
    }

    /// Everything the program printed so far.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(self.sim.cpu.console.output()).into_owned()
    }
}
