//! mini86 simulator CLI.
//!
//! This binary loads a program image and runs it. It performs:
//! 1. **Direct run:** Execute the image with stdin/stdout as the console (default).
//! 2. **Listing:** Print the decoded program with `--disassemble` instead of running it.
//! 3. **Diagnostics:** Optional per-instruction tracing, statistics, and a final state dump.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mini86_core::config::{Config, UnknownOpcodePolicy};
use mini86_core::isa::Instruction;
use mini86_core::sim::{ExitStatus, loader};
use mini86_core::{Simulator, StreamConsole};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Interpreter for the mini86 instruction set",
    long_about = "Run a binary image of 32-bit mini86 instructions.\n\n`printr` writes to stdout and `readr` reads integers from stdin.\n\nExamples:\n  sim program.bin\n  sim --disassemble program.bin\n  sim --trace --max-instructions 10000 program.bin"
)]
struct Cli {
    /// Binary image to execute.
    file: PathBuf,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat unknown opcodes as no-ops instead of stopping.
    #[arg(long)]
    lenient: bool,

    /// Log every executed instruction to stderr.
    #[arg(short, long)]
    trace: bool,

    /// Stop after this many instructions.
    #[arg(long, value_name = "N")]
    max_instructions: Option<u64>,

    /// Print the decoded program and exit without running it.
    #[arg(short, long)]
    disassemble: bool,

    /// Print execution statistics to stderr after the run.
    #[arg(long)]
    stats: bool,

    /// Print registers and flags to stderr after the run.
    #[arg(long)]
    dump_state: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.trace);

    let config = build_config(&cli).unwrap_or_else(|e| fail(&e));
    let words = loader::load_program(&cli.file, config.memory.byte_order)
        .unwrap_or_else(|e| fail(&e));

    let mut sim = Simulator::from_words(&words, &config, StreamConsole::stdio());
    if cli.disassemble {
        print_program(sim.program());
        return;
    }

    let result = sim.run();

    if cli.dump_state {
        sim.cpu.dump_state();
    }
    if cli.stats {
        sim.cpu.stats.print();
    }

    match result {
        Ok(status) => {
            if status == ExitStatus::StepLimit {
                eprintln!("Stopped: instruction limit reached");
            }
            process::exit(status.exit_code());
        }
        Err(e) => fail(&e),
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--trace` enables the instruction trace.
fn init_logging(trace: bool) {
    let default = if trace { "mini86_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration file, if any, and applies command-line overrides.
fn build_config(cli: &Cli) -> Result<Config, mini86_core::common::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.lenient {
        config.general.unknown_opcode = UnknownOpcodePolicy::Lenient;
    }
    if cli.trace {
        config.general.trace_instructions = true;
    }
    if cli.max_instructions.is_some() {
        config.general.max_instructions = cli.max_instructions;
    }
    tracing::debug!(?config, "configuration");
    Ok(config)
}

/// Prints each decoded instruction with its raw fields and disassembly.
fn print_program(program: &[Instruction]) {
    println!("instructions:");
    for (i, inst) in program.iter().enumerate() {
        println!(
            "{:#06x}: op: {:>2}, reg1: {:>2}, reg2: {:>2}, imm: {:>6}    {}",
            i * 4,
            inst.opcode,
            inst.first_register,
            inst.second_register,
            inst.immediate,
            inst
        );
    }
    println!("--------------");
}

/// Prints an error and exits with status 1.
fn fail(err: &dyn std::error::Error) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}
