//! Simulation driver and program loading.
//!
//! Provides the loader that turns a file into instruction words and the
//! simulator that runs them.

/// Program file loading.
pub mod loader;

/// The fetch/execute loop.
pub mod simulator;

pub use loader::load_program;
pub use simulator::{CancelToken, ExitStatus, Simulator};
