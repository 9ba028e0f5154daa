//! # SoC Unit Tests
//!
//! Peripherals attached to the core.
