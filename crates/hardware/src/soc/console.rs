//! Console device.
//!
//! The `printr` and `readr` instructions are the only way a program observes
//! the outside world. This module defines the [`Console`] seam they go through
//! and a stream-backed implementation that serves both the process stdio and
//! in-memory buffers used by tests.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Stdout, Write};

/// Line-oriented console attached to the machine.
pub trait Console {
    /// Writes one line of output, appending the newline.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Returns the next whitespace-delimited token of input, or `None` at end of input.
    ///
    /// May block until input is available.
    fn next_token(&mut self) -> io::Result<Option<String>>;
}

/// Console over any buffered reader and writer.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    /// Creates a console reading from `input` and writing to `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Returns the output sink.
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the console and returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl StreamConsole<io::StdinLock<'static>, Stdout> {
    /// Creates a console bound to the process stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}

impl<R, W> fmt::Debug for StreamConsole<R, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamConsole")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
