//! Interactive confirmation before a plan runs

use st_core::{Direction, Migration};
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Gate consulted once per run, before any statement is sent.
pub trait Confirm {
    /// Present the whole plan and return whether to proceed.
    fn confirm(&mut self, direction: Direction, migrations: &[&Migration]) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(Direction, &[&Migration]) -> io::Result<bool>,
{
    fn confirm(&mut self, direction: Direction, migrations: &[&Migration]) -> io::Result<bool> {
        self(direction, migrations)
    }
}

/// Line-oriented y/N prompt
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the reader and writer
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl PromptConfirm<StdinLock<'static>, Stdout> {
    /// Prompt on the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, direction: Direction, migrations: &[&Migration]) -> io::Result<bool> {
        writeln!(self.output, "{direction}")?;
        for migration in migrations {
            writeln!(self.output, "  {}", migration.name)?;
        }
        write!(self.output, "Run these migrations? [y/N] ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            // EOF
            return Ok(false);
        }
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
#[path = "confirm_test.rs"]
mod tests;
