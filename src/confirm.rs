//! Interactive confirmation, injectable so tests and non-interactive
//! callers can answer deterministically.

use std::io::{self, BufRead, Write};

use anyhow::Context;

use crate::errors::Result;

/// Capability to ask the operator a yes/no question.
pub trait ConfirmationProvider {
    /// Returns true only when the operator answered the literal "yes".
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Reads the answer from standard input. Blocks until a line arrives.
pub struct StdinConfirmation;

impl ConfirmationProvider for StdinConfirmation {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{prompt}");
        io::stdout().flush().context("failed to flush stdout")?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .context("failed to read confirmation")?;
        Ok(is_affirmative(&answer))
    }
}

/// Always gives the same answer and counts how often it was asked.
pub struct PresetConfirmation {
    answer: bool,
    asked: usize,
}

impl PresetConfirmation {
    pub fn new(answer: bool) -> Self {
        Self { answer, asked: 0 }
    }

    pub fn times_asked(&self) -> usize {
        self.asked
    }
}

impl ConfirmationProvider for PresetConfirmation {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        self.asked += 1;
        Ok(self.answer)
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
