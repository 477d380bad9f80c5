//! Interactive input abstraction
//!
//! Every console prompt in the crate goes through the [`Prompt`] trait so the
//! selection loops can be driven by scripted answers in tests.

use crate::types::{AsfError, AsfResult};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Source of interactive answers
pub trait Prompt {
    /// Show `message` and read one line of input
    fn read_line(&mut self, message: &str) -> AsfResult<String>;

    /// Show `message` and read a password without echoing it
    fn read_password(&mut self, message: &str) -> AsfResult<String>;
}

/// Console-backed prompt reading from stdin
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_line(&mut self, message: &str) -> AsfResult<String> {
        println!("{}", message);
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_password(&mut self, message: &str) -> AsfResult<String> {
        println!("{}", message);
        rpassword::read_password()
            .map_err(|e| AsfError::InvalidInput(format!("Failed to read password: {}", e)))
    }
}

/// Scripted prompt answering from a fixed queue, for tests
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    fn next_answer(&mut self, message: &str) -> AsfResult<String> {
        self.answers.pop_front().ok_or_else(|| {
            AsfError::InvalidInput(format!("scripted prompt exhausted at: {}", message))
        })
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, message: &str) -> AsfResult<String> {
        self.next_answer(message)
    }

    fn read_password(&mut self, message: &str) -> AsfResult<String> {
        self.next_answer(message)
    }
}
