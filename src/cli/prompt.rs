use crate::domain::error::DomainError;
use crate::domain::ports::operator_prompt::OperatorPrompt;
use std::io::{self, BufRead, Write};

/// Reads answers from stdin.
pub struct TerminalPrompt;

impl OperatorPrompt for TerminalPrompt {
    fn ask(&self, question: &str) -> Result<String, DomainError> {
        let stdin = io::stdin();
        loop {
            println!("\n{question}");
            io::stdout()
                .flush()
                .map_err(|e| DomainError::Prompt(e.to_string()))?;

            let mut line = String::new();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .map_err(|e| DomainError::Prompt(e.to_string()))?;
            if read == 0 {
                return Err(DomainError::Prompt("stdin closed".into()));
            }
            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
        }
    }
}
