use crate::domain::error::DomainError;

/// Asks the person at the terminal for input.
pub trait OperatorPrompt: Send + Sync {
    /// One non-empty, trimmed line.
    fn ask(&self, question: &str) -> Result<String, DomainError>;

    fn confirm(&self, question: &str) -> Result<bool, DomainError> {
        let answer = self.choose(&format!("{question} (y/n)"), &["y", "n"])?;
        Ok(answer == "y")
    }

    /// Repeats the question until the answer is one of `options` (case-insensitive).
    fn choose(&self, question: &str, options: &[&str]) -> Result<String, DomainError> {
        loop {
            let answer = self.ask(question)?.to_lowercase();
            if options.contains(&answer.as_str()) {
                return Ok(answer);
            }
        }
    }

    /// Repeats the question until the answer is an integer of at least `min`.
    fn ask_number(&self, question: &str, min: u64) -> Result<u64, DomainError> {
        loop {
            match self.ask(question)?.parse::<u64>() {
                Ok(n) if n >= min => return Ok(n),
                _ => tracing::warn!("Expected an integer of at least {min}"),
            }
        }
    }
}
