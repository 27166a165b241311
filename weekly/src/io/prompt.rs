//! Operator prompt seam.
//!
//! The [`Prompt`] trait decouples the workflow from the input mechanism. Two
//! prompt shapes exist: a free-form acknowledgment pause and a numbered
//! single-choice list. Both block until the operator answers; closing the
//! input (Ctrl-D or Ctrl-C) is a cancellation and aborts the run. Tests use
//! the scripted prompt in `test_support` instead of the terminal.

use anyhow::{Context, Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// One selectable entry in a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Text shown to the operator.
    pub label: String,
    /// Value returned when this entry is chosen.
    pub value: String,
}

/// Abstraction over operator interaction.
pub trait Prompt {
    /// Block until the operator submits any input.
    fn pause(&mut self, message: &str) -> Result<()>;

    /// Present `choices` as a numbered list and return the chosen value.
    fn choose(&mut self, message: &str, choices: &[Choice]) -> Result<String>;
}

/// Parse a choice entry as a 1-based index into a list of `len` entries.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Some(n),
        _ => None,
    }
}

/// Readline-backed [`Prompt`] for interactive sessions.
pub struct LinePrompt {
    editor: DefaultEditor,
}

impl LinePrompt {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("initialize line editor")?;
        Ok(Self { editor })
    }

    /// Read one line, treating a closed or interrupted input as explicit
    /// cancellation.
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => {
                bail!("prompt cancelled: input closed")
            }
            Err(err) => Err(err).context("read prompt input"),
        }
    }
}

impl Prompt for LinePrompt {
    fn pause(&mut self, message: &str) -> Result<()> {
        self.read_line(&format!("{message} "))?;
        Ok(())
    }

    fn choose(&mut self, message: &str, choices: &[Choice]) -> Result<String> {
        if choices.is_empty() {
            bail!("choice prompt offered no choices");
        }
        println!("{message}");
        for (index, choice) in choices.iter().enumerate() {
            println!("  {}) {}", index + 1, choice.label);
        }
        loop {
            let line = self.read_line(&format!("Choose [1-{}]: ", choices.len()))?;
            match parse_choice(&line, choices.len()) {
                Some(n) => return Ok(choices[n - 1].value.clone()),
                None => println!("Invalid choice."),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_accepts_in_range_entries() {
        assert_eq!(parse_choice("1", 3), Some(1));
        assert_eq!(parse_choice(" 3 \n", 3), Some(3));
    }

    #[test]
    fn parse_choice_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("nope", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }
}
