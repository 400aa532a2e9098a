//! Console prompting seam.
//!
//! The question flow only talks to [`Prompter`], so tests can drive the
//! whole generator with scripted answers (see [`crate::testing`]).

use std::io::{self, Write as _};

use anyhow::Result;

/// Console interaction used by the question flow.
pub trait Prompter {
    /// Print a line of plain output.
    fn say(&self, message: &str);

    /// Ask for free text. Empty input falls back to `default` when present.
    ///
    /// # Errors
    ///
    /// Returns an error when the console cannot be read.
    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String>;

    /// Ask a yes/no question, `s`/`n` style. Empty input picks `default`;
    /// any answer other than `s` means no.
    ///
    /// # Errors
    ///
    /// Returns an error when the console cannot be read.
    fn ask_yes_no(&self, message: &str, default: bool) -> Result<bool>;

    /// Ask to pick one of `choices` by number, returning the zero-based
    /// index. Empty or unparseable input picks `default`.
    ///
    /// # Errors
    ///
    /// Returns an error when the console cannot be read.
    fn ask_choice(&self, message: &str, choices: &[&str], default: usize) -> Result<usize>;
}

/// Interpret a 1-based choice answer against `len` options.
#[must_use]
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n = input.parse::<usize>().ok()?;
    if n == 0 || n > len {
        return None;
    }
    Some(n - 1)
}

/// Prompter backed by the real console.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_line() -> Result<String> {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

#[allow(clippy::print_stdout)]
impl Prompter for StdinPrompter {
    fn say(&self, message: &str) {
        println!("{message}");
    }

    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String> {
        if let Some(hint) = default {
            print!("{message} [{hint}]: ");
        } else {
            print!("{message}: ");
        }
        io::stdout().flush()?;

        let input = Self::read_line()?;
        match default {
            Some(fallback) if input.is_empty() => Ok(fallback.to_string()),
            _ => Ok(input),
        }
    }

    fn ask_yes_no(&self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "s" } else { "n" };
        print!("{message} (s/n) [{hint}]: ");
        io::stdout().flush()?;

        let input = Self::read_line()?.to_lowercase();
        if input.is_empty() {
            return Ok(default);
        }
        Ok(input == "s")
    }

    fn ask_choice(&self, message: &str, choices: &[&str], default: usize) -> Result<usize> {
        println!("{message}");
        for (i, choice) in choices.iter().enumerate() {
            println!(" {}) {}", i + 1, choice);
        }
        let numbers = (1..=choices.len())
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("/");
        print!("Elige {numbers} [{}]: ", default + 1);
        io::stdout().flush()?;

        let input = Self::read_line()?;
        Ok(parse_choice(&input, choices.len()).unwrap_or(default))
    }
}
