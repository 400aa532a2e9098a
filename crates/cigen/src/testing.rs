//! Test utilities.

use std::cell::RefCell;
use std::collections::VecDeque;

use anyhow::Result;

use crate::prompt::{self, Prompter};

/// Prompter driven by a prepared list of answers.
///
/// Each prompt consumes the next answer in order; an empty string picks the
/// default, mirroring what pressing Enter does on the console. Everything
/// shown to the user is kept in a transcript for assertions.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    transcript: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            transcript: RefCell::new(Vec::new()),
        }
    }

    fn next_answer(&self, message: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted answer left for prompt: {message}"))
    }

    /// Everything the flow printed or asked, in order.
    #[must_use]
    pub fn transcript(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }

    /// True once every scripted answer has been consumed.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.answers.borrow().is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&self, message: &str) {
        self.transcript.borrow_mut().push(message.to_string());
    }

    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String> {
        self.transcript.borrow_mut().push(format!("? {message}"));
        let answer = self.next_answer(message)?;
        match default {
            Some(fallback) if answer.is_empty() => Ok(fallback.to_string()),
            _ => Ok(answer),
        }
    }

    fn ask_yes_no(&self, message: &str, default: bool) -> Result<bool> {
        self.transcript.borrow_mut().push(format!("? {message}"));
        let answer = self.next_answer(message)?.to_lowercase();
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(answer == "s")
    }

    fn ask_choice(&self, message: &str, choices: &[&str], default: usize) -> Result<usize> {
        self.transcript.borrow_mut().push(format!("? {message}"));
        let answer = self.next_answer(message)?;
        Ok(prompt::parse_choice(&answer, choices.len()).unwrap_or(default))
    }
}
