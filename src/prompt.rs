//! User interaction: yes/no award questions, the topic, the input directory.

use crate::error::{Error, Result};
use dialoguer::Input;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Asks yes/no questions during the award loop.
pub trait Prompter {
    /// Asks `question` and returns true for an affirmative answer.
    ///
    /// # Errors
    ///
    /// Returns a prompt error if the answer cannot be read.
    fn ask_yes_no(&mut self, question: &str) -> Result<bool>;
}

/// Only a single `y` (any case, surrounding whitespace trimmed) counts as
/// yes; everything else is no.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Prompts on the terminal with `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?;
        Ok(is_affirmative(&answer))
    }
}

/// Replays canned answers, for headless runs and tests.
///
/// Questions are recorded in the order asked. Once the script runs out every
/// further question is answered "no".
#[derive(Debug, Default, Clone)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter that answers with `answers` in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        self.asked.push(question.to_string());
        Ok(self
            .answers
            .pop_front()
            .is_some_and(|answer| is_affirmative(&answer)))
    }
}

/// Asks for the contest topic on the terminal.
///
/// # Errors
///
/// Returns a prompt error if the terminal cannot be read.
pub fn ask_topic() -> Result<String> {
    let topic: String = Input::new().with_prompt("Enter topic name").interact_text()?;
    Ok(topic)
}

/// Lets the user choose the input directory with the native folder picker.
///
/// # Errors
///
/// Returns a prompt error if the dialog is cancelled.
#[cfg(feature = "picker")]
pub fn pick_input_dir() -> Result<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select the folder with contest entries")
        .pick_folder()
        .ok_or_else(|| Error::prompt("no input directory selected"))
}

/// Asks for the input directory on the terminal.
///
/// # Errors
///
/// Returns a prompt error if the terminal cannot be read or the answer is blank.
#[cfg(not(feature = "picker"))]
pub fn pick_input_dir() -> Result<PathBuf> {
    let dir: String = Input::new()
        .with_prompt("Input directory")
        .interact_text()?;
    let dir = dir.trim();
    if dir.is_empty() {
        return Err(Error::prompt("no input directory selected"));
    }
    Ok(PathBuf::from(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(is_affirmative(" y\n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_scripted_prompter_replays_answers() {
        let mut prompter = ScriptedPrompter::new(["Y", "nope"]);

        assert!(prompter.ask_yes_no("Is A.jpg the Gold?").unwrap());
        assert!(!prompter.ask_yes_no("Is B.jpg the Silver?").unwrap());
        assert_eq!(prompter.remaining(), 0);
        assert_eq!(prompter.asked(), ["Is A.jpg the Gold?", "Is B.jpg the Silver?"]);
    }

    #[test]
    fn test_scripted_prompter_exhausted_answers_no() {
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        assert!(!prompter.ask_yes_no("Is C.jpg the Bronze?").unwrap());
        assert_eq!(prompter.asked().len(), 1);
    }
}
