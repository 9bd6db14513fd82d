//! Scripted prompter

use std::collections::VecDeque;
use std::sync::Mutex;
use theme_client_core::{PromptError, PromptResult, Prompter};

/// A scripted answer, consumed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Pick the item at this index
    Select(usize),
    /// Pick the first item whose label contains the text
    SelectMatching(String),
    /// Answer a yes/no question
    Confirm(bool),
    /// Accept the prompt's default
    Default,
    /// Cancel the prompt (escape)
    Cancel,
    /// Fail as if the terminal went away
    Fail(String),
}

/// A prompt that was shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedPrompt {
    pub prompt: String,
    /// Menu items; empty for confirmations
    pub items: Vec<String>,
}

/// Prompter answering from a script
///
/// Running out of answers is a prompt failure, so a test notices prompts
/// it did not expect.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<AskedPrompt>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far
    pub fn asked(&self) -> Vec<AskedPrompt> {
        self.asked.lock().unwrap().clone()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, prompt: &str, items: &[String]) -> PromptResult<Answer> {
        self.asked.lock().unwrap().push(AskedPrompt {
            prompt: prompt.to_string(),
            items: items.to_vec(),
        });

        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PromptError::new(format!("No scripted answer for '{prompt}'")))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> PromptResult<Option<usize>> {
        match self.next(prompt, items)? {
            Answer::Select(index) => Ok(Some(index)),
            Answer::SelectMatching(text) => items
                .iter()
                .position(|item| item.contains(&text))
                .map(Some)
                .ok_or_else(|| PromptError::new(format!("No item matching '{text}'"))),
            Answer::Default => default
                .map(Some)
                .ok_or_else(|| PromptError::new(format!("'{prompt}' has no default"))),
            Answer::Cancel => Ok(None),
            Answer::Fail(message) => Err(PromptError::new(message)),
            Answer::Confirm(_) => Err(PromptError::new(format!(
                "Expected a selection answer for '{prompt}'"
            ))),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<Option<bool>> {
        match self.next(prompt, &[])? {
            Answer::Confirm(answer) => Ok(Some(answer)),
            Answer::Default => Ok(Some(default)),
            Answer::Cancel => Ok(None),
            Answer::Fail(message) => Err(PromptError::new(message)),
            Answer::Select(_) | Answer::SelectMatching(_) => Err(PromptError::new(format!(
                "Expected a yes/no answer for '{prompt}'"
            ))),
        }
    }
}
