//! Terminal prompts backed by dialoguer
//!
//! Escape (or `q`) in a prompt is a cancellation and maps to `Ok(None)`.
//! Ctrl+C while a prompt is open is reported by the terminal as an
//! interrupted read and is treated the same way, provided an
//! [`InterruptGuard`](crate::terminal::InterruptGuard) is held so the
//! raised SIGINT does not terminate the process.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Select};
use std::io;
use theme_client_core::{PromptError, PromptResult, Prompter};

pub struct DialoguerPrompter {
    page_size: usize,
    colorful: bool,
}

impl DialoguerPrompter {
    pub fn new(page_size: usize, colorful: bool) -> Self {
        Self {
            page_size,
            colorful,
        }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }
}

fn cancelled_or_error<T>(error: dialoguer::Error) -> PromptResult<Option<T>> {
    let dialoguer::Error::IO(error) = error;
    if error.kind() == io::ErrorKind::Interrupted {
        log::debug!("Prompt interrupted");
        Ok(None)
    } else {
        Err(PromptError::from_io(error))
    }
}

impl Prompter for DialoguerPrompter {
    fn select(
        &self,
        prompt: &str,
        items: &[String],
        default: Option<usize>,
    ) -> PromptResult<Option<usize>> {
        let theme = self.theme();
        let mut select = Select::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .items(items)
            .max_length(self.page_size);

        if let Some(default) = default {
            select = select.default(default);
        }

        select.interact_opt().or_else(cancelled_or_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> PromptResult<Option<bool>> {
        let theme = self.theme();
        Confirm::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .or_else(cancelled_or_error)
    }
}
