// UI prompts and user interaction module

use colored::Colorize;
use dialoguer::Confirm;

use crate::core::termination::{Prompt, TerminationPrompt};

/// Answers termination prompts on the terminal.
///
/// `assume_yes` pre-answers the first confirmation and `assume_force` the
/// force-kill confirmation; anything not pre-answered is asked interactively.
/// A prompt that cannot be shown (no TTY) counts as a "no".
pub struct DialoguerPrompt {
    pub assume_yes: bool,
    pub assume_force: bool,
}

impl DialoguerPrompt {
    pub fn new(assume_yes: bool, assume_force: bool) -> Self {
        Self {
            assume_yes,
            assume_force,
        }
    }

    fn ask(message: &str) -> bool {
        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Confirmation prompt failed: {}", e);
                false
            }
        }
    }
}

impl TerminationPrompt for DialoguerPrompt {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        match prompt {
            Prompt::NeedConfirmation { pid, name } => {
                if self.assume_yes {
                    return true;
                }
                Self::ask(&format!(
                    "Terminate {} (PID: {})? Are you sure you want to terminate this process?",
                    name, pid
                ))
            }
            Prompt::NeedForceConfirmation { pid, name } => {
                if self.assume_force {
                    return true;
                }
                warn(&format!("{} (PID: {}) did not respond to termination.", name, pid));
                Self::ask("Do you want to force kill it?")
            }
        }
    }
}

/// Fixed answers, for scripted use
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswers {
    pub confirm: bool,
    pub force: bool,
}

impl TerminationPrompt for FixedAnswers {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        match prompt {
            Prompt::NeedConfirmation { .. } => self.confirm,
            Prompt::NeedForceConfirmation { .. } => self.force,
        }
    }
}

/// Display a warning message
pub fn warn(message: &str) {
    println!("{}", format!("Warning: {}", message).yellow().bold());
}

/// Display an info message
pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// Display a success message
pub fn success(message: &str) {
    println!("{}", message.green().bold());
}

/// Display an error message
pub fn error(message: &str) {
    println!("{}", message.red().bold());
}

/// Display a dimmed/secondary message
pub fn dimmed(message: &str) {
    println!("{}", message.dimmed());
}
