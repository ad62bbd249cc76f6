//! Process termination workflow.

pub mod control;
pub mod controller;
pub mod guard;
pub mod outcome;

pub use control::{ProcessControl, ProcessTarget, SystemProcessControl, TerminationSignal};
pub use controller::{Prompt, RefreshTrigger, TerminationController, TerminationPrompt};
pub use guard::{is_protected, GUARDED_ACCOUNTS};
pub use outcome::{TerminationOutcome, TerminationReport, TerminationRequest};
