use serde::Serialize;
use thiserror::Error;

use crate::error::AppError;
use crate::models::FormPath;
use crate::wizard::fields::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewState {
    Selection,
    Form { path: FormPath, step: usize },
    /// `step` is the final step, restored if persistence fails.
    Submitting { path: FormPath, step: usize },
    Success { path: FormPath },
}

impl ViewState {
    pub fn path(&self) -> Option<FormPath> {
        match self {
            ViewState::Selection => None,
            ViewState::Form { path, .. }
            | ViewState::Submitting { path, .. }
            | ViewState::Success { path } => Some(*path),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ViewState::Submitting { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { step: usize },
    /// The bound field was empty; nothing changed.
    Rejected { step: usize },
    Submitted { demo_mode: bool },
    /// A submission is already in flight.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Enter { shift: bool },
    Other,
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("no form is active")]
    NotInForm,

    #[error("the current step is not the budget slider")]
    NotBudgetStep,

    #[error("the budget slider is set with set_budget")]
    BudgetStepRequiresSlider,

    #[error("only the final step can submit")]
    NotFinalStep,

    #[error("step {step} is missing a valid answer for {field:?}")]
    Incomplete { step: usize, field: FieldId },

    #[error("submission failed: {0}")]
    Persistence(#[source] AppError),
}
