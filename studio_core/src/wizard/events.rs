use serde::Serialize;

use crate::models::{FormPath, Table};
use crate::wizard::fields::FieldId;

/// Transitions broadcast by the wizard. Presentation layers subscribe to
/// these; the wizard itself never drives visuals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    PathSelected {
        path: FormPath,
        total_steps: usize,
    },
    StepChanged {
        from: usize,
        to: usize,
        total_steps: usize,
    },
    ValidationRejected {
        step: usize,
        field: FieldId,
    },
    FieldFocused {
        field: FieldId,
        label: &'static str,
    },
    FieldBlurred {
        field: FieldId,
        label: &'static str,
    },
    BudgetChanged {
        value: u32,
        bracket: String,
    },
    BudgetSkipped,
    SubmissionStarted {
        path: FormPath,
    },
    SubmissionFailed {
        message: String,
    },
    Submitted {
        path: FormPath,
        table: Table,
        demo_mode: bool,
    },
    NotificationSent {
        message: String,
    },
    NotificationFailed {
        message: String,
    },
    ReturnedToSelection,
}
