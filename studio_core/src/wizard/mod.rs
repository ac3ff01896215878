//! Multi-path contact form wizard.
//!
//! A session starts at path selection, walks one question per step, and ends
//! with a single insert through the injected [`PersistenceClient`]. Service
//! requests are then announced through the [`NotificationClient`].
//!
//! [`PersistenceClient`]: crate::persistence::PersistenceClient
//! [`NotificationClient`]: crate::notification::NotificationClient

pub mod budget;
pub mod controller;
pub mod events;
pub mod fields;
pub mod presenter;
pub mod scramble;
pub mod state;

pub use budget::{format_currency, BudgetSlider};
pub use controller::{FormWizard, PendingSubmission, SubmissionOutcome};
pub use events::WizardEvent;
pub use fields::{questions_for, FieldId, FieldKind, Question, GENERAL_QUESTIONS, SERVICE_QUESTIONS};
pub use presenter::{effect_for, Effect, Presenter};
pub use scramble::ScrambleText;
pub use state::{KeyInput, StepOutcome, ViewState, WizardError};
