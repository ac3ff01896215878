use std::collections::HashMap;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::{AppConfig, BudgetConfig};
use crate::error::AppError;
use crate::models::{
    FormPath, InquiryRecord, ServiceRequestRecord, SubmissionRecord, Table, BUDGET_SKIP_SENTINEL,
};
use crate::notification::NotificationClient;
use crate::persistence::PersistenceClient;
use crate::wizard::budget::BudgetSlider;
use crate::wizard::events::WizardEvent;
use crate::wizard::fields::{questions_for, FieldId, FieldKind, Question};
use crate::wizard::state::{KeyInput, StepOutcome, ViewState, WizardError};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// One contact-form session.
pub struct FormWizard {
    persistence: PersistenceClient,
    notification: NotificationClient,
    budget_config: BudgetConfig,
    view: ViewState,
    answers: HashMap<FieldId, String>,
    budget: BudgetSlider,
    focused: Option<FieldId>,
    events: broadcast::Sender<WizardEvent>,
}

impl FormWizard {
    pub fn new(
        persistence: PersistenceClient,
        notification: NotificationClient,
        budget_config: BudgetConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            persistence,
            notification,
            budget_config,
            view: ViewState::Selection,
            answers: HashMap::new(),
            budget: BudgetSlider::new(budget_config),
            focused: None,
            events,
        }
    }

    /// Builds both collaborators from configuration. Missing credentials give
    /// the `Unconfigured` variants rather than an error.
    pub async fn from_config(config: &AppConfig) -> crate::error::Result<Self> {
        let persistence = PersistenceClient::from_config(&config.persistence).await?;
        let notification = NotificationClient::from_config(&config.notification)?;
        Ok(Self::new(persistence, notification, config.budget))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn path(&self) -> Option<FormPath> {
        self.view.path()
    }

    pub fn is_submitting(&self) -> bool {
        self.view.is_submitting()
    }

    pub fn is_demo_mode(&self) -> bool {
        !self.persistence.is_configured()
    }

    pub fn current_step(&self) -> usize {
        match self.view {
            ViewState::Form { step, .. } | ViewState::Submitting { step, .. } => step,
            ViewState::Selection | ViewState::Success { .. } => 0,
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.path().map(questions_for).unwrap_or(&[])
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        match self.view {
            ViewState::Form { path, step } => questions_for(path).get(step),
            _ => None,
        }
    }

    /// Fraction of the form completed, for the progress bar.
    pub fn progress(&self) -> f32 {
        match self.view {
            ViewState::Form { path, step } | ViewState::Submitting { path, step } => {
                (step + 1) as f32 / questions_for(path).len() as f32
            }
            ViewState::Success { .. } => 1.0,
            ViewState::Selection => 0.0,
        }
    }

    pub fn answer(&self, field: FieldId) -> Option<&str> {
        self.answers.get(&field).map(String::as_str)
    }

    pub fn has_answers(&self) -> bool {
        !self.answers.is_empty()
    }

    pub fn budget(&self) -> &BudgetSlider {
        &self.budget
    }

    pub fn focused_field(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn select_path(&mut self, path: FormPath) {
        if self.view.is_submitting() {
            debug!("Ignoring path selection while submitting");
            return;
        }

        self.reset_session();
        self.view = ViewState::Form { path, step: 0 };
        info!("Contact path selected: {}", path);
        self.emit(WizardEvent::PathSelected {
            path,
            total_steps: questions_for(path).len(),
        });
    }

    /// Leaves the form for the path selection screen, discarding entered data.
    pub fn change_path(&mut self) -> Result<(), WizardError> {
        match self.view {
            ViewState::Form { .. } => {
                self.return_to_selection();
                Ok(())
            }
            _ => Err(WizardError::NotInForm),
        }
    }

    pub fn dismiss_success(&mut self) {
        if let ViewState::Success { .. } = self.view {
            self.return_to_selection();
        }
    }

    /// Writes the current step's free-text field.
    pub fn set_answer(&mut self, value: impl Into<String>) -> Result<(), WizardError> {
        let question = self.current_question().ok_or(WizardError::NotInForm)?;
        if !question.kind.is_free_text() {
            return Err(WizardError::BudgetStepRequiresSlider);
        }
        self.answers.insert(question.field, value.into());
        Ok(())
    }

    pub fn set_budget(&mut self, value: u32) -> Result<u32, WizardError> {
        let question = self.budget_question()?;
        let value = self.budget.set(value);
        let bracket = self.budget.bracket();
        self.answers.insert(question.field, bracket.clone());
        self.emit(WizardEvent::BudgetChanged { value, bracket });
        Ok(value)
    }

    /// Marks the budget as undecided and moves on. Skipping counts as an answer.
    pub async fn skip_budget(&mut self) -> Result<StepOutcome, WizardError> {
        let question = self.budget_question()?;
        self.budget.skip();
        self.answers
            .insert(question.field, BUDGET_SKIP_SENTINEL.to_string());
        self.emit(WizardEvent::BudgetSkipped);
        self.next().await
    }

    pub fn focus_field(&mut self) {
        if let Some(question) = self.current_question() {
            self.focused = Some(question.field);
            self.emit(WizardEvent::FieldFocused {
                field: question.field,
                label: question.label,
            });
        }
    }

    pub fn blur_field(&mut self) {
        if let Some(field) = self.focused.take() {
            let label = self
                .questions()
                .iter()
                .find(|q| q.field == field)
                .map(|q| q.label)
                .unwrap_or_default();
            self.emit(WizardEvent::FieldBlurred { field, label });
        }
    }

    pub async fn handle_key(&mut self, key: KeyInput) -> Result<StepOutcome, WizardError> {
        match key {
            KeyInput::Enter { shift: false } => self.next().await,
            KeyInput::Enter { shift: true } | KeyInput::Other => Ok(StepOutcome::Ignored),
        }
    }

    /// Validates the current step, then advances or submits on the last step.
    pub async fn next(&mut self) -> Result<StepOutcome, WizardError> {
        let (path, step) = match self.view {
            ViewState::Form { path, step } => (path, step),
            ViewState::Submitting { .. } => return Ok(StepOutcome::Ignored),
            _ => return Err(WizardError::NotInForm),
        };

        let questions = questions_for(path);
        let question = &questions[step];

        if !question.kind.accepts(self.answer(question.field)) {
            debug!("Step {} rejected: {} is empty", step, question.field.as_str());
            self.emit(WizardEvent::ValidationRejected {
                step,
                field: question.field,
            });
            return Ok(StepOutcome::Rejected { step });
        }

        if step + 1 < questions.len() {
            self.focused = None;
            self.view = ViewState::Form {
                path,
                step: step + 1,
            };
            self.emit(WizardEvent::StepChanged {
                from: step,
                to: step + 1,
                total_steps: questions.len(),
            });
            Ok(StepOutcome::Advanced { step: step + 1 })
        } else {
            self.submit().await
        }
    }

    pub fn back(&mut self) {
        if let ViewState::Form { path, step } = self.view {
            if step > 0 {
                self.focused = None;
                self.view = ViewState::Form {
                    path,
                    step: step - 1,
                };
                self.emit(WizardEvent::StepChanged {
                    from: step,
                    to: step - 1,
                    total_steps: questions_for(path).len(),
                });
            }
        }
    }

    /// Runs the whole submission in one call.
    pub async fn submit(&mut self) -> Result<StepOutcome, WizardError> {
        let submission = match self.begin_submission()? {
            Some(submission) => submission,
            None => return Ok(StepOutcome::Ignored),
        };
        let outcome = submission.execute().await;
        self.finish_submission(outcome)
    }

    /// Enters `Submitting` and hands back the work to run. Returns `None` if a
    /// submission is already in flight, so a second trigger cannot insert twice.
    ///
    /// Only the final step submits, and every required question must hold an
    /// accepted answer. A missing one is reported like a rejected step.
    ///
    /// Event loops that must not hold the wizard across the network calls use
    /// this with [`PendingSubmission::execute`] and [`FormWizard::finish_submission`].
    pub fn begin_submission(&mut self) -> Result<Option<PendingSubmission>, WizardError> {
        let (path, step) = match self.view {
            ViewState::Form { path, step } => (path, step),
            ViewState::Submitting { .. } => {
                debug!("Submission already in flight, ignoring trigger");
                return Ok(None);
            }
            _ => return Err(WizardError::NotInForm),
        };

        if step + 1 != questions_for(path).len() {
            return Err(WizardError::NotFinalStep);
        }

        if let Some((missing_step, question)) = self.first_incomplete(path) {
            debug!("Submission blocked: {} is missing", question.field.as_str());
            self.emit(WizardEvent::ValidationRejected {
                step: missing_step,
                field: question.field,
            });
            return Err(WizardError::Incomplete {
                step: missing_step,
                field: question.field,
            });
        }

        let record = self.build_record(path);
        self.view = ViewState::Submitting { path, step };
        self.emit(WizardEvent::SubmissionStarted { path });

        Ok(Some(PendingSubmission {
            table: path.table(),
            record,
            persistence: self.persistence.clone(),
            notification: self.notification.clone(),
            events: self.events.clone(),
        }))
    }

    pub fn finish_submission(
        &mut self,
        outcome: SubmissionOutcome,
    ) -> Result<StepOutcome, WizardError> {
        let (path, step) = match self.view {
            ViewState::Submitting { path, step } => (path, step),
            _ => return Err(WizardError::NotInForm),
        };

        match outcome.result {
            Ok(()) => {
                self.view = ViewState::Success { path };
                self.emit(WizardEvent::Submitted {
                    path,
                    table: path.table(),
                    demo_mode: outcome.demo_mode,
                });
                Ok(StepOutcome::Submitted {
                    demo_mode: outcome.demo_mode,
                })
            }
            Err(err) => {
                error!("Error submitting {} form: {}", path, err);
                self.view = ViewState::Form { path, step };
                self.emit(WizardEvent::SubmissionFailed {
                    message: "Error submitting. Please try again.".to_string(),
                });
                Err(WizardError::Persistence(err))
            }
        }
    }

    /// First required question whose answer its kind does not accept.
    /// Optional questions may be blank here and default to `""` in the record.
    fn first_incomplete(&self, path: FormPath) -> Option<(usize, &'static Question)> {
        questions_for(path).iter().enumerate().find(|(_, question)| {
            let answer = self.answer(question.field);
            let blank = answer.map_or(true, |v| v.trim().is_empty());
            !(question.optional && blank) && !question.kind.accepts(answer)
        })
    }

    fn build_record(&self, path: FormPath) -> SubmissionRecord {
        let value = |field: FieldId| {
            self.answers
                .get(&field)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        match path {
            FormPath::General => SubmissionRecord::Inquiry(InquiryRecord {
                full_name: value(FieldId::FullName),
                email: value(FieldId::Email),
                subject: value(FieldId::Subject),
                message: value(FieldId::Message),
            }),
            FormPath::Service => {
                let budget_bracket = self
                    .answers
                    .get(&FieldId::BudgetBracket)
                    .filter(|v| !v.is_empty())
                    .cloned()
                    .unwrap_or_else(|| self.budget.bracket());

                SubmissionRecord::ServiceRequest(ServiceRequestRecord {
                    client_name: value(FieldId::ClientName),
                    email: value(FieldId::Email),
                    company_url: value(FieldId::CompanyUrl),
                    service_type: value(FieldId::ServiceType),
                    budget_bracket,
                    timeline: value(FieldId::Timeline),
                    aesthetic_vibe: value(FieldId::AestheticVibe),
                    project_goal: value(FieldId::ProjectGoal),
                })
            }
        }
    }

    fn budget_question(&self) -> Result<&'static Question, WizardError> {
        let question = self.current_question().ok_or(WizardError::NotInForm)?;
        match question.kind {
            FieldKind::BudgetSlider => Ok(question),
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => {
                Err(WizardError::NotBudgetStep)
            }
        }
    }

    fn return_to_selection(&mut self) {
        self.reset_session();
        self.view = ViewState::Selection;
        self.emit(WizardEvent::ReturnedToSelection);
    }

    fn reset_session(&mut self) {
        self.answers.clear();
        self.budget = BudgetSlider::new(self.budget_config);
        self.focused = None;
    }

    fn emit(&self, event: WizardEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// A finalized record on its way to the collaborators.
pub struct PendingSubmission {
    table: Table,
    record: SubmissionRecord,
    persistence: PersistenceClient,
    notification: NotificationClient,
    events: broadcast::Sender<WizardEvent>,
}

#[derive(Debug)]
pub struct SubmissionOutcome {
    pub result: Result<(), AppError>,
    pub demo_mode: bool,
}

impl PendingSubmission {
    pub fn record(&self) -> &SubmissionRecord {
        &self.record
    }

    pub fn table(&self) -> Table {
        self.table
    }

    /// Inserts the record, then (service path only) notifies. The notification
    /// never runs before the insert resolves and its failure is not fatal.
    pub async fn execute(self) -> SubmissionOutcome {
        let store = match &self.persistence {
            PersistenceClient::Configured(store) => store.clone(),
            PersistenceClient::Unconfigured => {
                warn!("Persistence not configured. Showing success state for demo.");
                return SubmissionOutcome {
                    result: Ok(()),
                    demo_mode: true,
                };
            }
        };

        if let Err(err) = store.insert(self.table, &self.record).await {
            return SubmissionOutcome {
                result: Err(err),
                demo_mode: false,
            };
        }
        info!("Submission stored in {} via {}", self.table, store.name());

        if let (Some(request), NotificationClient::Configured(notifier)) =
            (self.record.as_service_request(), &self.notification)
        {
            match notifier.notify(request).await {
                Ok(response) => {
                    debug!("Brief notification sent: {}", response.message);
                    let _ = self.events.send(WizardEvent::NotificationSent {
                        message: response.message,
                    });
                }
                Err(err) => {
                    warn!("Brief notification failed: {}", err);
                    let _ = self.events.send(WizardEvent::NotificationFailed {
                        message: err.to_string(),
                    });
                }
            }
        }

        SubmissionOutcome {
            result: Ok(()),
            demo_mode: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::fields::SERVICE_QUESTIONS;

    fn demo_wizard() -> FormWizard {
        FormWizard::new(
            PersistenceClient::Unconfigured,
            NotificationClient::Unconfigured,
            BudgetConfig::default(),
        )
    }

    #[test]
    fn test_starts_in_selection() {
        let wizard = demo_wizard();
        assert_eq!(wizard.view(), ViewState::Selection);
        assert_eq!(wizard.current_step(), 0);
        assert!(wizard.questions().is_empty());
        assert_eq!(wizard.progress(), 0.0);
        assert!(wizard.is_demo_mode());
    }

    #[tokio::test]
    async fn test_back_and_progress() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::General);
        assert_eq!(wizard.progress(), 0.25);

        wizard.back();
        assert_eq!(wizard.current_step(), 0);

        wizard.set_answer("Amara Lindqvist").unwrap();
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Advanced { step: 1 });
        assert_eq!(wizard.progress(), 0.5);

        wizard.back();
        assert_eq!(wizard.current_step(), 0);
        assert_eq!(wizard.answer(FieldId::FullName), Some("Amara Lindqvist"));
    }

    #[test]
    fn test_operations_outside_form_are_rejected() {
        let mut wizard = demo_wizard();
        assert!(matches!(wizard.set_answer("x"), Err(WizardError::NotInForm)));
        assert!(matches!(wizard.change_path(), Err(WizardError::NotInForm)));
        assert!(matches!(wizard.set_budget(20_000), Err(WizardError::NotInForm)));
    }

    #[test]
    fn test_budget_only_on_budget_step() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::Service);
        assert!(matches!(wizard.set_budget(20_000), Err(WizardError::NotBudgetStep)));
    }

    #[tokio::test]
    async fn test_free_text_setter_refuses_budget_step() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::Service);
        for value in ["Oren Vale", "oren@example.com", "https://vale.studio", "Branding"] {
            wizard.set_answer(value).unwrap();
            wizard.next().await.unwrap();
        }

        assert_eq!(wizard.current_question().map(|q| q.kind), Some(FieldKind::BudgetSlider));
        assert!(matches!(
            wizard.set_answer("$1"),
            Err(WizardError::BudgetStepRequiresSlider)
        ));
    }

    #[tokio::test]
    async fn test_keyboard_enter_advances() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::General);
        wizard.set_answer("Amara Lindqvist").unwrap();

        assert_eq!(
            wizard.handle_key(KeyInput::Enter { shift: true }).await.unwrap(),
            StepOutcome::Ignored
        );
        assert_eq!(
            wizard.handle_key(KeyInput::Enter { shift: false }).await.unwrap(),
            StepOutcome::Advanced { step: 1 }
        );
    }

    #[tokio::test]
    async fn test_focus_and_blur_emit_label_events() {
        let mut wizard = demo_wizard();
        let mut events = wizard.subscribe();
        wizard.select_path(FormPath::General);
        wizard.focus_field();
        assert_eq!(wizard.focused_field(), Some(FieldId::FullName));
        wizard.blur_field();
        assert_eq!(wizard.focused_field(), None);

        assert!(matches!(events.recv().await.unwrap(), WizardEvent::PathSelected { .. }));
        assert_eq!(
            events.recv().await.unwrap(),
            WizardEvent::FieldFocused {
                field: FieldId::FullName,
                label: "01. IDENTITY"
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            WizardEvent::FieldBlurred {
                field: FieldId::FullName,
                label: "01. IDENTITY"
            }
        );
    }

    #[test]
    fn test_blank_optional_answers_do_not_block_submission() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::Service);
        for (field, value) in [
            (FieldId::ClientName, " Oren Vale "),
            (FieldId::Email, "oren@example.com"),
            (FieldId::ServiceType, "Branding"),
            (FieldId::ProjectGoal, "Relaunch"),
        ] {
            wizard.answers.insert(field, value.to_string());
        }
        wizard.view = ViewState::Form {
            path: FormPath::Service,
            step: SERVICE_QUESTIONS.len() - 1,
        };

        let pending = wizard.begin_submission().unwrap().unwrap();
        let request = pending.record().as_service_request().unwrap();
        assert_eq!(request.client_name, "Oren Vale");
        assert_eq!(request.company_url, "");
        assert_eq!(request.timeline, "");
        assert_eq!(request.aesthetic_vibe, "");
        assert_eq!(request.budget_bracket, "$10,000");
    }

    #[test]
    fn test_blank_required_answer_blocks_submission() {
        let mut wizard = demo_wizard();
        wizard.select_path(FormPath::Service);
        wizard.answers.insert(FieldId::ClientName, "Oren Vale".to_string());
        wizard.answers.insert(FieldId::Email, "oren@example.com".to_string());
        wizard.answers.insert(FieldId::ProjectGoal, "Relaunch".to_string());
        wizard.view = ViewState::Form {
            path: FormPath::Service,
            step: SERVICE_QUESTIONS.len() - 1,
        };

        assert!(matches!(
            wizard.begin_submission(),
            Err(WizardError::Incomplete {
                step: 3,
                field: FieldId::ServiceType
            })
        ));
        assert!(!wizard.is_submitting());
    }

    #[tokio::test]
    async fn test_from_default_config_is_demo_mode() {
        let wizard = FormWizard::from_config(&AppConfig::default()).await.unwrap();
        assert!(wizard.is_demo_mode());
        assert_eq!(wizard.budget().value(), 10_000);
    }
}
