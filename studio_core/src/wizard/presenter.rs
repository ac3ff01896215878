//! Turns wizard events into visual effects.
//!
//! The presenter is the only place that knows about shakes, slides and label
//! reveals; the wizard just broadcasts [`WizardEvent`]s.

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::wizard::events::WizardEvent;
use crate::wizard::fields::FieldId;
use crate::wizard::scramble::{ScrambleText, ALPHANUMERIC_GLYPHS, TICK_INTERVAL};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ShowSelection,
    EnterForm { total_steps: usize },
    SlideTo { step: usize, progress: f32 },
    Shake { step: usize },
    LabelFrame { field: FieldId, text: String },
    BudgetDisplay { text: String },
    DisableSubmit,
    ShowSuccess { demo_mode: bool },
    Alert { message: String },
}

/// Effects that follow directly from one event. Label reveals are stateful
/// and handled by [`Presenter::run`].
pub fn effect_for(event: &WizardEvent) -> Option<Effect> {
    match event {
        WizardEvent::PathSelected { total_steps, .. } => Some(Effect::EnterForm {
            total_steps: *total_steps,
        }),
        WizardEvent::StepChanged { to, total_steps, .. } => Some(Effect::SlideTo {
            step: *to,
            progress: (*to + 1) as f32 / *total_steps as f32,
        }),
        WizardEvent::ValidationRejected { step, .. } => Some(Effect::Shake { step: *step }),
        WizardEvent::BudgetChanged { bracket, .. } => Some(Effect::BudgetDisplay {
            text: bracket.clone(),
        }),
        WizardEvent::BudgetSkipped => Some(Effect::BudgetDisplay {
            text: "Undefined".to_string(),
        }),
        WizardEvent::SubmissionStarted { .. } => Some(Effect::DisableSubmit),
        WizardEvent::SubmissionFailed { message } => Some(Effect::Alert {
            message: message.clone(),
        }),
        WizardEvent::Submitted { demo_mode, .. } => Some(Effect::ShowSuccess {
            demo_mode: *demo_mode,
        }),
        WizardEvent::ReturnedToSelection => Some(Effect::ShowSelection),
        WizardEvent::FieldFocused { .. }
        | WizardEvent::FieldBlurred { .. }
        | WizardEvent::NotificationSent { .. }
        | WizardEvent::NotificationFailed { .. } => None,
    }
}

pub struct Presenter {
    events: broadcast::Receiver<WizardEvent>,
    label: Option<(FieldId, ScrambleText)>,
}

impl Presenter {
    pub fn new(events: broadcast::Receiver<WizardEvent>) -> Self {
        Self { events, label: None }
    }

    /// Applies effects until the wizard is dropped.
    pub async fn run<F>(mut self, mut apply: F)
    where
        F: FnMut(Effect),
    {
        let mut ticker = tokio::time::interval(TICK_INTERVAL);

        loop {
            tokio::select! {
                received = self.events.recv() => match received {
                    Ok(event) => self.handle(event, &mut apply),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Presenter lagged, {} events dropped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = ticker.tick(), if self.label.is_some() => self.frame(&mut apply),
            }
        }

        debug!("Presenter stopped");
    }

    fn handle<F: FnMut(Effect)>(&mut self, event: WizardEvent, apply: &mut F) {
        match &event {
            WizardEvent::FieldFocused { field, label } => {
                let mut scramble = ScrambleText::new(label, ALPHANUMERIC_GLYPHS);
                scramble.start();
                apply(Effect::LabelFrame {
                    field: *field,
                    text: scramble.display().to_string(),
                });
                self.label = Some((*field, scramble));
            }
            WizardEvent::FieldBlurred { field, label } => {
                self.label = None;
                apply(Effect::LabelFrame {
                    field: *field,
                    text: label.to_string(),
                });
            }
            _ => {}
        }

        if let Some(effect) = effect_for(&event) {
            apply(effect);
        }
    }

    fn frame<F: FnMut(Effect)>(&mut self, apply: &mut F) {
        if let Some((field, scramble)) = self.label.as_mut() {
            let running = scramble.tick();
            apply(Effect::LabelFrame {
                field: *field,
                text: scramble.display().to_string(),
            });
            if !running {
                self.label = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FormPath;

    #[test]
    fn test_effect_mapping() {
        assert_eq!(
            effect_for(&WizardEvent::ValidationRejected {
                step: 2,
                field: FieldId::Subject
            }),
            Some(Effect::Shake { step: 2 })
        );
        assert_eq!(
            effect_for(&WizardEvent::StepChanged {
                from: 0,
                to: 1,
                total_steps: 4
            }),
            Some(Effect::SlideTo {
                step: 1,
                progress: 0.5
            })
        );
        assert_eq!(
            effect_for(&WizardEvent::PathSelected {
                path: FormPath::Service,
                total_steps: 8
            }),
            Some(Effect::EnterForm { total_steps: 8 })
        );
        assert_eq!(
            effect_for(&WizardEvent::NotificationFailed {
                message: "down".to_string()
            }),
            None
        );
    }

    #[tokio::test]
    async fn test_run_applies_effects_until_closed() {
        let (sender, receiver) = broadcast::channel(16);
        let presenter = Presenter::new(receiver);

        sender
            .send(WizardEvent::PathSelected {
                path: FormPath::General,
                total_steps: 4,
            })
            .unwrap();
        sender
            .send(WizardEvent::FieldFocused {
                field: FieldId::FullName,
                label: "01. IDENTITY",
            })
            .unwrap();
        sender
            .send(WizardEvent::FieldBlurred {
                field: FieldId::FullName,
                label: "01. IDENTITY",
            })
            .unwrap();
        sender
            .send(WizardEvent::ValidationRejected {
                step: 0,
                field: FieldId::FullName,
            })
            .unwrap();
        drop(sender);

        let mut effects = Vec::new();
        presenter.run(|effect| effects.push(effect)).await;

        assert_eq!(effects.first(), Some(&Effect::EnterForm { total_steps: 4 }));
        assert_eq!(effects.last(), Some(&Effect::Shake { step: 0 }));
        assert!(effects.contains(&Effect::LabelFrame {
            field: FieldId::FullName,
            text: "01. IDENTITY".to_string(),
        }));
    }
}
