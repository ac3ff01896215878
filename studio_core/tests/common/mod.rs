#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use studio_core::{
    error::{AppError, Result},
    models::{MessageResponse, ServiceRequestRecord, SubmissionRecord, Table},
    notification::{Mailer, Notifier, OutgoingEmail},
    persistence::SubmissionStore,
};

#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inserts: Arc<Mutex<Vec<(Table, SubmissionRecord)>>>,
    pub fail: bool,
    pub delay: Option<Duration>,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.inserts.lock().len()
    }

    pub fn recorded(&self) -> Vec<(Table, SubmissionRecord)> {
        self.inserts.lock().clone()
    }
}

#[async_trait]
impl SubmissionStore for RecordingStore {
    async fn insert(&self, table: Table, record: &SubmissionRecord) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(AppError::Upstream("insert rejected".to_string()));
        }
        self.inserts.lock().push((table, record.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<ServiceRequestRecord>>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, record: &ServiceRequestRecord) -> Result<MessageResponse> {
        self.sent.lock().push(record.clone());
        if self.fail {
            return Err(AppError::Upstream("brief endpoint returned 500".to_string()));
        }
        Ok(MessageResponse::new("Transmission Successful"))
    }
}

#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        if self.fail {
            return Err(AppError::Mail("mail API returned 422".to_string()));
        }
        self.sent.lock().push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
