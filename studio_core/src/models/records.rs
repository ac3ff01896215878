//! Submission records produced by the contact wizard

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Written into `budget_bracket` when the client skips the budget slider.
pub const BUDGET_SKIP_SENTINEL: &str = "Undecided / TBD";

/// The two contact paths. Chosen once per session, before any field is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPath {
    General,
    Service,
}

impl FormPath {
    pub fn table(self) -> Table {
        match self {
            FormPath::General => Table::GeneralInquiries,
            FormPath::Service => Table::ServiceRequests,
        }
    }
}

impl fmt::Display for FormPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormPath::General => write!(f, "general"),
            FormPath::Service => write!(f, "service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    GeneralInquiries,
    ServiceRequests,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::GeneralInquiries => "general_inquiries",
            Table::ServiceRequests => "service_requests",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct InquiryRecord {
    #[validate(length(min = 1, message = "Name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ServiceRequestRecord {
    #[validate(length(min = 1, message = "Client name is required"))]
    pub client_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub company_url: String,

    #[serde(default)]
    pub service_type: String,

    #[serde(default)]
    pub budget_bracket: String,

    #[serde(default)]
    pub timeline: String,

    #[serde(default)]
    pub aesthetic_vibe: String,

    #[serde(default)]
    pub project_goal: String,
}

impl ServiceRequestRecord {
    pub fn budget_skipped(&self) -> bool {
        self.budget_bracket == BUDGET_SKIP_SENTINEL
    }
}

/// One finalized submission. The variant always matches the session's [`FormPath`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmissionRecord {
    Inquiry(InquiryRecord),
    ServiceRequest(ServiceRequestRecord),
}

impl SubmissionRecord {
    pub fn path(&self) -> FormPath {
        match self {
            SubmissionRecord::Inquiry(_) => FormPath::General,
            SubmissionRecord::ServiceRequest(_) => FormPath::Service,
        }
    }

    pub fn table(&self) -> Table {
        self.path().table()
    }

    pub fn email(&self) -> &str {
        match self {
            SubmissionRecord::Inquiry(record) => &record.email,
            SubmissionRecord::ServiceRequest(record) => &record.email,
        }
    }

    pub fn as_service_request(&self) -> Option<&ServiceRequestRecord> {
        match self {
            SubmissionRecord::ServiceRequest(record) => Some(record),
            SubmissionRecord::Inquiry(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_selects_table() {
        assert_eq!(FormPath::General.table().as_str(), "general_inquiries");
        assert_eq!(FormPath::Service.table().as_str(), "service_requests");
    }

    #[test]
    fn test_service_request_optional_fields_default() {
        let record: ServiceRequestRecord = serde_json::from_value(serde_json::json!({
            "client_name": "Oren Vale",
            "email": "oren@example.com",
        }))
        .unwrap();

        assert_eq!(record.company_url, "");
        assert_eq!(record.timeline, "");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_service_request_rejects_bad_email() {
        let record = ServiceRequestRecord {
            client_name: "Oren Vale".to_string(),
            email: "not-an-email".to_string(),
            company_url: String::new(),
            service_type: "Branding".to_string(),
            budget_bracket: BUDGET_SKIP_SENTINEL.to_string(),
            timeline: String::new(),
            aesthetic_vibe: String::new(),
            project_goal: "Launch".to_string(),
        };

        assert!(record.validate().is_err());
        assert!(record.budget_skipped());
    }

    #[test]
    fn test_submission_serializes_flat() {
        let record = SubmissionRecord::Inquiry(InquiryRecord {
            full_name: "Amara Lindqvist".to_string(),
            email: "amara@example.com".to_string(),
            subject: "Pricing".to_string(),
            message: "What are your rates?".to_string(),
        });

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["full_name"], "Amara Lindqvist");
        assert_eq!(record.table(), Table::GeneralInquiries);
    }
}
