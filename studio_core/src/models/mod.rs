//! Data models shared by the wizard, the persistence clients and the HTTP handlers

pub mod projects;
pub mod records;
pub mod request;

pub use projects::{Project, ProjectCatalog};
pub use records::{FormPath, InquiryRecord, ServiceRequestRecord, SubmissionRecord, Table, BUDGET_SKIP_SENTINEL};
pub use request::MessageResponse;
