//! Question catalogs for both contact paths

use serde::Serialize;
use validator::ValidateEmail;

use crate::models::FormPath;

/// Every field either record shape can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    FullName,
    Email,
    Subject,
    Message,
    ClientName,
    CompanyUrl,
    ServiceType,
    BudgetBracket,
    Timeline,
    AestheticVibe,
    ProjectGoal,
}

impl FieldId {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::FullName => "full_name",
            FieldId::Email => "email",
            FieldId::Subject => "subject",
            FieldId::Message => "message",
            FieldId::ClientName => "client_name",
            FieldId::CompanyUrl => "company_url",
            FieldId::ServiceType => "service_type",
            FieldId::BudgetBracket => "budget_bracket",
            FieldId::Timeline => "timeline",
            FieldId::AestheticVibe => "aesthetic_vibe",
            FieldId::ProjectGoal => "project_goal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
    BudgetSlider,
}

impl FieldKind {
    /// Whether a step of this kind may be left with `value`.
    ///
    /// Email uses the same check as the brief endpoint's record validation.
    /// The slider always holds either a numeric default or the skip sentinel,
    /// so it never blocks.
    pub fn accepts(self, value: Option<&str>) -> bool {
        let filled = value.map(str::trim).filter(|v| !v.is_empty());
        match self {
            FieldKind::Text | FieldKind::Textarea => filled.is_some(),
            FieldKind::Email => filled.map_or(false, |v| v.to_string().validate_email()),
            FieldKind::BudgetSlider => true,
        }
    }

    pub fn is_free_text(self) -> bool {
        match self {
            FieldKind::Text | FieldKind::Email | FieldKind::Textarea => true,
            FieldKind::BudgetSlider => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    pub field: FieldId,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    /// Optional fields fall back to an empty value in the final record.
    pub optional: bool,
}

impl Question {
    const fn new(
        id: &'static str,
        label: &'static str,
        prompt: &'static str,
        field: FieldId,
        kind: FieldKind,
        placeholder: Option<&'static str>,
    ) -> Self {
        Self {
            id,
            label,
            prompt,
            field,
            kind,
            placeholder,
            optional: false,
        }
    }

    const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

pub const GENERAL_QUESTIONS: &[Question] = &[
    Question::new("g1", "01. IDENTITY", "What is your name?", FieldId::FullName, FieldKind::Text, Some("Enter your name...")),
    Question::new("g2", "02. CONTACT", "Your email address?", FieldId::Email, FieldKind::Email, Some("email@domain.com")),
    Question::new("g3", "03. CONTEXT", "What is the subject?", FieldId::Subject, FieldKind::Text, Some("Brief topic...")),
    Question::new("g4", "04. TRANSMISSION", "What is your message?", FieldId::Message, FieldKind::Textarea, Some("Type your message...")),
];

pub const SERVICE_QUESTIONS: &[Question] = &[
    Question::new("s1", "01. THE CLIENT", "Who are we working with?", FieldId::ClientName, FieldKind::Text, Some("Your name or company...")),
    Question::new("s2", "02. THE FREQUENCY", "Best email to reach you?", FieldId::Email, FieldKind::Email, Some("email@domain.com")),
    Question::new("s3", "03. THE DIGITAL REAL ESTATE", "Company Website (Optional)", FieldId::CompanyUrl, FieldKind::Text, Some("https://...")).optional(),
    Question::new("s4", "04. THE BLUEPRINT", "What are we building?", FieldId::ServiceType, FieldKind::Text, Some("e.g. Web Architecture, Branding...")),
    Question::new("s5", "05. THE INVESTMENT", "Estimated Budget", FieldId::BudgetBracket, FieldKind::BudgetSlider, None),
    Question::new("s6", "06. THE TIMELINE", "Expected Launch Date", FieldId::Timeline, FieldKind::Text, Some("e.g. 3 Months / ASAP")).optional(),
    Question::new("s7", "07. THE AESTHETIC", "Desired Vibe", FieldId::AestheticVibe, FieldKind::Text, Some("Minimal, Brutalist, Cinematic...")).optional(),
    Question::new("s8", "08. THE MISSION", "Project Goal", FieldId::ProjectGoal, FieldKind::Textarea, Some("What defines success?")),
];

pub fn questions_for(path: FormPath) -> &'static [Question] {
    match path {
        FormPath::General => GENERAL_QUESTIONS,
        FormPath::Service => SERVICE_QUESTIONS,
    }
}
