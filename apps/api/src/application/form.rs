//! ApplicationForm — field state, validation and the submit workflow.
//!
//! Lifecycle: `Idle → Validating → Submitting → Submitted`, or back to `Idle`
//! on failure. Nothing here knows about HTTP; handlers build a form from the
//! request and call `submit`, and the page shows the error message.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::quote::amount_for_hours;
use crate::application::reference::generate_reference;
use crate::application::upload::{FileSource, ResumeSlot, UploadedFile};
use crate::contacts::{ContactAttributes, ContactError, ContactSink, NewContact};

// ────────────────────────────────────────────────────────────────────────────
// Fields
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Over18,
    RightToWork,
    CriminalConvictions,
    DbsCheck,
    AccessibilityNeeds,
    HoursPerWeek,
    HasComputer,
    EnglishLevel,
    OtherLanguages,
    AboutYou,
}

impl FormField {
    pub const ALL: [FormField; 13] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Over18,
        FormField::RightToWork,
        FormField::CriminalConvictions,
        FormField::DbsCheck,
        FormField::AccessibilityNeeds,
        FormField::HoursPerWeek,
        FormField::HasComputer,
        FormField::EnglishLevel,
        FormField::OtherLanguages,
        FormField::AboutYou,
    ];

    /// Name used by the form page and the multipart body.
    pub fn name(self) -> &'static str {
        match self {
            FormField::FirstName => "first_name",
            FormField::LastName => "last_name",
            FormField::Email => "email",
            FormField::Over18 => "over_18",
            FormField::RightToWork => "right_to_work",
            FormField::CriminalConvictions => "criminal_convictions",
            FormField::DbsCheck => "dbs_check",
            FormField::AccessibilityNeeds => "accessibility_needs",
            FormField::HoursPerWeek => "hours_per_week",
            FormField::HasComputer => "has_computer",
            FormField::EnglishLevel => "english_level",
            FormField::OtherLanguages => "other_languages",
            FormField::AboutYou => "about_you",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn is_required(self) -> bool {
        !matches!(
            self,
            FormField::AccessibilityNeeds | FormField::OtherLanguages
        )
    }
}

/// The four English proficiency answers offered on the form.
pub const ENGLISH_LEVELS: &[&str] = &[
    "English is my first language",
    "I speak English fluently",
    "I speak English well but not fluently",
    "I am still learning English",
];

/// Flat field-name → value map. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFormState {
    values: BTreeMap<FormField, String>,
}

impl ApplicationFormState {
    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FormField, value: String) {
        self.values.insert(field, value);
    }

    /// Required fields that are empty or whitespace-only.
    pub fn missing_required(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| f.is_required() && self.get(*f).trim().is_empty())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please fill in all required fields.")]
    MissingRequiredFields,

    #[error("File size must be less than 10MB.")]
    FileTooLarge,

    #[error("Please upload a PDF, DOC, or DOCX file.")]
    UnsupportedFileType,
}

pub const CONNECTIVITY_MESSAGE: &str =
    "We couldn't submit your application. Please check your connection and try again.";

/// The contact service refused or never answered. `message` is safe to show the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteSubmissionError {
    pub message: String,
}

impl From<ContactError> for RemoteSubmissionError {
    fn from(e: ContactError) -> Self {
        let message = match e {
            ContactError::Api {
                message: Some(message),
                ..
            } => message,
            ContactError::Api { message: None, .. } | ContactError::Http(_) => {
                CONNECTIVITY_MESSAGE.to_string()
            }
        };
        RemoteSubmissionError { message }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteSubmissionError),
}

// ────────────────────────────────────────────────────────────────────────────
// Submission
// ────────────────────────────────────────────────────────────────────────────

/// Deployment-specific inputs to `submit`.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    list_id: u64,
    confirmation_url: Url,
}

impl SubmissionSettings {
    pub fn new(list_id: u64, confirmation_url: &str) -> Result<Self> {
        let confirmation_url = Url::parse(confirmation_url)
            .with_context(|| format!("Invalid confirmation URL '{confirmation_url}'"))?;
        Ok(Self {
            list_id,
            confirmation_url,
        })
    }

    /// Confirmation page URL carrying the applicant's email as a query parameter.
    pub fn redirect_for(&self, email: &str) -> String {
        let mut url = self.confirmation_url.clone();
        url.query_pairs_mut().append_pair("email", email);
        url.into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub reference: String,
    pub amount: String,
    pub redirect_url: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
    Submitted,
}

// ────────────────────────────────────────────────────────────────────────────
// ApplicationForm
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApplicationForm {
    state: ApplicationFormState,
    resume: ResumeSlot,
    phase: FormPhase,
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self {
            state: ApplicationFormState::default(),
            resume: ResumeSlot::default(),
            phase: FormPhase::Idle,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.state.set(field, value.into());
    }

    pub fn field(&self, field: FormField) -> &str {
        self.state.get(field)
    }

    pub fn resume(&self) -> &ResumeSlot {
        &self.resume
    }

    pub fn select_file(
        &mut self,
        source: FileSource,
        file: UploadedFile,
    ) -> Result<(), ValidationError> {
        self.resume.select(source, file)
    }

    /// Email is checked first, then the required list. Neither error names the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.state.get(FormField::Email).contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if !self.state.missing_required().is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }
        Ok(())
    }

    /// Validates, then writes one contact record. Any failure returns the form to
    /// `Idle` so the applicant can correct it and try again. Concurrent submits for
    /// the same applicant are kept out by `SubmissionLatch`, not here.
    pub async fn submit(
        &mut self,
        sink: &dyn ContactSink,
        settings: &SubmissionSettings,
    ) -> Result<Submission, SubmitError> {
        self.phase = FormPhase::Validating;
        if let Err(e) = self.validate() {
            return Err(self.fail(e.into()));
        }

        self.phase = FormPhase::Submitting;
        let reference = generate_reference(&mut rand::thread_rng());
        let contact = self.contact(&reference, settings.list_id);

        if let Err(e) = sink.create_contact(&contact).await {
            warn!(reference = %reference, "Contact service rejected application: {e}");
            return Err(self.fail(RemoteSubmissionError::from(e).into()));
        }

        self.phase = FormPhase::Submitted;
        info!(reference = %reference, hours = %contact.attributes.hours, "Application recorded");

        Ok(Submission {
            redirect_url: settings.redirect_for(&contact.email),
            amount: contact.attributes.amount,
            reference,
            submitted_at: Utc::now(),
        })
    }

    fn fail(&mut self, error: SubmitError) -> SubmitError {
        debug!(phase = ?self.phase, "Submission stopped: {error}");
        self.phase = FormPhase::Idle;
        error
    }

    fn contact(&self, reference: &str, list_id: u64) -> NewContact {
        let value = |f| self.state.get(f).trim().to_string();
        let hours = value(FormField::HoursPerWeek);

        NewContact {
            email: value(FormField::Email),
            attributes: ContactAttributes {
                first_name: value(FormField::FirstName),
                last_name: value(FormField::LastName),
                amount: amount_for_hours(&hours),
                hours,
                reference: reference.to_string(),
            },
            list_ids: vec![list_id],
            update_enabled: true,
        }
    }
}

#[cfg(test)]
impl ApplicationForm {
    pub fn phase(&self) -> FormPhase {
        self.phase
    }
}
