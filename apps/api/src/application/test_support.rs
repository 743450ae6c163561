//! Shared doubles for application tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::form::{ApplicationForm, FormField, ENGLISH_LEVELS};
use crate::contacts::{ContactError, ContactSink, NewContact};

/// Records every contact it is asked to create. Optionally sleeps first and/or fails.
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<NewContact>>,
    delay: Option<Duration>,
    failure: Option<(u16, Option<String>)>,
}

impl RecordingSink {
    pub fn failing(status: u16, message: Option<&str>) -> Self {
        Self {
            failure: Some((status, message.map(str::to_string))),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<NewContact> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ContactSink for RecordingSink {
    async fn create_contact(&self, contact: &NewContact) -> Result<(), ContactError> {
        self.calls.lock().unwrap().push(contact.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some((status, message)) => Err(ContactError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Field values of a complete, valid application.
pub fn filled_fields() -> Vec<(FormField, &'static str)> {
    vec![
        (FormField::FirstName, "Ada"),
        (FormField::LastName, "Lovelace"),
        (FormField::Email, "ada@example.org"),
        (FormField::Over18, "yes"),
        (FormField::RightToWork, "yes"),
        (FormField::CriminalConvictions, "no"),
        (FormField::DbsCheck, "yes"),
        (FormField::AccessibilityNeeds, ""),
        (FormField::HoursPerWeek, "20"),
        (FormField::HasComputer, "yes"),
        (FormField::EnglishLevel, ENGLISH_LEVELS[0]),
        (FormField::OtherLanguages, "French"),
        (FormField::AboutYou, "I enjoy explaining maths to people."),
    ]
}

pub fn filled_form() -> ApplicationForm {
    let mut form = ApplicationForm::new();
    for (field, value) in filled_fields() {
        form.set_field(field, value);
    }
    form
}
