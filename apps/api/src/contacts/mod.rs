/// Contacts client — the single point of entry for writes to the Brevo contact list.
///
/// Handlers never talk to Brevo directly; they go through `ContactSink` so tests
/// can substitute a recording double.
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "API error (status {status}): {}",
        message.as_deref().unwrap_or("no message in response body")
    )]
    Api { status: u16, message: Option<String> },
}

/// Contact attributes stored on the Brevo record. Names match the attributes
/// configured on the contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactAttributes {
    #[serde(rename = "FIRSTNAME")]
    pub first_name: String,
    #[serde(rename = "LASTNAME")]
    pub last_name: String,
    #[serde(rename = "HOURS")]
    pub hours: String,
    #[serde(rename = "AMOUNT")]
    pub amount: String,
    #[serde(rename = "UNIQUE")]
    pub reference: String,
}

/// Create-or-update request keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub email: String,
    pub attributes: ContactAttributes,
    pub list_ids: Vec<u64>,
    pub update_enabled: bool,
}

#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn create_contact(&self, contact: &NewContact) -> Result<(), ContactError>;
}

#[derive(Debug, Deserialize)]
struct BrevoError {
    message: String,
}

#[derive(Clone)]
pub struct BrevoClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl BrevoClient {
    pub fn new(api_url: String, api_key: String) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .build()
                .context("Failed to build HTTP client")?,
            api_url,
            api_key,
        })
    }
}

#[async_trait]
impl ContactSink for BrevoClient {
    /// Single attempt, no retries. The applicant resubmits on failure.
    async fn create_contact(&self, contact: &NewContact) -> Result<(), ContactError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(contact)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContactError::Api {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        debug!("Brevo accepted contact (status {})", status.as_u16());
        Ok(())
    }
}

/// Pulls `message` out of a Brevo error body; `None` when the body is not the expected JSON.
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<BrevoError>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.trim().is_empty())
}
