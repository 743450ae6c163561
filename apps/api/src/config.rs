use anyhow::{Context, Result};

const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com/v3/contacts";
const DEFAULT_SITE_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub brevo_api_key: String,
    pub brevo_api_url: String,
    pub brevo_list_id: u64,
    /// Public origin of the site hosting the confirmation page, without a trailing slash.
    pub site_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            brevo_api_key: require_env("BREVO_API_KEY")?,
            brevo_api_url: std::env::var("BREVO_API_URL")
                .unwrap_or_else(|_| DEFAULT_BREVO_API_URL.to_string()),
            brevo_list_id: require_env("BREVO_LIST_ID")?
                .parse::<u64>()
                .context("BREVO_LIST_ID must be a positive integer")?,
            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Base URL of the confirmation page the browser is sent to after a successful submission.
    pub fn confirmation_url(&self) -> String {
        format!("{}/application-submitted", self.site_url)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            brevo_api_key: "test-key".to_string(),
            brevo_api_url: DEFAULT_BREVO_API_URL.to_string(),
            brevo_list_id: 7,
            site_url: "https://jobs.example.org".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
