use crate::application::form::{FormField, ValidationError, CONNECTIVITY_MESSAGE, ENGLISH_LEVELS};
use crate::application::quote::HOURS_OPTIONS;
use crate::application::templates::{CONFIRMATION_PAGE, FORM_PAGE};
use crate::application::upload::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};

const YES_NO_FIELDS: &[FormField] = &[
    FormField::Over18,
    FormField::RightToWork,
    FormField::CriminalConvictions,
    FormField::DbsCheck,
    FormField::HasComputer,
];

pub fn render_form_page() -> String {
    let hours_options: String = HOURS_OPTIONS
        .iter()
        .map(|h| format!(r#"<option value="{h}">{h} hours</option>"#))
        .collect();
    let english_options: String = ENGLISH_LEVELS
        .iter()
        .map(|level| {
            let level = escape_html(level);
            format!(r#"<option value="{level}">{level}</option>"#)
        })
        .collect();

    let mut page = FORM_PAGE
        .replace("{hours_options}", &hours_options)
        .replace("{english_options}", &english_options)
        .replace(
            "{max_upload_mb}",
            &(MAX_UPLOAD_BYTES / (1024 * 1024)).to_string(),
        )
        .replace("{max_upload_bytes}", &MAX_UPLOAD_BYTES.to_string())
        .replace(
            "{allowed_extensions}",
            &serde_json::to_string(ALLOWED_EXTENSIONS).unwrap_or_else(|_| "[]".to_string()),
        )
        .replace(
            "{file_too_large_message}",
            &ValidationError::FileTooLarge.to_string(),
        )
        .replace(
            "{unsupported_type_message}",
            &ValidationError::UnsupportedFileType.to_string(),
        )
        .replace("{connectivity_message}", CONNECTIVITY_MESSAGE);

    for field in YES_NO_FIELDS {
        let name = field.name();
        page = page.replace(&format!("{{yes_no:{name}}}"), &yes_no_select(name));
    }
    page
}

pub fn render_confirmation_page(email: Option<&str>) -> String {
    let recipient = match email.map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => format!(" from <strong>{}</strong>", escape_html(email)),
        None => String::new(),
    };
    CONFIRMATION_PAGE.replace("{recipient}", &recipient)
}

fn yes_no_select(name: &str) -> String {
    format!(
        r#"<select name="{name}"><option value="">Choose…</option><option value="yes">Yes</option><option value="no">No</option></select>"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
