//! Axum route handlers for the application form.

use axum::{
    extract::{Multipart, Query, State},
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info};

use crate::application::form::{ApplicationForm, FormField, Submission};
use crate::application::page::{render_confirmation_page, render_form_page};
use crate::application::upload::{FileSource, UploadedFile};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart part carrying the optional CV.
pub const RESUME_FIELD: &str = "resume";
/// `"drop"` when the page received the CV by drag and drop, otherwise absent or `"picker"`.
pub const RESUME_SOURCE_FIELD: &str = "resume_source";

/// Room for a 10MB file plus the text fields and multipart framing.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ConfirmationQuery {
    pub email: Option<String>,
}

/// GET /
pub async fn handle_form_page() -> Html<String> {
    Html(render_form_page())
}

/// GET /application-submitted
pub async fn handle_confirmation_page(Query(query): Query<ConfirmationQuery>) -> Html<String> {
    Html(render_confirmation_page(query.email.as_deref()))
}

/// POST /api/v1/applications
///
/// Builds a form from the multipart body and submits it. The CV is validated
/// but not forwarded to the contact service.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Submission>, AppError> {
    let mut form = ApplicationForm::new();
    let mut resume = None;
    let mut source = FileSource::Picker;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == RESUME_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().map(str::to_owned);
            let data: Bytes = field.bytes().await?;

            // Browsers send an empty, unnamed part when no file was chosen.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }

            resume = Some(UploadedFile {
                name: file_name,
                size: data.len() as u64,
                content_type,
            });
            continue;
        }

        if name == RESUME_SOURCE_FIELD {
            if field.text().await? == "drop" {
                source = FileSource::Drop;
            }
            continue;
        }

        match FormField::from_name(&name) {
            Some(form_field) => {
                let value = field.text().await?;
                form.set_field(form_field, value);
            }
            None => debug!("Ignoring unknown form field '{name}'"),
        }
    }

    if let Some(file) = resume {
        form.select_file(source, file)?;
    }
    if let (Some(file), Some(source)) = (form.resume().file(), form.resume().source()) {
        debug!(
            "Application includes CV '{}' ({} bytes, {:?}, via {:?})",
            file.name, file.size, file.content_type, source
        );
    }

    let _latch = state
        .latch
        .try_acquire(form.field(FormField::Email))
        .ok_or(AppError::SubmissionInProgress)?;

    let submission = form
        .submit(state.contacts.as_ref(), &state.submission)
        .await?;

    info!(reference = %submission.reference, "Application submitted");
    Ok(Json(submission))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::form::SubmissionSettings;
    use crate::application::latch::SubmissionLatch;
    use crate::application::test_support::{filled_fields, RecordingSink};
    use crate::routes::build_router;
    use crate::state::AppState;

    use super::*;

    const BOUNDARY: &str = "X-APPLY-BOUNDARY";

    struct FilePart<'a> {
        name: &'a str,
        content_type: &'a str,
        data: Vec<u8>,
    }

    fn app(sink: Arc<RecordingSink>) -> (Router, SubmissionLatch) {
        let latch = SubmissionLatch::default();
        let state = AppState {
            contacts: sink,
            submission: SubmissionSettings::new(
                7,
                "https://jobs.example.org/application-submitted",
            )
            .unwrap(),
            latch: latch.clone(),
        };
        (build_router(state), latch)
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(file) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{RESUME_FIELD}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(&file.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn filled_pairs() -> Vec<(&'static str, &'static str)> {
        filled_fields()
            .into_iter()
            .map(|(field, value)| (field.name(), value))
            .collect()
    }

    fn submit_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/applications")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_full_submission_redirects_to_confirmation() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());

        let response = app
            .oneshot(submit_request(multipart_body(&filled_pairs(), None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["amount"], "£330");
        assert_eq!(
            body["redirect_url"],
            "https://jobs.example.org/application-submitted?email=ada%40example.org"
        );

        let calls = sink.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].attributes.hours, "20");
        assert_eq!(calls[0].attributes.amount, "£330");
        assert_eq!(body["reference"], calls[0].attributes.reference.as_str());
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());
        let fields: Vec<_> = filled_pairs()
            .into_iter()
            .filter(|(name, _)| *name != "about_you")
            .collect();

        let response = app
            .oneshot(submit_request(multipart_body(&fields, None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Please fill in all required fields."
        );
        assert_eq!(sink.call_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_cv_is_accepted_and_not_forwarded() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());
        let file = FilePart {
            name: "cv.pdf",
            content_type: "application/pdf",
            data: b"%PDF-1.4 fake".to_vec(),
        };

        let response = app
            .oneshot(submit_request(multipart_body(&filled_pairs(), Some(file))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload = serde_json::to_value(&sink.calls()[0]).unwrap();
        assert!(!payload.to_string().contains("cv.pdf"));
    }

    #[tokio::test]
    async fn test_dropped_cv_is_validated_the_same_way() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());
        let mut fields = filled_pairs();
        fields.push((RESUME_SOURCE_FIELD, "drop"));

        let ok = app
            .clone()
            .oneshot(submit_request(multipart_body(
                &fields,
                Some(FilePart {
                    name: "cv.docx",
                    content_type: "application/octet-stream",
                    data: b"PK fake docx".to_vec(),
                }),
            )))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let rejected = app
            .oneshot(submit_request(multipart_body(
                &fields,
                Some(FilePart {
                    name: "cv.jpg",
                    content_type: "image/jpeg",
                    data: b"jpeg".to_vec(),
                }),
            )))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(sink.call_count(), 1);
    }

    #[tokio::test]
    async fn test_disallowed_cv_blocks_submission() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());
        let file = FilePart {
            name: "cv.txt",
            content_type: "text/plain",
            data: b"hello".to_vec(),
        };

        let response = app
            .oneshot(submit_request(multipart_body(&filled_pairs(), Some(file))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["error"]["message"],
            "Please upload a PDF, DOC, or DOCX file."
        );
        assert_eq!(sink.call_count(), 0);
    }

    #[tokio::test]
    async fn test_oversized_cv_blocks_submission() {
        let sink = Arc::new(RecordingSink::default());
        let (app, _) = app(sink.clone());
        let file = FilePart {
            name: "cv.pdf",
            content_type: "application/pdf",
            data: vec![0u8; 10 * 1024 * 1024 + 1],
        };

        let response = app
            .oneshot(submit_request(multipart_body(&filled_pairs(), Some(file))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["message"], "File size must be less than 10MB.");
        assert_eq!(sink.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_bad_gateway_with_message() {
        let sink = Arc::new(RecordingSink::failing(400, Some("Contact list not found")));
        let (app, latch) = app(sink.clone());

        let response = app
            .oneshot(submit_request(multipart_body(&filled_pairs(), None)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "REMOTE_SUBMISSION_ERROR");
        assert_eq!(body["error"]["message"], "Contact list not found");
        assert!(!latch.is_held("ada@example.org"));
    }

    #[tokio::test]
    async fn test_duplicate_submit_in_flight_makes_one_call() {
        let sink = Arc::new(RecordingSink::slow(Duration::from_millis(50)));
        let (app, latch) = app(sink.clone());

        let first = app
            .clone()
            .oneshot(submit_request(multipart_body(&filled_pairs(), None)));
        let second = app.oneshot(submit_request(multipart_body(&filled_pairs(), None)));
        let (first, second) = tokio::join!(first, second);

        let mut statuses = vec![first.unwrap().status(), second.unwrap().status()];
        statuses.sort();
        assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
        assert_eq!(sink.call_count(), 1);
        assert!(!latch.is_held("ada@example.org"));
    }

    #[tokio::test]
    async fn test_form_page_renders() {
        let (app, _) = app(Arc::new(RecordingSink::default()));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/api/v1/applications"));
    }

    #[tokio::test]
    async fn test_confirmation_page_shows_email() {
        let (app, _) = app(Arc::new(RecordingSink::default()));

        let response = app
            .oneshot(
                Request::get("/application-submitted?email=ada%40example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("ada@example.org"));
    }
}
