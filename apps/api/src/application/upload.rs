//! Résumé selection: one optional file, validated the same way whether it was
//! picked or dropped.

use crate::application::form::ValidationError;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
}

impl UploadedFile {
    /// Lower-cased extension after the last dot, if any.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Picker,
    Drop,
}

/// Size is checked before type, so an oversized file is reported as too large
/// whatever its extension.
pub fn validate_file(file: &UploadedFile) -> Result<(), ValidationError> {
    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge);
    }

    match file.extension() {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::UnsupportedFileType),
    }
}

/// The accepted CV, if any, and how it arrived.
#[derive(Debug, Default, Clone)]
pub struct ResumeSlot {
    accepted: Option<(UploadedFile, FileSource)>,
}

impl ResumeSlot {
    pub fn file(&self) -> Option<&UploadedFile> {
        self.accepted.as_ref().map(|(file, _)| file)
    }

    pub fn source(&self) -> Option<FileSource> {
        self.accepted.as_ref().map(|(_, source)| *source)
    }

    /// Accepts or rejects a file. A rejected file also clears any file accepted earlier.
    pub fn select(&mut self, source: FileSource, file: UploadedFile) -> Result<(), ValidationError> {
        match validate_file(&file) {
            Ok(()) => {
                self.accepted = Some((file, source));
                Ok(())
            }
            Err(e) => {
                self.accepted = None;
                Err(e)
            }
        }
    }
}
