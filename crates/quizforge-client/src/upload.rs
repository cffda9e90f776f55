//! Client-side validation for PDF uploads.

use bytes::Bytes;

use quizforge_core::{Error, Result};

/// Maximum accepted PDF size: 10 MiB.
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

/// Magic bytes every PDF starts with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A PDF file staged for upload.
///
/// Validation runs before any request is built so an invalid file never
/// produces network traffic; the messages match what the upload form shows
/// inline next to the field.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    file_name: String,
    bytes: Bytes,
}

impl PdfUpload {
    /// Stages a file from its name and contents.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Stages a file read from disk.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error if the file cannot be read.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::invalid_input()
                .with_message(format!("cannot read {}", path.display()))
                .with_source(e)
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.pdf".to_owned());
        Ok(Self::new(file_name, bytes))
    }

    /// The name sent as the multipart file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the staged file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the staged file is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The staged file contents.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Checks the upload constraints: at most 10 MiB, and the content must
    /// actually be a PDF.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error with a user-presentable message.
    pub fn validate(&self) -> Result<()> {
        if self.bytes.len() > MAX_PDF_BYTES {
            return Err(Error::invalid_input().with_message("PDF file must be less than 10MB"));
        }
        if !self.bytes.starts_with(PDF_MAGIC) {
            return Err(Error::invalid_input().with_message("File must be a PDF"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pdf_passes() {
        let upload = PdfUpload::new("notes.pdf", &b"%PDF-1.7 content"[..]);
        assert!(upload.validate().is_ok());
        assert_eq!(upload.file_name(), "notes.pdf");
    }

    #[test]
    fn test_non_pdf_content_rejected() {
        let upload = PdfUpload::new("notes.pdf", &b"<html></html>"[..]);
        let err = upload.validate().unwrap_err();
        assert_eq!(err.to_string(), "InvalidInput: File must be a PDF");
    }

    #[test]
    fn test_oversized_pdf_rejected() {
        let mut bytes = b"%PDF-1.7".to_vec();
        bytes.resize(MAX_PDF_BYTES + 1, 0);
        let upload = PdfUpload::new("big.pdf", bytes);
        let err = upload.validate().unwrap_err();
        assert_eq!(err.to_string(), "InvalidInput: PDF file must be less than 10MB");
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let mut bytes = b"%PDF-1.7".to_vec();
        bytes.resize(MAX_PDF_BYTES, 0);
        assert!(PdfUpload::new("max.pdf", bytes).validate().is_ok());
    }
}
