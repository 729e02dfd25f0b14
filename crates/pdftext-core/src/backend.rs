use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("PDF is encrypted or password protected")]
    Encrypted,
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Implementors only produce per-page text; joining pages into the output
/// artifact lives in [`crate::text::extract_text`].
pub trait PdfBackend: Send + Sync {
    /// Extract the visible text of every page, in document order.
    ///
    /// Each entry holds one page's lines joined by `'\n'`, without a
    /// trailing newline.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;
}
