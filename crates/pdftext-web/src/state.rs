use std::sync::Arc;
use std::time::Duration;

use pdftext_core::{PdfBackend, SeparatorMode, Storage};

use crate::settings::Settings;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub storage: Storage,
    pub backend: Arc<dyn PdfBackend>,
    pub max_upload_bytes: u64,
    pub extraction_timeout: Duration,
    pub separator: SeparatorMode,
}

impl AppState {
    pub fn new(storage: Storage, backend: Arc<dyn PdfBackend>, settings: &Settings) -> Self {
        Self {
            storage,
            backend,
            max_upload_bytes: settings.max_upload_mb.saturating_mul(1024 * 1024),
            extraction_timeout: settings.extraction_timeout,
            separator: settings.separator,
        }
    }

    /// Request body cap handed to axum's `DefaultBodyLimit`.
    pub fn body_limit(&self) -> usize {
        usize::try_from(self.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD))
            .unwrap_or(usize::MAX)
    }
}
