//! Mock extraction backend for testing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::backend::{BackendError, PdfBackend};

/// A configurable mock response for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return these page texts.
    Pages(Vec<String>),
    /// Return the file's bytes, lossily decoded, as a single page.
    ///
    /// Lets tests check that each request sees its own upload.
    EchoFile,
    /// Simulate a document that cannot be opened.
    Open(String),
    /// Simulate a password-protected document.
    Encrypted,
    /// Simulate a failure while reading a page.
    Extraction(String),
}

impl MockResponse {
    pub fn pages(pages: &[&str]) -> Self {
        MockResponse::Pages(pages.iter().map(|p| p.to_string()).collect())
    }
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Supports a fixed response, optional per-call latency, call counting
/// and recording of the paths it was asked to read.
pub struct MockBackend {
    response: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    seen_paths: Mutex<Vec<PathBuf>>,
}

impl MockBackend {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            delay: None,
            call_count: AtomicUsize::new(0),
            seen_paths: Mutex::new(Vec::new()),
        }
    }

    /// Block the calling thread for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `extract_pages()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Paths passed to `extract_pages()`, in call order.
    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen_paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl PdfBackend for MockBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut paths) = self.seen_paths.lock() {
            paths.push(path.to_path_buf());
        }
        if let Some(d) = self.delay {
            std::thread::sleep(d);
        }

        match &self.response {
            MockResponse::Pages(pages) => Ok(pages.clone()),
            MockResponse::EchoFile => {
                let bytes = std::fs::read(path)?;
                Ok(vec![String::from_utf8_lossy(&bytes).into_owned()])
            }
            MockResponse::Open(msg) => Err(BackendError::Open(msg.clone())),
            MockResponse::Encrypted => Err(BackendError::Encrypted),
            MockResponse::Extraction(msg) => Err(BackendError::Extraction(msg.clone())),
        }
    }
}
