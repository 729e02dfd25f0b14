use std::path::Path;

use crate::backend::{BackendError, PdfBackend};

/// Inserted after page text when joining pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Where [`PAGE_SEPARATOR`] goes when joining pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeparatorMode {
    /// After every page, including the last one.
    #[default]
    Trailing,
    /// Only between consecutive pages.
    Between,
}

impl SeparatorMode {
    pub fn from_trailing(trailing: bool) -> Self {
        if trailing {
            SeparatorMode::Trailing
        } else {
            SeparatorMode::Between
        }
    }
}

/// Concatenate page texts in order according to `mode`.
pub fn join_pages<S: AsRef<str>>(pages: &[S], mode: SeparatorMode) -> String {
    match mode {
        SeparatorMode::Trailing => {
            let capacity = pages
                .iter()
                .map(|p| p.as_ref().len() + PAGE_SEPARATOR.len())
                .sum();
            let mut out = String::with_capacity(capacity);
            for page in pages {
                out.push_str(page.as_ref());
                out.push_str(PAGE_SEPARATOR);
            }
            out
        }
        SeparatorMode::Between => pages
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR),
    }
}

/// Extract the full text of the PDF at `path` using `backend`.
pub fn extract_text(
    path: &Path,
    backend: &dyn PdfBackend,
    mode: SeparatorMode,
) -> Result<String, BackendError> {
    let pages = backend.extract_pages(path)?;
    tracing::debug!(path = %path.display(), pages = pages.len(), "extracted pages");
    Ok(join_pages(pages.as_slice(), mode))
}
