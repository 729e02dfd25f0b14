pub mod backend;
pub mod config_file;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod storage;
pub mod text;

pub use backend::{BackendError, PdfBackend};
pub use config_file::ConfigFile;
pub use storage::{Storage, StorageError, UploadId};
pub use text::{PAGE_SEPARATOR, SeparatorMode, extract_text, join_pages};
