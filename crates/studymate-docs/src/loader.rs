//! Document loaders — turn a `DocumentRef` into extracted plain text.

use std::path::Path;

use tracing::debug;

use studymate_core::error::ExtractionError;

use crate::reference::DocumentRef;

/// Resolves a document reference to its extracted text.
///
/// Implementations decide what references they accept: the filesystem loader
/// only understands paths, a remote-store loader would only understand
/// handles.
pub trait DocumentLoader: Send + Sync {
    fn load(&self, doc: &DocumentRef) -> Result<String, ExtractionError>;
}

/// Loads plain-text documents from the local filesystem.
///
/// Binary study formats (PDF, DOCX) are detected by their magic bytes and
/// rejected with a distinct error rather than fed to the engine as garbage.
/// Text conversion for those formats happens upstream of this loader.
pub struct FsDocumentLoader {
    max_chars: usize,
}

impl FsDocumentLoader {
    pub fn new(max_chars: usize) -> Self {
        FsDocumentLoader { max_chars }
    }

    fn load_path(&self, path: &Path) -> Result<String, ExtractionError> {
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|e| ExtractionError::Unreadable {
            reason: e.to_string(),
        })?;

        if let Some(format) = sniff_binary_format(&bytes) {
            return Err(ExtractionError::UnsupportedFormat {
                detected: format.to_string(),
            });
        }

        let text = String::from_utf8(bytes).map_err(|_| ExtractionError::Unreadable {
            reason: "not valid UTF-8 text".to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        if text.chars().count() > self.max_chars {
            debug!(
                path = %path.display(),
                max_chars = self.max_chars,
                "Truncating extracted text"
            );
            return Ok(text.chars().take(self.max_chars).collect());
        }

        Ok(text)
    }
}

impl DocumentLoader for FsDocumentLoader {
    fn load(&self, doc: &DocumentRef) -> Result<String, ExtractionError> {
        match doc {
            DocumentRef::Path(path) => self.load_path(path),
            DocumentRef::Handle(handle) => {
                Err(ExtractionError::HandleUnsupported(handle.clone()))
            }
        }
    }
}

/// Detect known binary study formats by their leading magic bytes.
fn sniff_binary_format(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF-") {
        return Some("pdf");
    }
    // DOCX (and other OOXML) files are zip archives.
    if bytes.starts_with(b"PK\x03\x04") {
        return Some("docx");
    }
    None
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
