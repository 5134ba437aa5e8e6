use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// The fundamental write primitive: whole-file replacement with verification.
///
/// The patcher reads a file, cleans it in memory, and hands the result to a
/// `Rewrite`. Applying it re-reads the file and only replaces it if the content
/// on disk is still what was cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Rewrite does nothing until apply() is called"]
pub struct Rewrite {
    /// Path to the file to rewrite
    pub file: PathBuf,
    /// Full replacement content
    pub new_content: String,
    /// Verification of what we expect to find before writing
    pub expected_before: ContentVerification,
}

/// Verification strategy for rewrite safety.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentVerification {
    /// Exact text match required
    ExactMatch(String),
    /// xxh3 hash of expected text (cheaper to hold for large pages)
    Hash(u64),
}

impl ContentVerification {
    /// Check if the provided text matches the verification criteria.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            ContentVerification::ExactMatch(expected) => text == expected,
            ContentVerification::Hash(expected_hash) => xxh3_64(text.as_bytes()) == *expected_hash,
        }
    }

    /// Create verification from text, using hash for text over 1KB.
    pub fn from_text(text: &str) -> Self {
        if text.len() > 1024 {
            ContentVerification::Hash(xxh3_64(text.as_bytes()))
        } else {
            ContentVerification::ExactMatch(text.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("File changed on disk since it was read: {file}")]
    ContentChanged { file: PathBuf },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 validation error in {file}: {source}")]
    Utf8 {
        file: PathBuf,
        source: std::string::FromUtf8Error,
    },
}

/// Result of applying a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "EditResult should be checked for applied/already-applied"]
pub enum EditResult {
    /// File was replaced
    Applied { file: PathBuf, bytes_removed: usize },
    /// File already holds the new content
    AlreadyApplied { file: PathBuf },
}

impl Rewrite {
    /// Create a rewrite from the content that was read and its cleaned form.
    pub fn new(
        file: impl Into<PathBuf>,
        original: &str,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            new_content: new_content.into(),
            expected_before: ContentVerification::from_text(original),
        }
    }

    /// Apply this rewrite to the file system atomically.
    ///
    /// Uses tempfile + fsync + rename for crash safety.
    pub fn apply(&self) -> Result<EditResult, EditError> {
        let current = read_utf8(&self.file)?;

        if current == self.new_content {
            return Ok(EditResult::AlreadyApplied {
                file: self.file.clone(),
            });
        }

        if !self.expected_before.matches(&current) {
            return Err(EditError::ContentChanged {
                file: self.file.clone(),
            });
        }

        atomic_write(&self.file, self.new_content.as_bytes())?;

        // Bump mtime so file watchers (next dev) notice the change
        let now = filetime::FileTime::now();
        filetime::set_file_mtime(&self.file, now)?;

        Ok(EditResult::Applied {
            file: self.file.clone(),
            bytes_removed: current.len().saturating_sub(self.new_content.len()),
        })
    }
}

/// Read a whole file as UTF-8, keeping the path in the error.
pub fn read_utf8(path: &Path) -> Result<String, EditError> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|source| EditError::Utf8 {
        file: path.to_path_buf(),
        source,
    })
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The replacement keeps the permissions of the file it replaces.
fn atomic_write(path: &Path, content: &[u8]) -> Result<(), EditError> {
    let parent = path.parent().ok_or_else(|| {
        EditError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Path has no parent directory",
        ))
    })?;

    let permissions = fs::metadata(path)?.permissions();
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;

    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
