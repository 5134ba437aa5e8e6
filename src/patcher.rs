//! Text patcher - runs the pattern set over each target in order
//!
//! Each target is handled independently:
//! - Missing files are reported and skipped
//! - Existing files are checked against the workspace boundary
//! - Content is cleaned in memory and written back atomically when it changed
//!
//! Any error other than a missing file aborts the run.

use crate::edit::{read_utf8, EditError, EditResult, Rewrite};
use crate::rules::{clean_content, RuleHit};
use crate::safety::{SafetyError, WorkspaceGuard};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whether the patcher writes its results back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Write,
    /// Compute outcomes without touching any file
    DryRun,
}

/// What happened to a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FileOutcome should be reported"]
pub enum FileOutcome {
    /// Content was cleaned and written back
    Fixed {
        file: PathBuf,
        hits: Vec<RuleHit>,
        bytes_removed: usize,
        original: String,
        patched: String,
    },
    /// Content would be cleaned (dry run)
    WouldFix {
        file: PathBuf,
        hits: Vec<RuleHit>,
        original: String,
        patched: String,
    },
    /// Nothing left to remove
    AlreadyClean { file: PathBuf },
    /// Target does not exist; skipped
    NotFound { file: PathBuf },
}

impl FileOutcome {
    /// The target path as it was given to the patcher.
    pub fn file(&self) -> &Path {
        match self {
            FileOutcome::Fixed { file, .. }
            | FileOutcome::WouldFix { file, .. }
            | FileOutcome::AlreadyClean { file }
            | FileOutcome::NotFound { file } => file,
        }
    }

    /// Original and patched content, when the target changed (or would).
    pub fn change(&self) -> Option<(&str, &str)> {
        match self {
            FileOutcome::Fixed {
                original, patched, ..
            }
            | FileOutcome::WouldFix {
                original, patched, ..
            } => Some((original.as_str(), patched.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Fixed { file, .. } => write!(f, "Fixed: {}", file.display()),
            FileOutcome::WouldFix { file, .. } => write!(f, "Would fix: {}", file.display()),
            FileOutcome::AlreadyClean { file } => {
                write!(f, "Already clean: {}", file.display())
            }
            FileOutcome::NotFound { file } => write!(f, "File not found: {}", file.display()),
        }
    }
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Workspace check failed for {file}: {source}")]
    Safety {
        file: PathBuf,
        #[source]
        source: SafetyError,
    },

    #[error("Failed to patch {file}: {source}")]
    Edit {
        file: PathBuf,
        #[source]
        source: EditError,
    },

    #[error("Invalid workspace: {0}")]
    Workspace(#[from] SafetyError),
}

/// Applies the pattern set to a list of targets inside one workspace.
#[derive(Debug, Clone)]
pub struct Patcher {
    guard: WorkspaceGuard,
    mode: Mode,
}

impl Patcher {
    pub fn new(workspace: impl AsRef<Path>, mode: Mode) -> Result<Self, PatchError> {
        Ok(Self {
            guard: WorkspaceGuard::new(workspace)?,
            mode,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        self.guard.workspace_root()
    }

    /// Process every target in order and collect the outcomes.
    ///
    /// Outcomes come back in target order; each one carries its target path
    /// (see [`FileOutcome::file`]).
    pub fn process<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<FileOutcome>, PatchError> {
        let mut outcomes = Vec::with_capacity(paths.len());
        self.process_with(paths, |outcome| outcomes.push(outcome))?;
        Ok(outcomes)
    }

    /// Process every target in order, handing each outcome to `report` as
    /// soon as it is known. Stops at the first error.
    pub fn process_with<P, F>(&self, paths: &[P], mut report: F) -> Result<(), PatchError>
    where
        P: AsRef<Path>,
        F: FnMut(FileOutcome),
    {
        for path in paths {
            report(self.patch_file(path.as_ref())?);
        }
        Ok(())
    }

    /// Clean a single target.
    pub fn patch_file(&self, target: &Path) -> Result<FileOutcome, PatchError> {
        let file = target.to_path_buf();

        if !self.guard.resolve(target).exists() {
            return Ok(FileOutcome::NotFound { file });
        }

        let canonical = self
            .guard
            .validate_path(target)
            .map_err(|source| PatchError::Safety {
                file: file.clone(),
                source,
            })?;

        let edit_err = |source| PatchError::Edit {
            file: file.clone(),
            source,
        };

        let original = read_utf8(&canonical).map_err(edit_err)?;
        let cleaned = clean_content(&original);

        if cleaned.content == original {
            return Ok(FileOutcome::AlreadyClean { file });
        }

        if self.mode == Mode::DryRun {
            return Ok(FileOutcome::WouldFix {
                file,
                hits: cleaned.hits,
                original,
                patched: cleaned.content,
            });
        }

        let rewrite = Rewrite::new(&canonical, &original, cleaned.content.as_str());
        match rewrite.apply().map_err(edit_err)? {
            EditResult::Applied { bytes_removed, .. } => Ok(FileOutcome::Fixed {
                file,
                hits: cleaned.hits,
                bytes_removed,
                original,
                patched: cleaned.content,
            }),
            EditResult::AlreadyApplied { .. } => Ok(FileOutcome::AlreadyClean { file }),
        }
    }
}
