//! Layout Patcher: removes duplicate layout chrome from finance pages
//!
//! The finance section of the app renders `Navbar` and `Footer` once, in
//! `app/finance/layout.tsx`. Pages that still import and render their own
//! copies show them twice. This crate strips those imports and tags from a
//! fixed list of pages.
//!
//! # Architecture
//!
//! - [`targets`] holds the fixed list of pages
//! - [`rules`] holds the ordered pattern set and applies it to text
//! - [`edit`] replaces a whole file atomically after verifying it is unchanged
//! - [`safety`] keeps every rewrite inside the workspace
//! - [`patcher`] ties them together, one target at a time
//!
//! # Example
//!
//! ```no_run
//! use layout_patcher::{Mode, Patcher, FINANCE_PAGES};
//!
//! let patcher = Patcher::new(".", Mode::Write)?;
//! for outcome in patcher.process(FINANCE_PAGES)? {
//!     println!("{}", outcome);
//! }
//! # Ok::<(), layout_patcher::PatchError>(())
//! ```

pub mod edit;
pub mod patcher;
pub mod rules;
pub mod safety;
pub mod targets;

// Re-exports
pub use edit::{ContentVerification, EditError, EditResult, Rewrite};
pub use patcher::{FileOutcome, Mode, PatchError, Patcher};
pub use rules::{clean_content, needs_cleaning, CleanedContent, RemovalRule, RuleHit, RULES};
pub use safety::{SafetyError, WorkspaceGuard};
pub use targets::FINANCE_PAGES;
