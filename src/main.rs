use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use layout_patcher::{FileOutcome, Mode, Patcher, RuleHit, FINANCE_PAGES};
use similar::{ChangeTag, TextDiff};
use std::env;
use std::path::{Path, PathBuf};

const WORKSPACE_ENV: &str = "LAYOUT_PATCHER_WORKSPACE";

#[derive(Parser)]
#[command(name = "layout-patcher")]
#[command(
    about = "Remove duplicate Navbar/Footer imports and tags from finance pages",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the app root (defaults to $LAYOUT_PATCHER_WORKSPACE, then the current directory)
    #[arg(short, long)]
    workspace: Option<PathBuf>,

    /// Dry run - show what would be changed without modifying files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Only report which pages still need fixing; exits non-zero if any do
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let workspace = resolve_workspace(cli.workspace)?;

    if cli.check {
        cmd_check(&workspace, cli.diff)
    } else {
        cmd_fix(&workspace, cli.dry_run, cli.diff)
    }
}

/// Resolve workspace path
///
/// Priority order:
/// 1. Explicit --workspace flag
/// 2. LAYOUT_PATCHER_WORKSPACE environment variable
/// 3. Current directory
fn resolve_workspace(cli_workspace: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_workspace {
        return path
            .canonicalize()
            .with_context(|| format!("workspace does not exist: {}", path.display()));
    }

    if let Ok(env_path) = env::var(WORKSPACE_ENV) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path.canonicalize()?);
        }
        eprintln!(
            "{}",
            format!(
                "Warning: {} is set but path doesn't exist: {}",
                WORKSPACE_ENV, env_path
            )
            .yellow()
        );
    }

    env::current_dir().context("could not read current directory")
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!("{}", format!("--- {} (original)", file.display()).dimmed());
    println!("{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", line);
        if change.missing_newline() {
            println!();
        }
    }
}

fn describe_hits(hits: &[RuleHit]) -> String {
    hits.iter()
        .map(|hit| format!("{} x{}", hit.rule, hit.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cmd_fix(workspace: &Path, dry_run: bool, show_diff: bool) -> Result<()> {
    let mode = if dry_run { Mode::DryRun } else { Mode::Write };
    let patcher = Patcher::new(workspace, mode)?;

    println!(
        "{}",
        "Fixing duplicate Navbar/Footer in finance pages...".bold()
    );
    if dry_run {
        println!("{}", "  [DRY RUN - no files will be modified]".cyan());
    }

    patcher.process_with(FINANCE_PAGES, |outcome| {
        match &outcome {
            FileOutcome::Fixed {
                hits,
                bytes_removed,
                ..
            } => {
                println!(
                    "{} {} {}",
                    "✓".green(),
                    outcome,
                    format!("({}; {} bytes removed)", describe_hits(hits), bytes_removed)
                        .dimmed()
                );
            }
            FileOutcome::WouldFix { hits, .. } => {
                println!(
                    "{} {} {}",
                    "✓".green(),
                    outcome,
                    format!("({})", describe_hits(hits)).dimmed()
                );
            }
            FileOutcome::AlreadyClean { .. } => println!("{} {}", "⊙".yellow(), outcome),
            FileOutcome::NotFound { .. } => println!("{} {}", "⊘".cyan(), outcome),
        }

        if show_diff {
            if let Some((before, after)) = outcome.change() {
                display_diff(outcome.file(), before, after);
            }
        }
    })?;

    if dry_run {
        println!("{}", "Done! No files were modified.".bold());
    } else {
        println!("{}", "Done! All finance pages have been fixed.".bold());
    }

    Ok(())
}

fn cmd_check(workspace: &Path, show_diff: bool) -> Result<()> {
    let patcher = Patcher::new(workspace, Mode::DryRun)?;

    println!("{}", "Checking finance pages...".bold());
    println!("Workspace: {}", patcher.workspace_root().display());
    println!();

    let mut needs_fixing = 0;
    let mut clean = 0;
    let mut missing = 0;

    for outcome in patcher.process(FINANCE_PAGES)? {
        match &outcome {
            FileOutcome::WouldFix { file, hits, .. } | FileOutcome::Fixed { file, hits, .. } => {
                println!(
                    "{} Needs fixing: {} {}",
                    "✗".red(),
                    file.display(),
                    format!("({})", describe_hits(hits)).dimmed()
                );
                needs_fixing += 1;
            }
            FileOutcome::AlreadyClean { file } => {
                println!("{} Clean: {}", "✓".green(), file.display());
                clean += 1;
            }
            FileOutcome::NotFound { .. } => {
                println!("{} {}", "⊘".cyan(), outcome);
                missing += 1;
            }
        }

        if show_diff {
            if let Some((before, after)) = outcome.change() {
                display_diff(outcome.file(), before, after);
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} need fixing", format!("{}", needs_fixing).red());
    println!("  {} clean", format!("{}", clean).green());
    println!("  {} not found", format!("{}", missing).cyan());

    if needs_fixing > 0 {
        std::process::exit(1);
    }

    Ok(())
}
