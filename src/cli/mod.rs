//! Command-line interface for the sequence catalog.
//!
//! Available commands:
//!
//! - **list** / **show** / **status**: inspect the catalog
//! - **create** / **add** / **activate** / **delete**: manage sequences
//! - **next** / **prev**: move the workflow step of the active sequence
//! - **attach**: move a captured file (or portrait) into the active sequence
//!
//! ## Usage
//!
//! ```text
//! # Start a new sequence and make it active
//! seqcat create trip1
//!
//! # Move a recorded scan into it
//! seqcat attach scan /tmp/capture.mp4
//!
//! # Advance the capture workflow
//! seqcat next
//!
//! # JSON output for scripting
//! seqcat list --format json
//!
//! # Use a specific catalog directory
//! seqcat --root ./sequences status
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::catalog::store::SequenceCatalog;
use crate::config::CatalogConfig;
use crate::storage::paths::{DataDirResolver, FixedRoot};

pub mod inspect;
pub mod manage;

#[derive(Parser)]
#[command(name = "seqcat")]
#[command(version)]
#[command(about = "Manage the local catalog of capture sequences")]
#[command(
    long_about = "seqcat manages a local catalog of capture sequences.\n\nEach sequence is a directory holding scan video, calibration video, IMU log, QR image, portrait and thumbnail. The catalog index records the sequence order, the active sequence and its workflow step."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalog root directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "SEQCAT_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all sequences
    List,

    /// Show the assets of one sequence
    Show(TargetArgs),

    /// Show the active sequence and workflow step
    Status,

    /// Create a sequence and make it active
    Create(manage::NameArgs),

    /// Add a sequence without changing the active one
    Add(manage::NameArgs),

    /// Make a sequence active (by name, or by position with --index)
    Activate(TargetArgs),

    /// Advance the workflow step
    Next,

    /// Go back one workflow step
    Prev,

    /// Delete a sequence and its directory (by name, or by position with --index)
    Delete(TargetArgs),

    /// Move a captured file into the active sequence
    Attach(manage::AttachArgs),
}

/// A sequence picked by name, or by position with `--index`
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Sequence name
    #[arg(required_unless_present = "index", conflicts_with = "index")]
    pub name: Option<String>,

    /// Position of the sequence in the catalog, starting at 0
    #[arg(long)]
    pub index: Option<usize>,
}

impl TargetArgs {
    /// Position of the selected sequence
    ///
    /// # Errors
    ///
    /// Returns an error if no sequence has the name, or the index is out of
    /// range.
    pub fn resolve(&self, catalog: &SequenceCatalog) -> anyhow::Result<usize> {
        match (&self.name, self.index) {
            (_, Some(index)) if index < catalog.count() => Ok(index),
            (_, Some(index)) => anyhow::bail!(
                "No sequence at index {index} (catalog has {})",
                catalog.count()
            ),
            (Some(name), None) => catalog
                .position(name)
                .ok_or_else(|| anyhow::anyhow!("Sequence not found: {name}")),
            (None, None) => anyhow::bail!("Pass a sequence name or --index"),
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run the parsed command line
///
/// # Errors
///
/// Returns an error if the catalog cannot be opened or the command fails.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut catalog = open_catalog(cli.root)?;

    if cli.verbose {
        eprintln!(
            "Opened catalog at {} with {} sequences",
            catalog.root().display(),
            catalog.count()
        );
    }

    match cli.command {
        Commands::List => inspect::run_list(&catalog, cli.format),
        Commands::Show(args) => inspect::run_show(&catalog, &args, cli.format),
        Commands::Status => inspect::run_status(&catalog, cli.format),
        Commands::Create(args) => manage::run_create(&mut catalog, &args, cli.format),
        Commands::Add(args) => manage::run_add(&mut catalog, &args, cli.format),
        Commands::Activate(args) => manage::run_activate(&mut catalog, &args, cli.format),
        Commands::Next => manage::run_step(&mut catalog, true, cli.format),
        Commands::Prev => manage::run_step(&mut catalog, false, cli.format),
        Commands::Delete(args) => manage::run_delete(&mut catalog, &args, cli.format),
        Commands::Attach(args) => manage::run_attach(&catalog, &args, cli.format),
    }
}

fn open_catalog(root: Option<PathBuf>) -> anyhow::Result<SequenceCatalog> {
    let config = match root {
        Some(root) => CatalogConfig::from_resolver(&FixedRoot(root)),
        None => CatalogConfig::from_resolver(&DataDirResolver::default()),
    }
    .context("No catalog root: pass --root or set SEQCAT_ROOT")?;

    SequenceCatalog::open(config).context("Failed to open catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(args: &[&str]) -> TargetArgs {
        let mut argv = vec!["seqcat", "delete"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Delete(target) => target,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_name_and_index_are_separate_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = SequenceCatalog::open(CatalogConfig::new(dir.path())).unwrap();
        catalog.create("a").unwrap();
        catalog.create("0").unwrap();

        assert_eq!(target(&["a"]).resolve(&catalog).unwrap(), 0);
        // A numeric name is still a name
        assert_eq!(target(&["0"]).resolve(&catalog).unwrap(), 1);
        assert_eq!(target(&["--index", "0"]).resolve(&catalog).unwrap(), 0);
        assert_eq!(target(&["--index", "1"]).resolve(&catalog).unwrap(), 1);

        assert!(target(&["1"]).resolve(&catalog).is_err());
        assert!(target(&["--index", "5"]).resolve(&catalog).is_err());
        assert!(target(&["zzz"]).resolve(&catalog).is_err());
    }

    #[test]
    fn test_target_requires_exactly_one_form() {
        assert!(Cli::try_parse_from(["seqcat", "delete"]).is_err());
        assert!(Cli::try_parse_from(["seqcat", "delete", "a", "--index", "0"]).is_err());
        assert!(Cli::try_parse_from(["seqcat", "activate", "--index", "x"]).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["seqcat", "--root", "/tmp/x", "attach", "imu-log", "log.txt"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Commands::Attach(_)));
    }
}
