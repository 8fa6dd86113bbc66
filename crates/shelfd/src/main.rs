//! Command line interface for the shelf document library.
//!
//! This crate provides a CLI front end for the `shelf` library. It supports
//! operations like:
//! - Catalog initialization
//! - Ingestion from arXiv, article platforms, remote documents, local files
//!   and directories
//! - Title search and folder management
//! - Session-restore via recency tracking
//!
//! # Usage
//!
//! ```bash
//! # Initialize the catalog
//! shelf init
//!
//! # Ingest a paper, an article, a file, or a whole directory
//! shelf add https://arxiv.org/abs/1706.03762 --folder Reading
//! shelf add ~/Downloads/papers
//!
//! # Search titles
//! shelf search attention
//!
//! # Resolve the last-viewed document for the viewer
//! shelf open
//! ```
//!
//! The CLI provides colored output and interactive confirmations for
//! destructive operations, and supports verbosity levels for debugging
//! through the `-v` flag.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use shelf::{
  catalog::{Catalog, DeletePolicy},
  error::ShelfError,
  ingest::{IngestOutcome, Ingestor},
  storage,
};
use tracing::trace;
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Continuation line for tree structure
static CONTINUE_PREFIX: &str = "│  ";
/// Vertical line for tree structure
static TREE_VERT: &str = "│";
/// Branch character for tree structure
static TREE_BRANCH: &str = "├";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "CLI for the shelf document library")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to the catalog file. If not specified, uses the default
  /// platform-specific data directory.
  #[arg(long, short, global = true)]
  path: Option<PathBuf>,

  /// Directory retrieved documents are stored under. If not specified, uses
  /// the default platform-specific documents directory.
  #[arg(long, short, global = true)]
  storage: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Option<Commands>,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

/// Configures the logging system based on the verbosity level
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point for the shelf CLI application
///
/// Handles command line argument parsing, sets up logging, opens the
/// catalog, and executes the requested command.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let Some(command) = cli.command.clone() else {
    println!("Please specify a command. Use --help for usage information.");
    std::process::exit(1);
  };

  let catalog_path = cli.path.clone().unwrap_or_else(Catalog::default_path);
  let storage_path = cli.storage.clone().unwrap_or_else(storage::default_storage_path);
  trace!("Using catalog at {}, storage at {}", catalog_path.display(), storage_path.display());

  if let Commands::Init = command {
    return init(&catalog_path, &storage_path);
  }

  let mut catalog = Catalog::open(&catalog_path)?;
  match command {
    Commands::Init => unreachable!("handled above"),
    Commands::Add { input, folder } => {
      let ingestor = Ingestor::new(&storage_path)?;
      add(&mut catalog, &ingestor, &input, folder.as_deref()).await
    },
    Commands::Search { query } => search(&catalog, query.as_deref()),
    Commands::Open { external_id } => open(&mut catalog, external_id.as_deref()),
    Commands::Remove { external_id, force } =>
      remove(&mut catalog, &external_id, force || cli.accept_defaults),
    Commands::Mv { external_id, folder } => mv(&mut catalog, &external_id, &folder),
    Commands::Retitle { external_id, title } => retitle(&mut catalog, &external_id, &title),
    Commands::Folder { command } => folder(&mut catalog, command),
  }
}
