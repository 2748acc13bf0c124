//! Command-line interface

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::state::FieldId;
use crate::storage::SessionId;

/// Output mode shared by all commands
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level CLI parser for the `zoning-wizard` binary
#[derive(Debug, Parser)]
#[command(
    name = "zoning-wizard",
    version,
    about = "Work through a zoning-compliance questionnaire one step at a time"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Session to operate on (defaults to the active session)
    #[arg(short, long, global = true, env = "ZONING_WIZARD_SESSION")]
    pub session: Option<SessionId>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Session scope lifecycle
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Print progress and field values
    Show {
        /// Only print the fields of this step
        #[arg(long)]
        step: Option<usize>,
    },
    /// List the questionnaire fields
    Fields {
        /// Only list the fields of this step
        #[arg(long)]
        step: Option<usize>,
    },
    /// Set one field (answers take yes, no or unset)
    Set { field: FieldId, value: String },
    /// Record whether a step is complete and valid
    Validate {
        step: usize,
        #[arg(long)]
        complete: bool,
        #[arg(long)]
        valid: bool,
    },
    /// Jump to a step; ignored unless every earlier step is complete and valid
    Goto { step: usize },
    /// Report whether a step can be navigated to
    CanGoto { step: usize },
    /// Advance one step
    Next,
    /// Go back one step
    Prev,
    /// Clear every field and validation and return to the first step
    Reset,
    /// Replace the whole record with a draft JSON file
    Load { file: PathBuf },
    /// Write the record as draft JSON (stdout when no file is given)
    Export { file: Option<PathBuf> },
}

#[derive(Debug, Subcommand)]
pub enum SessionCommands {
    /// Start a new session and make it active
    Start,
    /// Discard the session's snapshot
    End,
    /// Print the session id in use
    Id,
}
