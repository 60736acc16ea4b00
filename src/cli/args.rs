//! CLI argument definitions using clap
//!
//! Commands:
//! - editgate collect --input <file|->
//! - editgate validate --input <file|->
//! - editgate save --input <file|-> --editor <alias>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// editgate - collect and validate the editable fields of approval documents
#[derive(Parser, Debug)]
#[command(name = "editgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Document to read; "-" reads stdin
    #[arg(long, default_value = "-")]
    pub input: PathBuf,

    /// Path to configuration file; built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the editable sections found in a document
    Collect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate a document's edits without saving
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate a document and save it when clean
    Save {
        #[command(flatten)]
        input: InputArgs,

        /// Alias the edit is recorded under
        #[arg(long)]
        editor: String,

        /// Signed-in user (default: the editor alias)
        #[arg(long)]
        user: Option<String>,

        /// Client type (default: from config)
        #[arg(long)]
        client: Option<String>,

        /// Tenant id (default: from config)
        #[arg(long)]
        tenant: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
