//! CLI module for editgate
//!
//! Provides command-line interface for:
//! - collect: Print the editable sections of a document
//! - validate: Report validation failures without saving
//! - save: Validate and persist an edited document

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, InputArgs};
pub use commands::{
    collect, collect_response, load_config, run, run_command, save, save_response, validate,
    validate_response, SaveRequest, EXIT_VALIDATION_FAILED,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response, STDIN_PATH};
