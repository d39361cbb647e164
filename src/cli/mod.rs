//! CLI module for pastedb
//!
//! Provides command-line interface for:
//! - init: Create the data file
//! - query: List pastes with filters, sorting, paging and projection
//! - get / add / update / delete: Single-paste operations

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, QueryArgs};
pub use commands::{
    add, boot, delete, get, init, query, run, run_command, update, CliTransport, FileService,
};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, parse_request, read_request, write_error, write_response};
