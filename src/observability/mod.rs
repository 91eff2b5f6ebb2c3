//! File-based structured logging.
//!
//! This module wires the `tracing` macros used throughout the crate to a
//! `tracing-subscriber` fmt layer that writes to a rotating log file. The
//! terminal is reserved for the rendered UI, so nothing is logged to stdout.
//!
//! # Features
//!
//! - **File-Based Output**: Logs written to `<data dir>/notehub.log`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::{init_tracing, LOG_FILE_NAME};
