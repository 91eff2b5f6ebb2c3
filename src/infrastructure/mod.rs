//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where notehub keeps its log file and looks for its
//! configuration file.

pub mod paths;

pub use paths::{expand_tilde, get_config_file, get_data_dir};
