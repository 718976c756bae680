//! vlint core library.
//!
//! This crate runs the Questasim/Modelsim `vlog` compiler and converts its
//! textual messages into per-document diagnostics.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `command`: Builds the `vlog` command line and run location.
//! - `runner`: Runs the compiler and captures its output.
//! - `parser`: Turns compiler stdout into diagnostics for one document.
//! - `lint`: One lint request from settings snapshot to published diagnostics.
//! - `host`: Settings provider and diagnostic sink interfaces.
//! - `models`: Diagnostic, result, and settings types.
//! - `output`: Human/JSON printers.
//! - `error`: Crate error type.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod host;
pub mod lint;
pub mod models;
pub mod output;
pub mod parser;
pub mod runner;
pub mod utils;

pub use error::{Result, VlintError};
pub use models::{Diagnostic, Severity};
pub use parser::OutputParser;
