//! CLI command definitions for config-tree
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and edit dot-path addressed configuration documents
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory that relative paths are resolved against
    /// (default: the platform config directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value stored at a path as JSON
    Get(PathArgs),

    /// Store a value at a path and save the document
    Set(SetArgs),

    /// Remove the value stored at a path and save the document
    Unset(PathArgs),

    /// Print the runtime type of the value stored at a path
    Type(PathArgs),

    /// List keys of the document
    Keys(ListArgs),

    /// Print entries of the document as a JSON object
    Values(ListArgs),

    /// Copy a bundled resource to disk (never overwrites)
    Extract(ExtractArgs),

    /// List files in a directory
    Files(FilesArgs),
}

/// A document and a dotted path inside it
#[derive(Args, Debug)]
pub struct PathArgs {
    /// Configuration document (.json, .yaml or .yml)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted key path, e.g. server.http.port
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Arguments for the set subcommand
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration document, created if absent
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dotted key path, e.g. server.http.port
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Value as JSON (e.g. 42, true, "[1,2]"); anything that is not valid
    /// JSON is stored as a plain string
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for the keys and values subcommands
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Configuration document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Walk nested mappings and report full dotted paths
    #[arg(long)]
    pub deep: bool,
}

/// Arguments for the extract subcommand
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Name of the bundled resource
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Destination file or directory (default: the root directory)
    #[arg(value_name = "OUT")]
    pub out: Option<PathBuf>,
}

/// Arguments for the files subcommand
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Directory to list
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Recurse into subdirectories
    #[arg(long)]
    pub deep: bool,
}
