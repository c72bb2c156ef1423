//! CLI argument definitions for the ASF tag editor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "asf-tag",
    version,
    about = "Read and edit metadata tags in ASF (WMA/WMV) files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every tag present in a file.
    Show(ShowArgs),

    /// Print a single tag value.
    Get(GetArgs),

    /// Set a tag to a new value.
    Set(SetArgs),

    /// Remove a tag.
    Remove(RemoveArgs),
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Path to the ASF file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Also list raw extended attributes by their on-disk names.
    #[arg(long = "raw")]
    pub raw: bool,
}

#[derive(Parser)]
pub struct GetArgs {
    /// Path to the ASF file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Tag name (e.g. title, artist, album, track).
    #[arg(value_name = "TAG")]
    pub tag: String,
}

#[derive(Parser)]
pub struct SetArgs {
    /// Path to the ASF file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Tag name (e.g. title, artist, album, track).
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// New value. Integer tags take decimal numbers; date tags take an
    /// RFC 3339 timestamp or a 4-digit year.
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Write the result here instead of replacing the input file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RemoveArgs {
    /// Path to the ASF file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Tag name (e.g. title, artist, album, track).
    #[arg(value_name = "TAG")]
    pub tag: String,

    /// Write the result here instead of replacing the input file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}
