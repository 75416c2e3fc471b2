use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lowdoc",
    about = "LowDoc — path-addressed document store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Store root folder (created if missing)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured maximum nesting depth
    #[arg(long, global = true)]
    pub max_depth: Option<u32>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a document, creating folders as needed
    Put(PutArgs),
    /// Print a document
    Get(PathArgs),
    /// Check whether a document or folder exists
    Exists(PathArgs),
    /// Check whether a path is a folder
    IsFolder(PathArgs),
    /// List the immediate children of a folder
    Ls(ListArgs),
    /// Print every document directly inside a folder
    CatAll(FolderArgs),
    /// Recursively list everything below a folder
    Walk(ListArgs),
    /// Delete a single document
    Rm(PathArgs),
    /// Delete a document or a whole folder
    RmItem(PathArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct PutArgs {
    pub path: String,
    /// Read the contents from a local file
    #[arg(long, conflicts_with = "data")]
    pub file: Option<PathBuf>,
    /// Use this string as the contents
    #[arg(long)]
    pub data: Option<String>,
}

#[derive(Args)]
pub struct PathArgs {
    pub path: String,
}

#[derive(Args)]
pub struct FolderArgs {
    #[arg(default_value = "")]
    pub folder: String,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(default_value = "")]
    pub folder: String,
    /// Include folders in the output
    #[arg(long)]
    pub folders: bool,
}
