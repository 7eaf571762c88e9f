//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// kasten - notes indexed by the tags in their headers
#[derive(Parser, Debug)]
#[command(name = "kasten", version, about, long_about = None)]
pub struct Cli {
    /// Store directory (overrides KASTEN_HOME and the config file)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Increase verbosity (-v for debug logs on stderr)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a note, reindexing its tags
    Put(PutArgs),

    /// Print a note's raw content
    Read(ReadArgs),

    /// Find notes matching a tag query such as "rust & cli | tools"
    Filter(FilterArgs),

    /// List tags with the number of notes carrying each
    Tags(TagsArgs),

    /// Show the attributes indexed for a note
    Attr(AttrArgs),

    /// Verify tag counts and membership against note attributes
    Check,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `put` command
#[derive(Parser, Debug)]
pub struct PutArgs {
    /// Note name (any string; `/` does not create directories)
    pub name: String,

    /// Read content from this file instead of stdin
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the `read` command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Note name
    pub name: String,
}

/// Arguments for the `filter` command
#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Tag query: `&` joins tags in a clause, `|` separates clauses
    pub query: String,

    /// Seek token from a previous page (JSON object of tag to note name)
    #[arg(short, long)]
    pub seek: Option<String>,

    /// Maximum cursor rounds (defaults to the config value)
    #[arg(short, long)]
    pub max: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Start after this tag
    #[arg(short, long)]
    pub seek: Option<String>,

    /// Maximum tags to list (defaults to the config value)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `attr` command
#[derive(Parser, Debug)]
pub struct AttrArgs {
    /// Note name
    pub name: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
