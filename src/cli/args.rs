// src/cli/args.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};
use dwalk_domain::{analytics::SortStrategy, distribution::SeparatorSet};

use super::value_enum::CliOutputFormat;

/// Top-level CLI arguments parsed via clap.
///
/// Filter flags may be repeated; they are applied in command-line order.
#[derive(Parser, Debug)]
#[command(
    name = "dwalk",
    version = crate::VERSION,
    about = "Walk directories, filter entries and report file size distributions"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Directories or files to walk
    #[arg(required = true, num_args = 1.., value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Size distribution: `size` for automatic buckets or `size:<sep>[,<sep>...]` (units B, KB, MB, ...)
    #[arg(short = 'd', long, value_name = "FIELD:SEPARATORS", help_heading = "Output")]
    pub distribution: Option<SeparatorSet>,

    /// Power-of-1024 buckets derived from the largest file; overrides --distribution separators
    #[arg(long, alias = "file_histogram", help_heading = "Output")]
    pub file_histogram: bool,

    /// Print the filtered list to stdout
    #[arg(short = 'p', long, help_heading = "Output")]
    pub print: bool,

    /// Write the filtered list as text to FILE
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath, help_heading = "Output")]
    pub text_output: Option<PathBuf>,

    /// Sort fields, e.g. `size,-mtime` (name user group uid gid atime mtime ctime size)
    #[arg(short = 's', long, value_name = "FIELDS", allow_hyphen_values = true, help_heading = "Output")]
    pub sort: Option<SortStrategy>,

    /// Report format on stdout
    #[arg(long, value_enum, default_value = "text", help_heading = "Output")]
    pub format: CliOutputFormat,

    /// Follow symbolic links while walking
    #[arg(short = 'L', long, help_heading = "Walk")]
    pub dereference: bool,

    /// Accessed less than, more than or exactly N minutes ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub amin: Vec<String>,

    /// Accessed more recently than FILE was modified
    #[arg(long, value_name = "FILE", action = ArgAction::Append, help_heading = "Filters")]
    pub anewer: Vec<String>,

    /// Accessed N days ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub atime: Vec<String>,

    /// Status changed N minutes ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub cmin: Vec<String>,

    /// Status changed more recently than FILE was modified
    #[arg(long, value_name = "FILE", action = ArgAction::Append, help_heading = "Filters")]
    pub cnewer: Vec<String>,

    /// Status changed N days ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub ctime: Vec<String>,

    /// Modified N minutes ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub mmin: Vec<String>,

    /// Modified N days ago (-N, +N, N)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub mtime: Vec<String>,

    /// Numeric group id is N
    #[arg(long, value_name = "N", action = ArgAction::Append, help_heading = "Filters")]
    pub gid: Vec<String>,

    /// Group name is NAME
    #[arg(long, value_name = "NAME", action = ArgAction::Append, help_heading = "Filters")]
    pub group: Vec<String>,

    /// Numeric user id is N
    #[arg(long, value_name = "N", action = ArgAction::Append, help_heading = "Filters")]
    pub uid: Vec<String>,

    /// User name is NAME
    #[arg(long, value_name = "NAME", action = ArgAction::Append, help_heading = "Filters")]
    pub user: Vec<String>,

    /// Size is less than, more than or exactly N (-N, +N, N; units B, KB, MB, ...)
    #[arg(long, value_name = "N", allow_hyphen_values = true, action = ArgAction::Append, help_heading = "Filters")]
    pub size: Vec<String>,

    /// Entry type: b, c, d, f, l, p or s
    #[arg(long = "type", id = "type", value_name = "C", action = ArgAction::Append, help_heading = "Filters")]
    pub entry_type: Vec<String>,

    /// Debug-level logging
    #[arg(short = 'v', long, conflicts_with = "quiet", help_heading = "Logging")]
    pub verbose: bool,

    /// Errors only
    #[arg(short = 'q', long, help_heading = "Logging")]
    pub quiet: bool,
}
