use std::path::PathBuf;

use crate::{analytics::SortStrategy, distribution::SeparatorSet, filter::PredicateKind};

/// Output format for the report written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How the distribution separators are obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionRequest {
    Separators(SeparatorSet),
    /// Power-of-1024 buckets derived from the largest file in the run.
    Auto,
}

impl DistributionRequest {
    /// `--file-histogram` always wins over `--distribution`; a bare `size`
    /// (empty separator set) also asks for automatic buckets.
    pub fn from_options(separators: Option<SeparatorSet>, file_histogram: bool) -> Option<Self> {
        match (separators, file_histogram) {
            (_, true) => Some(Self::Auto),
            (Some(set), false) if set.is_empty() => Some(Self::Auto),
            (Some(set), false) => Some(Self::Separators(set)),
            (None, false) => None,
        }
    }
}

/// One filter flag with its raw command-line value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArg {
    pub kind: PredicateKind,
    pub value: String,
}

impl FilterArg {
    pub fn new(kind: PredicateKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }
}

/// Domain representation of resolved command-line options.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub paths: Vec<PathBuf>,
    pub follow_links: bool,
    /// Filters in command-line order.
    pub filters: Vec<FilterArg>,
    pub sort: Option<SortStrategy>,
    pub distribution: Option<DistributionRequest>,
    pub print: bool,
    pub text_output: Option<PathBuf>,
    pub format: OutputFormat,
}
