mod args;
mod value_enum;

pub use args::Args;
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use dwalk_domain::{
    config::{DistributionRequest, FilterArg, RunConfig},
    filter::PredicateKind,
};
use dwalk_shared_kernel::{PresentationError, Result};
pub use value_enum::CliOutputFormat;

use crate::logging::Verbosity;

/// Parse the process arguments into a domain [`RunConfig`] and the requested verbosity.
///
/// clap prints usage errors and exits on its own.
///
/// # Errors
///
/// Returns `Err` when the parsed arguments cannot be turned into a configuration.
pub fn load() -> Result<(RunConfig, Verbosity)> {
    let matches = Args::command().get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    Ok((build_config(&args, &matches)?, verbosity(&args)))
}

/// Convert parsed CLI arguments into a domain configuration.
///
/// `matches` must come from the same parse as `args`; it supplies the
/// command-line position of every filter flag.
///
/// # Errors
///
/// Returns a presentation error for an empty path list.
pub fn build_config(args: &Args, matches: &ArgMatches) -> Result<RunConfig> {
    if args.paths.is_empty() {
        return Err(PresentationError::InvalidValue {
            flag: "<PATH>".to_string(),
            value: String::new(),
            reason: "at least one path is required".to_string(),
        }
        .into());
    }

    Ok(RunConfig {
        paths: args.paths.clone(),
        follow_links: args.dereference,
        filters: ordered_filters(matches),
        sort: args.sort.clone(),
        distribution: DistributionRequest::from_options(args.distribution.clone(), args.file_histogram),
        print: args.print,
        text_output: args.text_output.clone(),
        format: args.format.into(),
    })
}

/// Every filter flag with its value, sorted by position on the command line.
fn ordered_filters(matches: &ArgMatches) -> Vec<FilterArg> {
    let mut positioned: Vec<(usize, FilterArg)> = PredicateKind::ALL
        .iter()
        .filter_map(|kind| {
            let id = kind.as_str();
            let indices = matches.indices_of(id)?;
            let values = matches.get_many::<String>(id)?;
            Some(indices.zip(values).map(move |(index, value)| (index, FilterArg::new(*kind, value.as_str()))))
        })
        .flatten()
        .collect();
    positioned.sort_by_key(|(index, _)| *index);
    positioned.into_iter().map(|(_, filter)| filter).collect()
}

fn verbosity(args: &Args) -> Verbosity {
    match (args.verbose, args.quiet) {
        (true, _) => Verbosity::Verbose,
        (_, true) => Verbosity::Quiet,
        _ => Verbosity::Normal,
    }
}
