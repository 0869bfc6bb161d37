// src/presentation.rs
use std::io::{self, Write};

use dwalk_domain::{
    analytics::WalkSummary,
    config::{OutputFormat, RunConfig},
    distribution::DistributionReport,
};
use dwalk_infra::ListingWriter;
use dwalk_ports::{NameResolver, Reducer};
use dwalk_shared_kernel::{FileRecord, InfrastructureError, Result};
use dwalk_usecase::ProcessOutput;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a WalkSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<&'a DistributionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [FileRecord]>,
}

/// Writes the listing, summary and distribution.
///
/// The listing is per worker; the global summary and distribution are only
/// written by the coordinator.
pub fn emit(
    output: &ProcessOutput,
    config: &RunConfig,
    resolver: &dyn NameResolver,
    reducer: &dyn Reducer,
) -> Result<()> {
    let listing = ListingWriter::new(resolver);
    if let Some(path) = &config.text_output {
        listing.write_to_path(path, &output.records)?;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.format {
        OutputFormat::Text => {
            if config.print {
                listing.write(&mut out, &output.records).map_err(output_error)?;
            }
            if reducer.is_coordinator() {
                write_text(&mut out, output).map_err(output_error)?;
            }
        }
        OutputFormat::Json => {
            if reducer.is_coordinator() {
                let report = JsonReport {
                    summary: &output.summary,
                    distribution: output.distribution.as_ref(),
                    records: config.print.then_some(output.records.as_slice()),
                };
                serde_json::to_writer_pretty(&mut out, &report).map_err(InfrastructureError::from)?;
                writeln!(out).map_err(output_error)?;
            }
        }
    }
    out.flush().map_err(output_error)?;
    Ok(())
}

/// Summary block followed by the distribution table, if any.
pub fn write_text<W: Write>(out: &mut W, output: &ProcessOutput) -> io::Result<()> {
    writeln!(out, "{}", output.summary)?;
    if let Some(report) = &output.distribution {
        writeln!(out, "{report}")?;
    }
    Ok(())
}

fn output_error(source: io::Error) -> InfrastructureError {
    InfrastructureError::OutputError { message: "failed to write to stdout".to_string(), source: Some(Box::new(source)) }
}
