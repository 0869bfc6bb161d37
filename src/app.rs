// src/app.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use dwalk_infra::{FsReferenceTimes, SoloReducer, SystemNameResolver, WalkRecordSource};
use dwalk_ports::NameResolver;
use dwalk_usecase::ProcessFileList;
use log::debug;

use crate::{cli, logging, presentation};

pub fn run() -> Result<()> {
    let (config, verbosity) = cli::load()?;
    logging::init(verbosity);
    debug!("dwalk v{} config: {config:?}", crate::VERSION);

    let resolver: Arc<dyn NameResolver> = Arc::new(SystemNameResolver::new());
    let source = WalkRecordSource::new();
    let reducer = SoloReducer;

    let output = ProcessFileList::new(&source, &FsReferenceTimes, Arc::clone(&resolver), &reducer)
        .run(&config)
        .context("failed to process file list")?;
    presentation::emit(&output, &config, resolver.as_ref(), &reducer).context("failed to emit output")?;
    Ok(())
}
