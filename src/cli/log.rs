use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{info, warn, SetLoggerError};
use servicetag_edl::WrittenTag;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize stderr logging for this crate
--------------------------------------------------------------------------------------*/

pub fn init(verbosity: &Verbosity<InfoLevel>) -> Result<(), SetLoggerError> {
    stderrlog::new()
        .module(env!("CARGO_CRATE_NAME"))
        .verbosity(verbosity.log_level_filter())
        .timestamp(stderrlog::Timestamp::Off)
        .init()
}

/*--------------------------------------------------------------------------------------
  Run Summary
--------------------------------------------------------------------------------------*/

pub fn summary(written: &[WrittenTag], output_dir: &Path) {
    if written.is_empty() {
        warn!(
            "No service tags matched; no EDL files were written to {}",
            output_dir.display()
        );
        return;
    }

    let prefix_count: usize = written.iter().map(|tag| tag.counts.total).sum();
    info!(
        "Generated EDL files for {} service tag(s) ({} prefixes) in {}",
        written.len(),
        prefix_count,
        output_dir.display()
    );
}
