use crate::core::config::Config;
use crate::core::edl::{self, WrittenTag};
use crate::core::errors::Result;
use crate::core::fetch::Fetcher;
use crate::core::index;
use crate::core::json;
use crate::core::locator::SourceLocator;
use log::info;
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  EDL Generation Pipeline
-------------------------------------------------------------------------------------------------*/

/// Run one EDL generation: obtain the Service Tags document (from the download portal, or
/// from a local file when configured), optionally save it, parse it, write the EDL files,
/// and optionally write the URL index. Returns the service tags written.
///
/// Any error aborts the run; nothing after the failing step executes.
pub fn generate(
    config: &Config,
    fetcher: &dyn Fetcher,
    locator: &dyn SourceLocator,
) -> Result<Vec<WrittenTag>> {
    let raw = match config.source_json_path() {
        Some(path) => {
            info!("Reading ServiceTags JSON from {}", path.display());
            fs::read(path)?
        }
        None => {
            let source = locator.locate(fetcher)?;
            fetcher.fetch(source.url())?
        }
    };

    if let Some(path) = config.save_json_path() {
        save_raw_json(path, &raw)?;
    }

    let document = json::parse(&raw)?;
    info!(
        "Parsed {} service tag(s) (cloud={}, changeNumber={})",
        document.records.len(),
        document.cloud.as_deref().unwrap_or("unknown"),
        document
            .change_number
            .map_or_else(|| "unknown".to_string(), |number| number.to_string())
    );

    let written = edl::build(&document.records, config.output_dir(), config.tag_filter())?;

    if let Some(index_path) = config.url_index_path() {
        index::write(
            &written,
            config.output_dir(),
            config.url_base_str(),
            index_path,
        )?;
    }

    Ok(written)
}

fn save_raw_json(path: &Path, raw: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, raw)?;
    info!("Saved raw ServiceTags JSON to {}", path.display());
    Ok(())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
