use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Download the Azure Service Tags JSON and build PAN-OS EDL-compatible IP list files.",
    long_about = None
)]
pub struct Args {
    /// Directory where EDL .txt files will be written (one file set per service tag)
    pub output_dir: PathBuf,

    /// Only build lists for these service tags (default: all tags)
    #[arg(long = "include-tags", value_name = "NAME", num_args = 1..)]
    pub include_tags: Option<Vec<String>>,

    /// Do not build lists for these service tags
    #[arg(long = "exclude-tags", value_name = "NAME", num_args = 1..)]
    pub exclude_tags: Option<Vec<String>>,

    /// Also save the raw ServiceTags_Public JSON document to this path
    #[arg(long = "save-json", value_name = "PATH")]
    pub save_json: Option<PathBuf>,

    /// Read the ServiceTags JSON document from this file instead of the Download Center
    #[arg(long = "source-json", value_name = "PATH")]
    pub source_json: Option<PathBuf>,

    /// Also write a comma-separated index of EDL URLs to this path
    #[arg(long = "url-index", value_name = "PATH")]
    pub url_index: Option<PathBuf>,

    /// Base URL for links in the URL index [default: env EDL_URL_BASE, GitHub CI context, or
    /// the upstream repository]
    #[arg(long = "url-base", value_name = "URL")]
    pub url_base: Option<String>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
