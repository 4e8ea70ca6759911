//! Build firewall external dynamic lists (EDLs) from the Azure Service Tags.
//!
//! Microsoft publishes the IP address prefixes of every Azure service tag in a weekly JSON
//! document on the Download Center. This crate locates the current document, downloads it,
//! and writes three plain-text prefix lists per service tag (all, IPv4 only, IPv6 only) for
//! use as external dynamic lists. It can also write a CSV index of the URLs at which the
//! lists will be published.
//!
//! ```no_run
//! use servicetag_edl::{Config, HttpFetcher, PortalLocator, TagFilter};
//!
//! # fn main() -> servicetag_edl::Result<()> {
//! let config = Config::new("edl")
//!     .filter(TagFilter::default().include(["AzureCloud.eastus", "Storage"]))
//!     .url_index("edl/index.csv");
//!
//! let written = servicetag_edl::generate(&config, &HttpFetcher::new()?, &PortalLocator::default())?;
//! for tag in &written {
//!     println!("{} -> {}.txt", tag.name, tag.base_name);
//! }
//! # Ok(())
//! # }
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Primary Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::config::{resolve_url_base, Config, Environment};
pub use crate::core::edl::{
    normalise_filename, EdlFileSet, EdlVariant, PrefixCounts, TagFilter, WrittenTag,
};
pub use crate::core::errors::{Error, Result};
pub use crate::core::fetch::{Fetcher, HttpFetcher};
pub use crate::core::index;
pub use crate::core::json::{ServiceTagDocument, TagRecord};
pub use crate::core::locator::{PortalLocator, SourceLocator, SourceUrl};
pub use crate::core::pipeline::generate;
pub use crate::core::prefix_type::PrefixType;

/*-------------------------------------------------------------------------------------------------
  Re-exports
-------------------------------------------------------------------------------------------------*/

pub use regex;
