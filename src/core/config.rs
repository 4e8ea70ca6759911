use crate::core::edl::TagFilter;
use log::info;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/*-------------------------------------------------------------------------------------------------
  Configuration
-------------------------------------------------------------------------------------------------*/

/// Environment variable overriding the default URL base for the URL index.
pub const URL_BASE_ENV_VAR: &str = "EDL_URL_BASE";

/// CI environment variable holding the `owner/name` repository identifier.
pub const REPOSITORY_ENV_VAR: &str = "GITHUB_REPOSITORY";

/// CI environment variable holding the branch or tag name being built.
pub const REF_NAME_ENV_VAR: &str = "GITHUB_REF_NAME";

/// URL base used when neither an override nor CI context is available.
pub const FALLBACK_URL_BASE: &str =
    "https://raw.githubusercontent.com/netaryx/palo-alto-azure-servicetag-edl/main";

/*--------------------------------------------------------------------------------------
  Environment Snapshot
--------------------------------------------------------------------------------------*/

/// A snapshot of environment variables. Configuration is resolved against a snapshot so
/// the resolution logic never reads process state directly.
///
/// ```
/// use servicetag_edl::Environment;
///
/// let env: Environment = [("EDL_URL_BASE", "https://x.test")].into_iter().collect();
/// assert_eq!(env.get("EDL_URL_BASE"), Some("https://x.test"));
/// assert_eq!(env.get("GITHUB_REPOSITORY"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Capture the current process environment (non-Unicode variables are skipped).
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build a snapshot from raw OS variables, skipping names or values that are not valid
    /// Unicode.
    pub fn from_os_vars<I: IntoIterator<Item = (OsString, OsString)>>(vars: I) -> Self {
        vars.into_iter()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value.into_string().ok()?;
                Some((name, value))
            })
            .collect()
    }

    /// Get a variable's value; empty values are treated as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for Environment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/*--------------------------------------------------------------------------------------
  URL Base Resolution
--------------------------------------------------------------------------------------*/

/// Compute the default URL base from the environment: the `EDL_URL_BASE` override, else a
/// `raw.githubusercontent.com` URL built from the CI repository and ref, else the fallback.
pub fn default_url_base(env: &Environment) -> String {
    if let Some(url_base) = env.get(URL_BASE_ENV_VAR) {
        info!("Using {}: {}", URL_BASE_ENV_VAR, url_base);
        return url_base.to_string();
    }

    match (env.get(REPOSITORY_ENV_VAR), env.get(REF_NAME_ENV_VAR)) {
        (Some(repository), Some(ref_name)) => {
            format!("https://raw.githubusercontent.com/{repository}/{ref_name}")
        }
        _ => FALLBACK_URL_BASE.to_string(),
    }
}

/// Resolve the URL base; an explicit value (e.g. from the command line) always wins.
pub fn resolve_url_base(explicit: Option<&str>, env: &Environment) -> String {
    match explicit {
        Some(url_base) => url_base.to_string(),
        None => default_url_base(env),
    }
}

/*-------------------------------------------------------------------------------------------------
  Run Configuration
-------------------------------------------------------------------------------------------------*/

/// Fully resolved configuration for a single EDL generation run.
///
/// ```
/// use servicetag_edl::{Config, TagFilter};
///
/// let config = Config::new("edl")
///     .filter(TagFilter::default().exclude(["AzureCloud"]))
///     .url_index("edl/index.csv")
///     .url_base("https://x.test");
///
/// assert_eq!(config.output_dir().to_str(), Some("edl"));
/// assert_eq!(config.url_base_str(), "https://x.test");
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    output_dir: PathBuf,
    filter: TagFilter,
    save_json: Option<PathBuf>,
    source_json: Option<PathBuf>,
    url_index: Option<PathBuf>,
    url_base: String,
}

impl Config {
    /// Create a configuration writing to `output_dir`, selecting every tag, with no index
    /// and the fallback URL base.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            filter: TagFilter::default(),
            save_json: None,
            source_json: None,
            url_index: None,
            url_base: FALLBACK_URL_BASE.to_string(),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the include/exclude tag filter.
    pub fn filter(mut self, filter: TagFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Persist the raw downloaded document to this path.
    pub fn save_json<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.save_json = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read the document from this file instead of the download portal.
    pub fn source_json<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_json = Some(path.as_ref().to_path_buf());
        self
    }

    /// Write a URL index to this path.
    pub fn url_index<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.url_index = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the base URL used to build the URL index links.
    pub fn url_base(mut self, url_base: &str) -> Self {
        self.url_base = url_base.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn tag_filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn save_json_path(&self) -> Option<&Path> {
        self.save_json.as_deref()
    }

    pub fn source_json_path(&self) -> Option<&Path> {
        self.source_json.as_deref()
    }

    pub fn url_index_path(&self) -> Option<&Path> {
        self.url_index.as_deref()
    }

    pub fn url_base_str(&self) -> &str {
        &self.url_base
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
