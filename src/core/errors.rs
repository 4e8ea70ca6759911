use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Fatal errors that abort an EDL generation run.
///
/// Unparsable address prefixes are not errors; they are logged and recovered inline by the
/// list builder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of the portal pages contained a link matching the document pattern.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A network fetch failed (client setup, transport, or non-success HTTP status).
    #[error("fetch failed for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The downloaded document could not be decoded or lacks a recognized tag list.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Two selected service tags normalise to the same base filename.
    #[error(
        "service tags {first:?} and {second:?} both map to the file name {base_name:?} in {}",
        .output_dir.display()
    )]
    FilenameCollision {
        base_name: String,
        first: String,
        second: String,
        output_dir: PathBuf,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn transport<E>(url: &str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Error::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }
}

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}
