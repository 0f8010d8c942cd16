use thiserror::Error;

/// Errors raised while loading the disease table or the county topology.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local input could not be read
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The disease CSV is not readable as a table (bad header, bad quoting)
    #[error("malformed disease table: {0}")]
    Csv(#[from] csv::Error),

    /// The topology is not valid JSON or not shaped like TopoJSON
    #[error("malformed topology document: {0}")]
    Topology(#[from] serde_json::Error),

    /// The topology lacks the named object holding the county geometries
    #[error("topology has no `{0}` object")]
    MissingObject(String),

    /// An input parsed but yielded nothing to show
    #[error("{0} contains no usable rows")]
    Empty(&'static str),

    /// An HTTP or browser fetch failed or returned a non-success status
    #[error("failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },
}
