use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqlGenError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Metadata query failed ({context}): {source}")]
    MetadataQuery {
        context: String,
        #[source]
        source: tiberius::error::Error,
    },

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Connection string is required.")]
    MissingConnectionString,

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SqlGenError {
    /// Wrap a catalog query failure with the name of the query that failed.
    pub fn query(context: impl Into<String>) -> impl FnOnce(tiberius::error::Error) -> Self {
        let context = context.into();
        move |source| SqlGenError::MetadataQuery { context, source }
    }
}
