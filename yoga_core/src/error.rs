use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed value for `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons a sampling cycle produced nothing. None of them are fatal; the
/// sampler skips the cycle and tries again next period.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("models are not loaded")]
    NotReady,

    #[error("no video frame available")]
    FrameUnavailable,

    #[error("pose estimation failed: {0}")]
    Estimation(String),

    #[error("classification failed: {0}")]
    Classification(String),
}
