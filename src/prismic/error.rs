//! Content API errors

use thiserror::Error;

/// Errors raised while talking to the content API
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API at {0} exposes no master ref")]
    NoMasterRef(String),

    #[error("no {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },
}
