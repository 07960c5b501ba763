use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("GOOGLE_PLACE_ID env is missing")]
    MissingPlaceId,

    #[error("credential error: {0}")]
    Credential(String),

    /// Upstream answered with a `status` other than `"OK"`.
    #[error("upstream status {status:?}")]
    Upstream {
        status: Option<serde_json::Value>,
        body: serde_json::Value,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
