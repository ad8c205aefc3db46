use reqwest::StatusCode;
use thiserror::Error;

/// Failures the pipeline can surface. None of these are caught or retried
/// anywhere; binaries propagate them and abort.
#[derive(Debug, Error)]
pub enum ShotMapError {
    #[error("request for {url} failed with http {status}")]
    Network { url: String, status: StatusCode },

    #[error("could not find shotsData block in the page source")]
    MissingShotsData,

    #[error("malformed shotsData json: {0}")]
    MalformedShotsData(#[from] serde_json::Error),

    #[error("shot for {player} is missing required field `{field}`")]
    MissingField { player: String, field: &'static str },
}
