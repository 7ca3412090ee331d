use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown field kind '{0}'.")]
    InvalidFieldKind(String),

    #[error("Query value is empty.")]
    EmptyQueryValue,

    #[error("Invalid countries endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Could not build HTTP client. {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Countries API is unavailable. {0}")]
    RemoteUnavailable(#[from] reqwest::Error),

    #[error("Countries API did not return a 200. Got {0}.")]
    RemoteStatus(reqwest::StatusCode),

    #[error("Countries API returned an empty body.")]
    EmptyRemoteBody,

    #[error("Could not deserialize data from countries API. {0}")]
    MalformedRemoteData(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
