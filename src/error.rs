use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("no servers configured")]
    NoServersConfigured,

    #[error("username or password not set for '{server}'")]
    MissingCredentials { server: String },

    #[error("unable to connect to IntelliFlash API '{server}': {source}")]
    Connection {
        server: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unable to get valid result from '{server}', http response code: {status}{detail}")]
    HttpStatus {
        server: String,
        status: u16,
        /// Vendor exception message when the error body carried one,
        /// prefixed with ": ". Empty otherwise.
        detail: String,
    },

    #[error("unable to parse analytics result from '{server}': {source}")]
    MalformedResponse {
        server: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown analytics category '{0}'")]
    UnknownCategory(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CollectorError>;
