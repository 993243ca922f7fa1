use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConectaError {
    /// A search was requested with neither a term nor a category tag.
    #[error("{0}")]
    InvalidQuery(String),

    /// The state has no configured cities. Only reachable with a broken region catalog.
    #[error("unknown region '{0}': no cities configured for this state")]
    UnknownRegion(String),

    #[error("{0}")]
    Network(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("not logged in. Run: conecta login --email <email>")]
    NotLoggedIn,

    #[error("authentication error: {0}")]
    Auth(String),

    /// Input rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ConectaError {
    /// Text shown to the user when a request settles into an error phase.
    ///
    /// Server errors surface the server-supplied message verbatim; everything
    /// else falls back to the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            ConectaError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConectaError>;
