use crate::core::types::InvalidUserId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Google OAuth client secrets not found")]
    ConfigurationMissing,
    #[error("client secrets file is malformed: {0}")]
    SecretsMalformed(String),
    #[error("authorization was denied by the provider: {0}")]
    AuthorizationDenied(String),
    #[error("failed to exchange authorization code for tokens: {0}")]
    ProviderExchange(String),
    #[error("invalid state parameter")]
    InvalidState,
    #[error("template {0} not found")]
    TemplateMissing(String),
    #[error("failed to encode request parameters: {0}")]
    Encoding(#[from] serde_urlencoded::ser::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<InvalidUserId> for Error {
    fn from(e: InvalidUserId) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

pub trait ResultExt<T> {
    /// Collapses any failure to [`Error::InvalidState`], for values taken from
    /// the round-tripped `state` parameter.
    fn or_invalid_state(self) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E> {
    fn or_invalid_state(self) -> Result<T, Error> {
        self.map_err(|_| Error::InvalidState)
    }
}

impl<T> ResultExt<T> for Option<T> {
    fn or_invalid_state(self) -> Result<T, Error> {
        self.ok_or(Error::InvalidState)
    }
}
