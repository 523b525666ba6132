use crate::provider::error::Error;

/// JSON body returned by the API when a request cannot be served.
#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ConfigurationMissing,
    TemplateMissing,
    ServerError,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::TemplateMissing => 404,
            ErrorKind::ConfigurationMissing | ErrorKind::ServerError => 500,
        }
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        let kind = match error {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::ConfigurationMissing => ErrorKind::ConfigurationMissing,
            Error::TemplateMissing(_) => ErrorKind::TemplateMissing,
            _ => ErrorKind::ServerError,
        };
        Self {
            kind,
            detail: error.to_string(),
        }
    }
}
