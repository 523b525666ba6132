use crate::core::types::{RedirectUri, UserId};

pub mod authorization;
pub mod error;
pub mod token;

pub use authorization::*;
pub use token::*;

/// Query of the provider's redirect back to the service.
///
/// Every field is optional: the provider sends `error` instead of `code` on
/// denial, and `state` is whatever the browser hands us.
#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Parameters appended to the landing page once the flow is over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct CallbackOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    pub message: String,
}

impl CallbackOutcome {
    pub fn completed(user_id: UserId) -> Self {
        let message = format!("OAuth authorization completed successfully for {}", user_id);
        Self {
            success: Some(true),
            error: None,
            user_id: Some(user_id),
            message,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: None,
            error: Some(true),
            user_id: None,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }
}

#[derive(Debug, Clone)]
pub struct Redirect<T> {
    pub uri: RedirectUri,
    pub params: T,
}

impl<T> Redirect<T> {
    pub fn new(uri: RedirectUri, params: T) -> Self {
        Redirect { uri, params }
    }
}

impl<T: serde::Serialize> Redirect<T> {
    /// Target with the parameters appended as a query string.
    ///
    /// Works for relative targets such as `/`, which `Url` cannot represent.
    pub fn location(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let query = serde_urlencoded::to_string(&self.params)?;
        if query.is_empty() {
            return Ok(self.uri.0.clone());
        }
        let separator = if self.uri.0.contains('?') { '&' } else { '?' };
        Ok(format!("{}{}{}", self.uri.0, separator, query))
    }
}
