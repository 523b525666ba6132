use tracing::{event, Level};

use crate::auth::{CallbackOutcome, CallbackQuery, Redirect};
use crate::core::types::{AuthCode, RedirectUri, UserId};

use super::error::ResultExt;
use super::{Error, OAuthManager};

const LANDING_PAGE: &str = "/";

impl OAuthManager {
    /// Finishes a consent round-trip. Every outcome, including internal
    /// failures, becomes a redirect to the landing page.
    #[tracing::instrument(skip_all)]
    pub async fn callback(&self, query: CallbackQuery) -> Redirect<CallbackOutcome> {
        let landing = RedirectUri(LANDING_PAGE.to_string());

        match self.complete_authorization(query).await {
            Ok(user_id) => {
                event!(Level::INFO, user_id = %user_id, "OAuth completed");
                Redirect::new(landing, CallbackOutcome::completed(user_id))
            }
            Err(e) => {
                event!(Level::WARN, error = %e, "OAuth callback failed");
                Redirect::new(landing, CallbackOutcome::failed(failure_message(&e)))
            }
        }
    }

    async fn complete_authorization(&self, query: CallbackQuery) -> Result<UserId, Error> {
        let state = query.state.or_invalid_state()?;
        let user_id = UserId::parse(&state).or_invalid_state()?;

        if let Some(error) = query.error {
            return Err(Error::AuthorizationDenied(error));
        }
        let code = query
            .code
            .filter(|c| !c.is_empty())
            .map(AuthCode)
            .ok_or_else(|| Error::InvalidInput("Authorization code is missing".to_string()))?;

        event!(Level::DEBUG, user_id = %user_id, "Exchanging authorization code");
        let credentials = self.client_credentials().await?;
        let bundle = self.exchange.exchange(&credentials, &code).await?;
        self.store.save(&user_id, &bundle).await?;

        Ok(user_id)
    }
}

fn failure_message(error: &Error) -> String {
    match error {
        Error::InvalidState => "Invalid state parameter".to_string(),
        Error::ProviderExchange(_) => "Failed to exchange authorization code for tokens".to_string(),
        e => format!("OAuth authorization failed: {}", e),
    }
}
