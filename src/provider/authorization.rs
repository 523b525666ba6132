use tracing::{event, Level};

use crate::auth::build_authorization_url;
use crate::core::types::UserId;

use super::{Error, OAuthManager};

#[derive(Debug, Clone, Default)]
#[derive(serde::Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone)]
#[derive(serde::Serialize)]
pub struct StartResponse {
    pub user_id: UserId,
    pub auth_url: String,
    pub message: &'static str,
}

impl OAuthManager {
    #[tracing::instrument(skip_all)]
    pub async fn start(&self, req: StartRequest) -> Result<StartResponse, Error> {
        let raw = req.user_id.as_deref().map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::InvalidInput("User ID is required".to_string()));
        }

        // Missing secrets outrank a malformed id
        let credentials = self.client_credentials().await?;
        let user_id = UserId::parse(raw).map_err(|e| {
            event!(Level::DEBUG, "Rejected malformed user id");
            Error::from(e)
        })?;
        let auth_url = build_authorization_url(
            self.config.auth_uri(),
            &credentials.client_id,
            &self.config.redirect_uri(),
            &self.scopes,
            &user_id,
        )?;

        event!(Level::INFO, user_id = %user_id, "Issuing authorization URL");
        Ok(StartResponse {
            user_id,
            auth_url: auth_url.into(),
            message: "Visit the auth_url to complete OAuth authorization",
        })
    }
}
