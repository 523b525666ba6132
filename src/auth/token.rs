use chrono::{DateTime, Utc};

use crate::core::models::{ClientCredentials, CredentialBundle};
use crate::core::types::{AuthCode, ClientId, ClientSecret, GrantType, RedirectUri, Scope};
use crate::provider::error::Error;

/// Form body of the authorization code grant.
#[derive(serde::Serialize)]
pub struct TokenRequest<'r> {
    pub client_id: &'r ClientId,
    pub client_secret: &'r ClientSecret,
    pub code: &'r AuthCode,
    pub grant_type: GrantType,
    pub redirect_uri: &'r RedirectUri,
}

impl<'r> TokenRequest<'r> {
    pub fn authorization_code(
        credentials: &'r ClientCredentials,
        code: &'r AuthCode,
        redirect_uri: &'r RedirectUri,
    ) -> Self {
        Self {
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            code,
            grant_type: GrantType::AuthorizationCode,
            redirect_uri,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    pub fn into_bundle(
        self,
        credentials: &ClientCredentials,
        token_uri: &str,
        scopes: &Scope,
        now: DateTime<Utc>,
    ) -> CredentialBundle {
        CredentialBundle {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_uri: token_uri.to_string(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            scopes: scopes.clone(),
            expiry: CredentialBundle::expiry_from(now, self.expires_in),
        }
    }
}

/// Trades an authorization code for a credential bundle at the provider.
///
/// Implementations make exactly one attempt; retrying is left to the caller.
#[async_trait::async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(
        &self,
        credentials: &ClientCredentials,
        code: &AuthCode,
    ) -> Result<CredentialBundle, Error>;
}
