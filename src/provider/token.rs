use chrono::Utc;
use tracing::{event, Level};
use url::Url;

use crate::auth::{TokenExchange, TokenRequest, TokenResponse};
use crate::core::models::{ClientCredentials, CredentialBundle};
use crate::core::types::{AuthCode, RedirectUri, Scope};
use crate::provider::error::Error;
use crate::util::config::Config;

/// Token endpoint client backed by `reqwest`.
pub struct TokenClient {
    http: reqwest::Client,
    token_uri: Url,
    redirect_uri: RedirectUri,
    scopes: Scope,
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenClient {{ token_uri: {} }}", self.token_uri)
    }
}

impl TokenClient {
    pub fn new(config: &Config, scopes: Scope) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.token_timeout())
            .build()?;

        Ok(Self {
            http,
            token_uri: config.token_uri().clone(),
            redirect_uri: config.redirect_uri(),
            scopes,
        })
    }
}

#[async_trait::async_trait]
impl TokenExchange for TokenClient {
    #[tracing::instrument(skip_all, fields(token_uri = %self.token_uri))]
    async fn exchange(
        &self,
        credentials: &ClientCredentials,
        code: &AuthCode,
    ) -> Result<CredentialBundle, Error> {
        let form = TokenRequest::authorization_code(credentials, code, &self.redirect_uri);

        let response = self
            .http
            .post(self.token_uri.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::ProviderExchange(e.to_string()))?;

        let status = response.status();
        event!(Level::DEBUG, %status, "Token endpoint responded");

        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            event!(Level::WARN, %status, body = %body, "Token exchange rejected");
            return Err(Error::ProviderExchange(format!("token endpoint returned {}", status)));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::ProviderExchange(e.to_string()))?;

        Ok(tokens.into_bundle(credentials, self.token_uri.as_str(), &self.scopes, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_token_endpoint, test_config, MockToken};

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: crate::core::types::ClientId("client-id".to_string()),
            client_secret: crate::core::types::ClientSecret("client-secret".to_string()),
        }
    }

    #[tokio::test]
    async fn exchanges_code_for_bundle() {
        let endpoint = mock_token_endpoint(MockToken::Ok).await;
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path(), &endpoint.uri);
        let client = TokenClient::new(&config, Scope::from_parts(vec!["scope-a"])).unwrap();

        let before = Utc::now();
        let bundle = client
            .exchange(&credentials(), &AuthCode("validcode".to_string()))
            .await
            .unwrap();

        assert_eq!(bundle.access_token, "mock-access-token");
        assert_eq!(bundle.refresh_token.as_deref(), Some("mock-refresh-token"));
        assert_eq!(bundle.token_uri, endpoint.uri.as_str());
        assert_eq!(bundle.client_id.0, "client-id");
        assert!(bundle.scopes.contains("scope-a"));
        let lifetime = (bundle.expiry.unwrap() - before).num_seconds();
        assert!((3599..=3601).contains(&lifetime), "lifetime was {}", lifetime);

        let form = endpoint.last_form().unwrap();
        assert_eq!(form["grant_type"], "authorization_code");
        assert_eq!(form["code"], "validcode");
        assert_eq!(form["client_id"], "client-id");
        assert_eq!(form["client_secret"], "client-secret");
        assert_eq!(form["redirect_uri"], "http://localhost:8000/api/oauth/callback");
    }

    #[tokio::test]
    async fn rejected_exchange_is_a_failure() {
        let endpoint = mock_token_endpoint(MockToken::BadRequest).await;
        let tmp = tempfile::tempdir().unwrap();
        let client = TokenClient::new(&test_config(tmp.path(), &endpoint.uri), Scope::default()).unwrap();

        let result = client.exchange(&credentials(), &AuthCode("used".to_string())).await;
        assert!(matches!(result, Err(Error::ProviderExchange(_))));
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let uri = Url::parse("http://127.0.0.1:9/token").unwrap();
        let client = TokenClient::new(&test_config(tmp.path(), &uri), Scope::default()).unwrap();

        let result = client.exchange(&credentials(), &AuthCode("code".to_string())).await;
        assert!(matches!(result, Err(Error::ProviderExchange(_))));
    }
}
