use crate::auth::TokenExchange;
use crate::core::models::ClientCredentials;
use crate::core::types::{Scope, UserId};
use crate::store::{CredentialStore, SecretsLoader};
use crate::util::config::{Branding, Config};

use tracing::{event, Level};

pub mod authorization;
pub mod callback;
pub mod error;
pub mod pages;
pub mod token;

pub use error::Error;
pub use pages::Page;
pub use token::TokenClient;

pub const SERVICE_NAME: &str = "YouTube OAuth Manager";

pub const YOUTUBE_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/yt-analytics.readonly",
    "https://www.googleapis.com/auth/youtube.readonly",
    "https://www.googleapis.com/auth/yt-analytics-monetary.readonly",
];

pub fn youtube_scopes() -> Scope {
    Scope::from_parts(YOUTUBE_SCOPES.iter().copied())
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub domain: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct SetupResponse {
    pub configured: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub message: &'static str,
    pub user_id: String,
}

/// Composes secrets, the token endpoint and credential storage into the
/// operations served over HTTP.
///
/// Holds no per-flow state: everything a callback needs arrives in its query.
pub struct OAuthManager {
    config: Config,
    secrets: SecretsLoader,
    store: CredentialStore,
    exchange: Box<dyn TokenExchange>,
    scopes: Scope,
}

impl std::fmt::Debug for OAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthManager")
            .field("secrets", &self.secrets)
            .field("store", &self.store)
            .finish()
    }
}

impl OAuthManager {
    pub fn from_config(config: Config) -> Result<Self, Error> {
        let exchange = TokenClient::new(&config, youtube_scopes())?;
        Ok(Self::with_exchange(config, Box::new(exchange)))
    }

    pub fn with_exchange(config: Config, exchange: Box<dyn TokenExchange>) -> Self {
        Self {
            secrets: SecretsLoader::new(config.secrets_file()),
            store: CredentialStore::new(config.credentials_dir()),
            exchange,
            scopes: youtube_scopes(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    async fn client_credentials(&self) -> Result<ClientCredentials, Error> {
        self.secrets.load().await?.ok_or(Error::ConfigurationMissing)
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            status: "ok",
            service: SERVICE_NAME,
            domain: self.config.domain().to_string(),
            redirect_uri: self.config.redirect_uri().0,
        }
    }

    pub fn branding(&self) -> Branding {
        self.config.branding()
    }

    /// Reports whether the client secrets are in place. Never fails.
    pub async fn check_setup(&self) -> SetupResponse {
        match self.secrets.load().await {
            Ok(Some(_)) => SetupResponse {
                configured: true,
                message: "Google OAuth client secrets found".to_string(),
            },
            Ok(None) => SetupResponse {
                configured: false,
                message: "Please configure Google OAuth client secrets".to_string(),
            },
            Err(e) => {
                event!(Level::ERROR, error = %e, "Unable to read client secrets");
                SetupResponse {
                    configured: false,
                    message: e.to_string(),
                }
            }
        }
    }

    pub fn validate_user_id(&self, candidate: &str) -> ValidationResponse {
        let valid = UserId::is_valid(candidate);
        ValidationResponse {
            valid,
            message: if valid {
                "User ID is valid"
            } else {
                "User ID must be 3-50 characters long and contain only letters and numbers"
            },
            user_id: candidate.to_string(),
        }
    }
}
