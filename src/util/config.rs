use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::core::types::RedirectUri;

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_THEME_COLOR: &str = "#667eea";

const CALLBACK_PATH: &str = "/api/oauth/callback";

/// Process configuration, read once at start-up from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[clap(
    name = "tubeauthd",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS")
)]
pub struct Config {
    /// Public host name; `localhost` selects the plain-http development callback
    #[clap(long, env = "DOMAIN", default_value = "localhost")]
    domain: String,
    #[clap(long, env = "APP_TITLE", default_value = "YouTube OAuth Manager")]
    app_title: String,
    #[clap(long, env = "LOGO_PATH", default_value = "/logo.svg")]
    logo_path: String,
    #[clap(long, env = "THEME_COLOR", default_value = DEFAULT_THEME_COLOR)]
    theme_color: String,
    #[clap(long, env = "COMPANY_NAME", default_value = "YouTube OAuth Manager")]
    company_name: String,
    /// Defaults to privacy@<domain>
    #[clap(long, env = "PRIVACY_CONTACT_EMAIL")]
    privacy_contact_email: Option<String>,
    #[clap(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    bind_address: SocketAddr,
    #[clap(long, env = "SECRETS_FILE", default_value = "secrets/client_secret.json", parse(from_os_str))]
    secrets_file: PathBuf,
    #[clap(long, env = "CREDENTIALS_DIR", default_value = "secrets/credentials", parse(from_os_str))]
    credentials_dir: PathBuf,
    #[clap(long, env = "FRONTEND_DIR", default_value = "frontend", parse(from_os_str))]
    frontend_dir: PathBuf,
    #[clap(long, env = "AUTH_URI", default_value = DEFAULT_AUTH_URI)]
    auth_uri: Url,
    #[clap(long, env = "TOKEN_URI", default_value = DEFAULT_TOKEN_URI)]
    token_uri: Url,
    #[clap(long, env = "TOKEN_TIMEOUT_SECS", default_value = "10")]
    token_timeout_secs: u64,
}

/// Front-end branding exposed through `/api/config`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize)]
pub struct Branding {
    pub app_title: String,
    pub logo_path: String,
    pub theme_color: String,
}

impl Config {
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_local(&self) -> bool {
        self.domain == "localhost"
    }

    pub fn redirect_uri(&self) -> RedirectUri {
        let uri = if self.is_local() {
            format!("http://{}:8000{}", self.domain, CALLBACK_PATH)
        } else {
            format!("https://{}{}", self.domain, CALLBACK_PATH)
        };
        RedirectUri(uri)
    }

    pub fn branding(&self) -> Branding {
        Branding {
            app_title: self.app_title.clone(),
            logo_path: self.logo_path.clone(),
            theme_color: self.theme_color.clone(),
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn privacy_contact_email(&self) -> String {
        self.privacy_contact_email
            .clone()
            .unwrap_or_else(|| format!("privacy@{}", self.domain))
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    pub fn secrets_file(&self) -> &Path {
        &self.secrets_file
    }

    pub fn credentials_dir(&self) -> &Path {
        &self.credentials_dir
    }

    pub fn frontend_dir(&self) -> &Path {
        &self.frontend_dir
    }

    pub fn auth_uri(&self) -> &Url {
        &self.auth_uri
    }

    pub fn token_uri(&self) -> &Url {
        &self.token_uri
    }

    pub fn token_timeout(&self) -> Duration {
        Duration::from_secs(self.token_timeout_secs)
    }
}
