use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{event, Level};

use crate::core::models::ClientCredentials;
use crate::provider::error::Error;

/// Client secret file as downloaded from the Google Cloud console.
///
/// Credentials sit under `web` for web applications and `installed` for
/// desktop clients; both carry the same fields we need.
#[derive(serde::Deserialize)]
struct ClientSecretFile {
    web: Option<ClientCredentials>,
    installed: Option<ClientCredentials>,
}

#[derive(Debug, Clone)]
pub struct SecretsLoader {
    path: PathBuf,
}

impl SecretsLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the secret file, returning `Ok(None)` while it has not been provisioned.
    pub async fn load(&self) -> Result<Option<ClientCredentials>, Error> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                event!(Level::DEBUG, path = %self.path.display(), "No client secrets file");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let file: ClientSecretFile = serde_json::from_str(&contents)
            .map_err(|e| Error::SecretsMalformed(e.to_string()))?;

        file.web
            .or(file.installed)
            .map(Some)
            .ok_or_else(|| Error::SecretsMalformed("expected a `web` or `installed` section".to_string()))
    }
}
