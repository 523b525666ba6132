pub mod secrets;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{event, Level};

use crate::core::models::CredentialBundle;
use crate::core::types::UserId;
use crate::provider::error::Error;

pub use secrets::SecretsLoader;

const FILE_PREFIX: &str = "creds_";
const FILE_EXTENSION: &str = "json";

/// One JSON credential file per user id inside a single directory.
///
/// Writes for the same user id are not coordinated; the last one wins.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, user_id: &UserId) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", FILE_PREFIX, user_id, FILE_EXTENSION))
    }

    #[tracing::instrument(skip(self, bundle))]
    pub async fn save(&self, user_id: &UserId, bundle: &CredentialBundle) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(user_id);
        let contents = serde_json::to_vec_pretty(bundle)?;

        let mut file = Self::open_for_write(&path).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;

        event!(Level::INFO, path = %path.display(), "Saved credentials");
        Ok(())
    }

    pub async fn load(&self, user_id: &UserId) -> Result<Option<CredentialBundle>, Error> {
        match fs::read(self.path_for(user_id)).await {
            Ok(contents) => Ok(Some(serde_json::from_slice(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// User ids with stored credentials, sorted. Unrelated files are skipped.
    pub async fn list(&self) -> Result<Vec<UserId>, Error> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(id) = entry.file_name().to_str().and_then(Self::user_id_from_file_name) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Removes the stored bundle. Returns `false` when there was none.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, user_id: &UserId) -> Result<bool, Error> {
        match fs::remove_file(self.path_for(user_id)).await {
            Ok(()) => {
                event!(Level::INFO, "Deleted credentials");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn user_id_from_file_name(name: &str) -> Option<UserId> {
        let stem = name
            .strip_prefix(FILE_PREFIX)?
            .strip_suffix(FILE_EXTENSION)?
            .strip_suffix('.')?;
        UserId::parse(stem).ok()
    }

    #[cfg(unix)]
    async fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
        use std::os::unix::fs::PermissionsExt;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .await?;
        // mode only applies on creation
        file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        Ok(file)
    }

    #[cfg(not(unix))]
    async fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ClientId, ClientSecret, Scope};
    use chrono::{Duration, Utc};

    fn bundle(token: &str) -> CredentialBundle {
        CredentialBundle {
            access_token: token.to_string(),
            refresh_token: Some("refresh".to_string()),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            client_id: ClientId("client".to_string()),
            client_secret: ClientSecret("secret".to_string()),
            scopes: Scope::from_parts(vec!["https://www.googleapis.com/auth/youtube.readonly"]),
            expiry: Some(Utc::now() + Duration::seconds(3600)),
        }
    }

    fn id(s: &str) -> UserId {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn creates_directory_and_names_file_after_user() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path().join("nested").join("credentials"));

        store.save(&id("user123"), &bundle("first")).await.unwrap();

        let path = store.dir().join("creds_user123.json");
        assert_eq!(store.path_for(&id("user123")), path);
        assert!(path.is_file());
        let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["token"], "first");
    }

    #[tokio::test]
    async fn overwrites_previous_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path());

        store.save(&id("user123"), &bundle("first")).await.unwrap();
        store.save(&id("user123"), &bundle("second")).await.unwrap();

        let loaded = store.load(&id("user123")).await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "second");
        assert_eq!(loaded, bundle_with_expiry("second", loaded.expiry));
    }

    fn bundle_with_expiry(token: &str, expiry: Option<chrono::DateTime<Utc>>) -> CredentialBundle {
        CredentialBundle { expiry, ..bundle(token) }
    }

    #[tokio::test]
    async fn load_of_unknown_user_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path());
        assert!(store.load(&id("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_only_credential_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path());
        assert!(store.list().await.unwrap().is_empty());

        store.save(&id("zeta1"), &bundle("a")).await.unwrap();
        store.save(&id("alpha"), &bundle("b")).await.unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        std::fs::write(tmp.path().join("creds_a-b.json"), "{}").unwrap();
        std::fs::create_dir(tmp.path().join("creds_dir12.json")).unwrap();

        assert_eq!(store.list().await.unwrap(), vec![id("alpha"), id("zeta1")]);
    }

    #[tokio::test]
    async fn missing_directory_lists_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path().join("absent"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deletes_stored_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path());
        store.save(&id("user123"), &bundle("a")).await.unwrap();

        assert!(store.delete(&id("user123")).await.unwrap());
        assert!(!store.delete(&id("user123")).await.unwrap());
        assert!(store.load(&id("user123")).await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn files_are_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(tmp.path());
        store.save(&id("user123"), &bundle("a")).await.unwrap();

        let mode = std::fs::metadata(store.path_for(&id("user123"))).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
