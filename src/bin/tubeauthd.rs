use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tubeauth::http::server::Server;
use tubeauth::provider::{Error, OAuthManager};
use tubeauth::util::config::Config;

async fn tubeauthd(config: Config) -> Result<(), Error> {
    tracing::info!(
        domain = config.domain(),
        redirect_uri = %config.redirect_uri(),
        secrets_file = %config.secrets_file().display(),
        "Starting"
    );

    let manager = Arc::new(OAuthManager::from_config(config)?);
    if !manager.check_setup().await.configured {
        tracing::warn!("Client secrets are not configured yet; /api/oauth/start will fail until they are");
    }

    let server = Server::new(manager);
    server.serve().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();
    tubeauthd(config).await
}
