use std::sync::Arc;
use warp::Filter;

use crate::provider::OAuthManager;

mod endpoints;

use endpoints::{api::api_endpoint, oauth::oauth_endpoint, pages::pages_endpoint};

use super::encoding::error::handle_reject;

#[derive(Debug)]
pub struct Server {
    manager: Arc<OAuthManager>,
}

/// Full route tree: JSON API, templated pages, then static assets.
pub fn routes(
    manager: Arc<OAuthManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let assets = warp::get().and(warp::fs::dir(manager.config().frontend_dir().to_path_buf()));

    let api = warp::path("api")
        .and(api_endpoint(manager.clone()).or(oauth_endpoint(manager.clone())));

    let pages = pages_endpoint(manager);

    api.or(pages)
        .or(assets)
        .recover(handle_reject)
        .with(warp::log("http-api"))
}

impl Server {
    pub fn new(manager: Arc<OAuthManager>) -> Self {
        Self { manager }
    }

    pub async fn serve(self) -> Option<()> {
        let addr = self.manager.config().bind_address();
        let routes = routes(self.manager);

        tracing::info!(%addr, "Listening");
        warp::serve(routes).run(addr).await;

        Some(())
    }
}
