use std::sync::Arc;

use warp::Filter;

use crate::http::encoding::reply;
use crate::provider::{OAuthManager, Page};

pub fn pages_endpoint(
    manager: Arc<OAuthManager>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_manager = warp::any().map(move || manager.clone());

    // The raw template files must not leak through the static asset route
    let index = warp::path::end()
        .or(warp::path!("index.html"))
        .unify()
        .and(warp::get())
        .and(with_manager.clone())
        .and_then(|manager: Arc<OAuthManager>| async move {
            reply::html(manager.render_page(Page::Index).await)
        });

    let privacy = warp::path!("privacy")
        .or(warp::path!("privacy.html"))
        .unify()
        .and(warp::get())
        .and(with_manager.clone())
        .and_then(|manager: Arc<OAuthManager>| async move {
            reply::html(manager.render_page(Page::Privacy).await)
        });

    index.or(privacy)
}
