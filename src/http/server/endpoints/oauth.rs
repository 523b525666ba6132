use std::sync::Arc;

use warp::Filter;

use crate::auth::CallbackQuery;
use crate::http::encoding::{self, reply};
use crate::provider::OAuthManager;

pub fn oauth_endpoint(
    manager: Arc<OAuthManager>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_manager = warp::any().map(move || manager.clone());

    let check_setup = warp::path!("check-setup")
        .and(warp::get())
        .and(with_manager.clone())
        .and_then(|manager: Arc<OAuthManager>| async move {
            Ok::<_, warp::Rejection>(warp::reply::json(&manager.check_setup().await))
        });

    let start = warp::path!("start")
        .and(warp::post())
        .and(with_manager.clone())
        .and(encoding::start_request())
        .and_then(|manager: Arc<OAuthManager>, req| async move {
            reply::json_encode(manager.start(req).await)
        });

    // Always a redirect, whatever happens during the exchange
    let callback = warp::path!("callback")
        .and(warp::get())
        .and(with_manager.clone())
        .and(
            warp::query::<CallbackQuery>()
                .or(warp::any().map(CallbackQuery::default))
                .unify(),
        )
        .and_then(|manager: Arc<OAuthManager>, query| async move {
            Ok::<_, warp::Rejection>(manager.callback(query).await)
        });

    warp::path("oauth").and(check_setup.or(start).or(callback))
}
