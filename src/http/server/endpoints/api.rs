use std::sync::Arc;

use percent_encoding::percent_decode_str;
use warp::Filter;

use crate::provider::OAuthManager;

pub fn api_endpoint(
    manager: Arc<OAuthManager>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_manager = warp::any().map(move || manager.clone());

    let status = warp::path!("status")
        .and(warp::get())
        .and(with_manager.clone())
        .map(|manager: Arc<OAuthManager>| warp::reply::json(&manager.status()));

    let config = warp::path!("config")
        .and(warp::get())
        .and(with_manager.clone())
        .map(|manager: Arc<OAuthManager>| warp::reply::json(&manager.branding()));

    let validate = warp::path!("validate-user-id" / String)
        .and(warp::get())
        .and(with_manager.clone())
        .map(|id: String, manager: Arc<OAuthManager>| {
            // path segments arrive still percent-encoded
            let id = percent_decode_str(&id).decode_utf8_lossy();
            warp::reply::json(&manager.validate_user_id(&id))
        });

    status.or(config).or(validate)
}
