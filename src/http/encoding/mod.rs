pub mod error;
pub mod reply;

use warp::{Filter, Rejection};

use crate::provider::authorization::StartRequest;
use crate::provider::Error;

const MAX_BODY_BYTES: u64 = 16 * 1024;

/// JSON body of `POST /api/oauth/start`.
///
/// Unreadable bodies are reported like a missing user id instead of warp's
/// plain-text rejection.
pub fn start_request() -> impl Filter<Extract = (StartRequest,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::json::<StartRequest>())
        .or_else(|_| async move {
            reply::accept::<(StartRequest,), _>(Err(Error::InvalidInput(
                "Request body must be a JSON object with a user_id".to_string(),
            )))
        })
}
