use crate::auth::error::ErrorResponse;
use crate::provider::Error;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

#[derive(Debug)]
pub struct ApiRejection(pub Error);

impl warp::reject::Reject for ApiRejection {}

impl From<Error> for ApiRejection {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<ApiRejection>() {
        Some(ApiRejection(e)) => {
            let body = ErrorResponse::from(e);
            let status = StatusCode::from_u16(body.kind.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Ok(warp::reply::with_status(warp::reply::json(&body), status).into_response())
        }
        None => Err(err),
    }
}
