use crate::auth::Redirect;
use warp::http::{header, StatusCode};
use warp::reply::{Reply, Response};

impl<T: serde::Serialize + Send> Reply for Redirect<T> {
    fn into_response(self) -> Response {
        match self.location() {
            Ok(location) => warp::reply::with_header(
                warp::reply::with_status(warp::reply(), StatusCode::FOUND),
                header::LOCATION,
                location,
            )
            .into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
