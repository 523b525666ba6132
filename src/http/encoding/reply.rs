use super::error::ApiRejection;
use warp::reply::Reply;
use warp::Rejection;

pub fn json_encode(
    value: Result<impl serde::Serialize, impl Into<ApiRejection>>,
) -> Result<impl Reply, Rejection> {
    value
        .map(|v| warp::reply::json(&v))
        .map_err(|e| warp::reject::custom::<ApiRejection>(e.into()))
}

pub fn html(value: Result<String, impl Into<ApiRejection>>) -> Result<impl Reply, Rejection> {
    value
        .map(warp::reply::html)
        .map_err(|e| warp::reject::custom::<ApiRejection>(e.into()))
}

pub fn accept<T, E>(result: Result<T, E>) -> Result<T, Rejection>
where
    E: Into<ApiRejection>,
{
    result.map_err(|e| warp::reject::custom(e.into()))
}
