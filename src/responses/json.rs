use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde::Serialize;
use tracing::error;

fn build<T: Serialize>(status: u16, value: &T, set_cookie: Option<&str>) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| {
        error!("JSON encode failed: {e}");
        ServerError::InternalError
    })?;

    let mut builder = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.essence_str());
    if let Some(cookie) = set_cookie {
        builder = builder.header("Set-Cookie", cookie);
    }
    builder
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    build(status, value, None)
}

pub fn json_with_cookie<T: Serialize>(status: u16, value: &T, cookie: &str) -> ResultResp {
    build(status, value, Some(cookie))
}
