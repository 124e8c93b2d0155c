use crate::errors::ServerError;
use crate::templates::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::error;

/// Render an error for the caller: JSON for API routes, an HTML page otherwise.
/// Server faults are logged in full here and shown generically.
pub fn error_to_response(err: ServerError, api: bool) -> Response {
    let status = err.status();
    if status >= 500 {
        error!("Request failed: {err}");
    }

    let built = if api {
        let mut body = json!({
            "error": err.code(),
            "message": err.public_message(),
        });
        if let ServerError::Validation(fields) = &err {
            body["fields"] = json!(fields);
        }
        ResponseBuilder::new()
            .status(status)
            .header("Content-Type", mime::APPLICATION_JSON.essence_str())
            .body(Body::from(body.to_string()))
    } else {
        ResponseBuilder::new()
            .status(status)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(Body::from(
                error_page(status, &err.public_message()).into_string(),
            ))
    };

    built.unwrap_or_else(|e| {
        error!("Failed to build error response: {e}");
        Response::new(Body::from("Internal Server Error"))
    })
}
