pub mod comments;
pub mod likes;
pub mod moderation;

use axum::http::StatusCode;
use domain::Error;

/// Single mapping from the core error taxonomy to transport status codes.
pub(crate) fn api_err(err: Error) -> (StatusCode, String) {
    let status = match &err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Forbidden => StatusCode::FORBIDDEN,
        Error::DepthExceeded => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Unavailable(_) => {
            tracing::error!("storage failure: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, err.to_string())
}
