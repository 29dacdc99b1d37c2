//! Request evaluation errors
//!
//! Every way a request can fail maps to exactly one status code and a short
//! body. Handlers return `Result<Response, ServeError>` and the dispatcher
//! turns the error side into a response.

use crate::http::parser::ParseError;
use crate::http::response::{Response, StatusCode};
use crate::store::access::Operation;
use crate::store::append::AppendError;

pub const NOT_FOUND_PAGE: &str = "<html><body><h1>404 Not Found</h1></body></html>";
pub const FILE_MISSING: &str = "File does not exist.";
pub const HEAD_FILE_MISSING: &str = "File does not exist";

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    #[error("method {0} is not implemented")]
    NotImplemented(String),

    #[error("{0:?} not permitted")]
    NotPermitted(Operation),

    #[error("resource not found")]
    NotFound(&'static str),

    #[error("missing Content-Type header")]
    MissingContentType,

    #[error("Content-Type {got} does not match {expected}")]
    ContentTypeMismatch { expected: &'static str, got: String },

    #[error("missing body")]
    MissingBody,

    #[error("append failed: {0}")]
    Append(#[from] AppendError),

    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("remove failed: {0}")]
    Remove(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::Malformed(_) => StatusCode::BadRequest,
            ServeError::NotImplemented(_) => StatusCode::NotImplemented,
            ServeError::NotPermitted(_) => StatusCode::Forbidden,
            ServeError::NotFound(_) => StatusCode::NotFound,
            ServeError::MissingContentType => StatusCode::BadRequest,
            ServeError::ContentTypeMismatch { .. } => StatusCode::UnsupportedMediaType,
            ServeError::MissingBody => StatusCode::BadRequest,
            ServeError::Append(AppendError::MalformedPosition(_)) => StatusCode::BadRequest,
            ServeError::Append(_) => StatusCode::InternalServerError,
            ServeError::Write(_) | ServeError::Remove(_) | ServeError::Io(_) => {
                StatusCode::InternalServerError
            }
        }
    }

    pub fn into_response(self) -> Response {
        let status = self.status();
        let body: &str = match &self {
            ServeError::Malformed(_)
            | ServeError::NotImplemented(_)
            | ServeError::Remove(_) => "",
            ServeError::NotPermitted(Operation::Delete) => "Not allowed to delete the file",
            ServeError::NotPermitted(_) => "The file is not contained in the server's whitelist",
            ServeError::NotFound(body) => *body,
            ServeError::MissingContentType => "Missing Content-Type header",
            ServeError::ContentTypeMismatch { .. } => {
                "The Content-Type header and the filepath do not match"
            }
            ServeError::MissingBody => "Missing Body",
            ServeError::Append(AppendError::MalformedPosition(_)) => {
                "Malformed Append-Position header"
            }
            ServeError::Append(_) => "Failed to append to file",
            ServeError::Write(_) => "Could not write to file",
            ServeError::Io(_) => "Could not read file",
        };

        Response::message(status, body)
    }
}
