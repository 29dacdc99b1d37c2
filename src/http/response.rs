/// HTTP status codes produced by the server.
///
/// - `Ok` (200): File returned
/// - `Created` (201): File created, overwritten or appended to
/// - `NoContent` (204): File deleted
/// - `BadRequest` (400): Malformed request or missing precondition
/// - `Forbidden` (403): Path not on the relevant access list
/// - `NotFound` (404): File does not exist
/// - `UnsupportedMediaType` (415): Content-Type does not match the path
/// - `InternalServerError` (500): Append or filesystem failure
/// - `NotImplemented` (501): Unsupported method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
    /// 501 Not Implemented
    NotImplemented,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use filegate::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use filegate::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

/// Content type used when the caller does not name one.
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// A complete HTTP response ready to be serialized.
///
/// `Content-Type` and `Content-Length` are derived from `content_type` and
/// `body` at serialization time, and only when the body is non-empty.
/// `headers` carries anything extra, in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Type announced for a non-empty body
    pub content_type: String,
    /// Extra headers, emitted in insertion order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("text/plain")
///     .body(b"hello".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends an extra header. Headers keep insertion order on the wire.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Builds a response with a body of the given type.
    pub fn build(status: StatusCode, body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        ResponseBuilder::new(status)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// A bare status line, no headers, no body.
    pub fn status_only(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }

    /// A short human-readable message under the default content type.
    pub fn message(status: StatusCode, message: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(status).body(message).build()
    }

    /// Creates a 200 OK response with the given body and type.
    pub fn ok(body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        Self::build(StatusCode::Ok, body, content_type)
    }

    /// Status line as logged, e.g. "HTTP/1.1 404 Not Found".
    pub fn status_line(&self) -> String {
        format!(
            "HTTP/1.1 {} {}",
            self.status.as_u16(),
            self.status.reason_phrase()
        )
    }
}
