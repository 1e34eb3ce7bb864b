use std::collections::BTreeMap;

/// HTTP status codes supported by the server.
///
/// Common HTTP status codes used in responses:
/// - `Ok` (200): Request successful
/// - `SeeOther` (303): Redirect after a form submission
/// - `Forbidden` (403): Path traversal attempt
/// - `NotFound` (404): No route and no file
/// - `PayloadTooLarge` (413): Declared body exceeds the configured maximum
/// - `InternalServerError` (500): Handler failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 303 See Other
    SeeOther,
    /// 400 Bad Request
    BadRequest,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 413 Payload Too Large
    PayloadTooLarge,
    /// 500 Internal Server Error
    InternalServerError,
    /// Any other code, with its reason phrase (e.g. `Custom(302, "Found")`).
    Custom(u16, &'static str),
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use keel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::SeeOther => 303,
            StatusCode::BadRequest => 400,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::PayloadTooLarge => 413,
            StatusCode::InternalServerError => 500,
            StatusCode::Custom(code, _) => *code,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use keel::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::SeeOther => "See Other",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::Custom(_, reason) => *reason,
        }
    }

    /// Client and server errors (>= 400). These always close the connection.
    pub fn is_error(&self) -> bool {
        self.as_u16() >= 400
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// `Content-Type`, `Content-Length` and `Connection` are emitted by the
/// writer from `content_type`, `body` and `keep_alive`; `headers` holds
/// anything extra (e.g. `Location`).
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// MIME type of the body
    pub content_type: String,
    /// Additional HTTP headers
    pub headers: BTreeMap<String, String>,
    /// Response body as bytes
    pub body: Vec<u8>,
    /// Whether the connection may serve another request afterwards
    pub keep_alive: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .content_type("application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    response: Response,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: StatusCode::Ok,
            content_type: "text/html".to_string(),
            headers: BTreeMap::new(),
            body: Vec::new(),
            keep_alive: true,
        }
    }
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            response: Response {
                status,
                ..Response::default()
            },
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.response.content_type = content_type.into();
        self
    }

    /// Adds or replaces an extra header.
    ///
    /// # Example
    ///
    /// ```ignore
    /// builder.header("Location", "/chat")
    ///     .header("Cache-Control", "no-cache")
    /// ```
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.response.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.response.body = body.into();
        self
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.response.keep_alive = keep_alive;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        self.response
    }
}

impl Response {
    /// Creates a 200 OK `text/html` response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok).body(body).build()
    }

    /// Alias of [`Response::ok`] that reads better in handlers.
    pub fn html(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::ok(body)
    }

    /// Creates a 200 OK `text/plain` response.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        ResponseBuilder::new(StatusCode::Ok)
            .content_type("text/plain")
            .body(body)
            .build()
    }

    /// 303 See Other pointing at `location` (Post/Redirect/Get).
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::SeeOther)
            .header("Location", location)
            .build()
    }

    /// Creates a 403 Forbidden response.
    pub fn forbidden() -> Self {
        ResponseBuilder::new(StatusCode::Forbidden)
            .body("<h1>403 Forbidden: Directory traversal detected</h1>")
            .build()
    }

    /// Creates a 404 Not Found response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound)
            .body("<h1>404: File Not Found</h1>")
            .build()
    }

    /// Creates a 413 Payload Too Large response. Always closes the connection.
    pub fn payload_too_large() -> Self {
        ResponseBuilder::new(StatusCode::PayloadTooLarge)
            .content_type("text/plain")
            .body("Payload exceeds limits.")
            .keep_alive(false)
            .build()
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError)
            .content_type("text/plain")
            .body("500 Internal Server Error")
            .build()
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status_text(&self) -> &'static str {
        self.status.reason_phrase()
    }
}
