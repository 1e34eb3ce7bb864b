use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Only `POST` changes how a request is processed (its body may be parsed
/// into parameters). Anything outside this list is a malformed request line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    #[default]
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
}

/// A parsed HTTP request, as handed to route handlers.
///
/// Built fresh for every request on a connection. `params` holds query
/// parameters and, for form/JSON `POST` bodies, the decoded body fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Normalized path without a leading `/` (e.g. `"greet"`).
    pub path: String,
    /// Raw query string after `?`, undecoded.
    pub query: String,
    /// Parameters from the query string and parsed body. Later keys win.
    pub params: HashMap<String, String>,
    /// Raw request body, exactly `Content-Length` bytes when present.
    pub body: Vec<u8>,
    /// `false` when the client sent `Connection: close`.
    pub keep_alive: bool,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    path: Option<String>,
    query: String,
    params: HashMap<String, String>,
    body: Vec<u8>,
    keep_alive: bool,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, typically uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a known method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use keel::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: String::new(),
            query: String::new(),
            params: HashMap::new(),
            body: Vec::new(),
            keep_alive: true,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            path: None,
            query: String::new(),
            params: HashMap::new(),
            body: Vec::new(),
            keep_alive: true,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method,
            path: self.path.ok_or("path missing")?,
            query: self.query,
            params: self.params,
            body: self.body,
            keep_alive: self.keep_alive,
        })
    }
}

impl Request {
    /// Looks up a query or body parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|v| v.as_str())
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
