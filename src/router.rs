//! Route table.
//!
//! Routes are exact-match, case-sensitive path keys. Anything that misses
//! the table falls through to the static file resolver. The table is filled
//! before the server starts and is read-only while serving.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::http::request::Request;
use crate::http::response::Response;
use crate::static_files::StaticFiles;

/// Anything that turns a request into a response.
///
/// Implemented for plain closures, so routes are usually registered as
/// `|req: &Request| Response::ok(...)`. State shared between requests is
/// captured by the closure and synchronized by the handler itself.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: &Request) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Response + Send + Sync + 'static,
{
    fn call(&self, req: &Request) -> Response {
        self(req)
    }
}

pub struct Router {
    routes: HashMap<String, Box<dyn Handler>>,
    files: StaticFiles,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Empty table, serving files from `public/` as the fallback.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            files: StaticFiles::default(),
        }
    }

    /// Replaces the static file fallback.
    pub fn fallback(mut self, files: StaticFiles) -> Self {
        self.files = files;
        self
    }

    /// Builder form of [`Router::register`].
    pub fn route(mut self, path: &str, handler: impl Handler) -> Self {
        self.register(path, handler);
        self
    }

    /// Registers `handler` under `path`.
    ///
    /// One leading `/` is ignored, matching how request paths are
    /// normalized. The first registration for a path wins; later ones are
    /// dropped and `false` is returned.
    pub fn register(&mut self, path: &str, handler: impl Handler) -> bool {
        let key = path.strip_prefix('/').unwrap_or(path);
        if self.routes.contains_key(key) {
            tracing::warn!(path = %key, "Route already registered, keeping the first handler");
            return false;
        }
        self.routes.insert(key.to_string(), Box::new(handler));
        true
    }

    pub fn lookup(&self, path: &str) -> Option<&dyn Handler> {
        self.routes.get(path).map(|h| h.as_ref())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn files(&self) -> &StaticFiles {
        &self.files
    }

    /// Normalizes `req.path`, then runs the matching handler or serves a file.
    ///
    /// A panicking handler yields 500 instead of taking the worker down.
    pub async fn dispatch(&self, req: &mut Request) -> Response {
        req.path = self.files.normalize(&req.path);

        match self.lookup(&req.path) {
            Some(handler) => {
                let req = &*req;
                catch_unwind(AssertUnwindSafe(|| handler.call(req))).unwrap_or_else(|_| {
                    tracing::error!(path = %req.path, "Route handler panicked");
                    Response::internal_error()
                })
            }
            None => self.files.serve(&req.path).await,
        }
    }
}
