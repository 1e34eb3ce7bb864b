//! Static file fallback.
//!
//! Requests that match no route are answered from a fixed asset root.
//! Paths containing `..` are refused before the filesystem is touched.

use std::path::{Component, Path, PathBuf};

use crate::config::StaticFilesConfig;
use crate::http::mime::get_mime_type;
use crate::http::parser::DEFAULT_INDEX;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    url_prefix: String,
}

impl Default for StaticFiles {
    fn default() -> Self {
        Self::from_config(&StaticFilesConfig::default())
    }
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix: String = url_prefix.into();
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(cfg: &StaticFilesConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.url_prefix.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a parsed request path onto the route/file key space.
    ///
    /// Empty paths, `/` and the bare asset prefix become the index document;
    /// a leading `<prefix>/` is stripped so `public/style.css` and
    /// `style.css` name the same thing.
    pub fn normalize(&self, path: &str) -> String {
        let prefix = self.url_prefix.as_str();
        let bare = path.strip_suffix('/').unwrap_or(path);

        if path.is_empty() || path == "/" || (!prefix.is_empty() && bare == prefix) {
            return DEFAULT_INDEX.to_string();
        }

        if !prefix.is_empty() {
            if let Some(rest) = path.strip_prefix(prefix).and_then(|r| r.strip_prefix('/')) {
                return rest.to_string();
            }
        }

        path.to_string()
    }

    /// Reads `path` under the asset root.
    ///
    /// 403 for traversal attempts, 404 when the file cannot be read.
    pub async fn serve(&self, path: &str) -> Response {
        if !is_safe(path) {
            tracing::warn!(path = %path, "Rejected path traversal attempt");
            return Response::forbidden();
        }

        let full_path = self.root.join(path);
        match tokio::fs::read(&full_path).await {
            Ok(contents) => ResponseBuilder::new(StatusCode::Ok)
                .content_type(get_mime_type(path))
                .body(contents)
                .build(),
            Err(e) => {
                tracing::debug!(path = %full_path.display(), error = %e, "Static file not found");
                Response::not_found()
            }
        }
    }
}

/// Only plain relative components, and never a `..` anywhere in the string.
fn is_safe(path: &str) -> bool {
    !path.contains("..")
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
