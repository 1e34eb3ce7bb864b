//! Keel - a small threaded HTTP/1.1 server
//!
//! Core library: wire codec, route table with static file fallback,
//! keep-alive connection handling and the worker pool lifecycle.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod static_files;

pub use config::Config;
pub use http::request::{Method, Request};
pub use http::response::{Response, ResponseBuilder, StatusCode};
pub use router::{Handler, Router};
pub use server::Server;
pub use static_files::StaticFiles;
