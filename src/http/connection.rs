use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::Limits;
use crate::http::parser::{self, parse_request_head};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// One accepted socket and its keep-alive loop.
///
/// The socket is closed when the `Connection` is dropped, whichever way the
/// loop ended.
pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
    limits: Limits,
}

pub enum ConnectionState {
    Reading,
    /// Parsed request, plus a response already decided while reading (413).
    Processing(Box<Request>, Option<Response>),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, router: Arc<Router>, limits: Limits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(limits.read_buffer_size),
            state: ConnectionState::Reading,
            router,
            limits,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some((req, early)) => {
                        self.state = ConnectionState::Processing(Box::new(req), early);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(req, early) => {
                    let mut response = match early.take() {
                        Some(response) => response,
                        None => self.router.dispatch(req).await,
                    };

                    // Errors always close, whatever the client or handler asked for.
                    response.keep_alive = req.keep_alive && !response.status.is_error();

                    info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "{} {} -> {} {}",
                        req.method,
                        req.path,
                        response.status.as_u16(),
                        response.status.reason_phrase()
                    );

                    let keep_alive = response.keep_alive;
                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads one request.
    ///
    /// `Ok(None)` ends the session quietly: the peer closed, went idle past
    /// the read timeout, or sent something that cannot be answered.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<(Request, Option<Response>)>> {
        self.buffer.clear();
        self.buffer.resize(self.limits.read_buffer_size, 0);

        let read = match timeout(self.limits.read_timeout, self.stream.read(&mut self.buffer[..])).await {
            Ok(res) => res?,
            Err(_) => {
                debug!("Idle connection timed out");
                return Ok(None);
            }
        };
        self.buffer.truncate(read);

        if read == 0 {
            // Client closed connection
            return Ok(None);
        }

        let head = match parse_request_head(&self.buffer) {
            Ok(head) => head,
            Err(e) => {
                debug!(error = ?e, "Malformed request, closing connection");
                return Ok(None);
            }
        };
        let body_start = head.body_start();
        let mut request = head.request;

        if let Some(content_length) = head.content_length {
            if content_length > self.limits.max_payload_size {
                // Never dispatched, so normalize here to log the routed key.
                request.path = self.router.files().normalize(&request.path);
                warn!(
                    content_length,
                    max = self.limits.max_payload_size,
                    path = %request.path,
                    "Payload too large"
                );
                request.keep_alive = false;
                return Ok(Some((request, Some(Response::payload_too_large()))));
            }

            let body_end = body_start + content_length;
            self.read_body(body_end).await?;
            let available = body_end.min(self.buffer.len());
            request.body = self.buffer[body_start..available].to_vec();
        }

        if request.method == Method::POST {
            parser::parse_body(&mut request, head.content_type.as_deref());
        }

        Ok(Some((request, None)))
    }

    /// Keeps reading chunks until the buffer holds `target_len` bytes or the
    /// peer stops sending.
    async fn read_body(&mut self, target_len: usize) -> anyhow::Result<()> {
        let chunk_size = self.limits.chunk_size.max(1);

        while self.buffer.len() < target_len {
            let want = (target_len - self.buffer.len()).min(chunk_size);
            self.buffer.reserve(want);

            let mut limited = (&mut self.stream).take(want as u64);
            match timeout(self.limits.read_timeout, limited.read_buf(&mut self.buffer)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(_)) => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => {
                    debug!(received = self.buffer.len(), expected = target_len, "Timed out reading body");
                    break;
                }
            }
        }

        Ok(())
    }
}
