use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::server::Lifecycle;
use crate::server::queue::TaskQueue;

/// Binds the listening socket with `SO_REUSEADDR` and the configured backlog.
pub fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr: SocketAddr = cfg
        .listen_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", cfg.listen_addr()))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("bind failed on {}", addr))?;

    let listener = socket
        .listen(cfg.backlog)
        .with_context(|| format!("listen failed on {}", addr))?;
    Ok(listener)
}

/// Accepts connections into `queue` until the server leaves `Running`.
///
/// The listener is dropped (closed) on return.
pub async fn run(listener: TcpListener, queue: &TaskQueue<TcpStream>, lifecycle: &mut watch::Receiver<Lifecycle>) {
    loop {
        if *lifecycle.borrow() != Lifecycle::Running {
            break;
        }

        tokio::select! {
            biased;

            changed = lifecycle.changed() => {
                if changed.is_err() {
                    break;
                }
            }

            res = listener.accept() => match res {
                Ok((socket, peer)) => {
                    debug!(%peer, "Accepted connection");
                    if queue.push(socket).is_err() {
                        debug!(%peer, "Server stopping, dropping connection");
                    }
                }
                Err(e) => {
                    if *lifecycle.borrow() != Lifecycle::Running {
                        break;
                    }
                    warn!(error = %e, "Accept failed");
                }
            }
        }
    }

    drop(listener);
    info!("Acceptor stopped");
}
