//! HTTP server and graceful shutdown.
//!
//! On the shutdown signal the server:
//! 1. Immediately stops `listener.accept()` and closes the listener.
//! 2. Asks every open connection to shut down gracefully: requests already
//!    in flight complete, keep-alive connections are not reused.
//! 3. Waits for every connection task, then returns from
//!    [`Server::serve`].

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::dispatch::dispatch;
use crate::error::{Error, Result};
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Server {
    /// Binds the listening socket. Port `0` picks a free port; see
    /// [`local_addr`](Server::local_addr).
    ///
    /// ```rust,no_run
    /// # async fn run() -> otc::Result<()> {
    /// let server = otc::Server::bind("0.0.0.0:8282".parse().unwrap()).await?;
    /// # Ok(()) }
    /// ```
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, router: Router) -> Result<()> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let Self { listener, addr } = self;
        let router = Arc::new(router);

        info!(%addr, "otc listening");

        // Flipped once on shutdown; every connection task watches it.
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting even if
                // more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutting down, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };
                    tasks.spawn(serve_connection(stream, peer, Arc::clone(&router), stop_rx.clone()));
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        drop(listener);
        // Err only if every receiver is gone, i.e. nothing left to stop.
        let _ = stop_tx.send(true);
        while tasks.join_next().await.is_some() {}

        info!("otc stopped");
        Ok(())
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Arc<Router>,
    mut stop: watch::Receiver<bool>,
) {
    debug!(%peer, "connection accepted");

    // Called once per request on the connection, not once per connection.
    let svc = service_fn(move |req| dispatch(Arc::clone(&router), req));

    // `auto::Builder` handles both HTTP/1.1 and HTTP/2, whichever the client
    // negotiates.
    let builder = ConnBuilder::new(TokioExecutor::new());
    let conn = builder.serve_connection(TokioIo::new(stream), svc);
    tokio::pin!(conn);

    let result = tokio::select! {
        res = conn.as_mut() => res,
        _ = stop.changed() => {
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    };

    if let Err(e) = result {
        error!(%peer, "connection error: {e}");
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => info!(signal = "SIGINT", "signal received"),
        () = sigterm => info!(signal = "SIGTERM", "signal received"),
    }
}
