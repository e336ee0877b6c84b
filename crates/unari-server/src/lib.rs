//! Unari production server.
//!
//! Serves the menu terminal over SSH. Each connection runs the generic
//! [`unari_app::Runtime`] with a [`unari_tui::TerminalDriver`] whose byte
//! stream is the SSH channel.
//!
//! # Components
//!
//! - [`Server`]: TCP accept loop, SSH handshake, graceful shutdown
//! - [`ConnectionHandler`]: per-connection SSH handler bridging to a session
//! - [`UnicafeClient`]: HTTP [`unari_core::MenuSource`]
//! - [`SystemEnv`]: production environment (system clock)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod error;
pub mod fetch;
mod ssh;
mod system_env;

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

pub use config::{Args, ServerConfig};
pub use error::ServerError;
pub use fetch::{DEFAULT_MENU_URL, UnicafeClient};
use russh::server::Config as SshConfig;
pub use ssh::{ConnectionHandler, NO_PTY_MESSAGE, SessionContext};
pub use system_env::SystemEnv;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use unari_core::MenuSource;

/// Delay before answering a rejected authentication attempt.
const AUTH_REJECTION_DELAY: Duration = Duration::from_millis(500);

/// Production Unari server.
pub struct Server<S> {
    listener: TcpListener,
    ssh: Arc<SshConfig>,
    context: Arc<SessionContext<S>>,
    shutdown_grace: Duration,
}

impl Server<UnicafeClient> {
    /// Load the host key, bind the listener and build the Unicafe client.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let source = UnicafeClient::new(config.menu_url.clone(), config.fetch_timeout)?;
        Self::with_source(config, source).await
    }
}

impl<S: MenuSource> Server<S> {
    /// Bind a server that fetches menus from `source`.
    pub async fn with_source(config: ServerConfig, source: S) -> Result<Self, ServerError> {
        let key = russh_keys::load_secret_key(&config.host_key, None).map_err(|e| {
            ServerError::HostKey { path: config.host_key.clone(), reason: e.to_string() }
        })?;

        let ssh = SshConfig {
            keys: vec![key],
            inactivity_timeout: Some(config.idle_timeout),
            auth_rejection_time: AUTH_REJECTION_DELAY,
            auth_rejection_time_initial: Some(Duration::ZERO),
            ..Default::default()
        };

        let listener = TcpListener::bind(&config.listen_addr)
            .await
            .map_err(|source| ServerError::Bind { addr: config.listen_addr.clone(), source })?;

        let context = SessionContext {
            campuses: config.campuses,
            source: Arc::new(source),
            env: SystemEnv::new(config.timezone),
            shutdown: CancellationToken::new(),
            tracker: TaskTracker::new(),
        };

        Ok(Self {
            listener,
            ssh: Arc::new(ssh),
            context: Arc::new(context),
            shutdown_grace: config.shutdown_grace,
        })
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` resolves, then give in-flight
    /// sessions up to the grace period to restore their terminals.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> Result<(), ServerError> {
        tracing::info!("Server listening on {}", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => self.spawn_connection(stream, peer),
                    Err(e) => tracing::warn!(error = %e, "accept failed"),
                },
            }
        }

        drop(self.listener);
        let tracker = &self.context.tracker;
        tracing::info!(tasks = tracker.len(), "shutting down");

        self.context.shutdown.cancel();
        tracker.close();
        if tokio::time::timeout(self.shutdown_grace, tracker.wait()).await.is_err() {
            tracing::warn!(tasks = tracker.len(), "grace period elapsed, dropping remaining sessions");
        }

        Ok(())
    }

    fn spawn_connection(&self, stream: TcpStream, peer: SocketAddr) {
        tracing::debug!(%peer, "connection accepted");

        let handler = ConnectionHandler::new(Arc::clone(&self.context), peer);
        let config = Arc::clone(&self.ssh);

        self.context.tracker.spawn(async move {
            if let Err(e) = serve_connection(config, stream, handler).await {
                tracing::debug!(%peer, error = %e, "connection ended with error");
            } else {
                tracing::debug!(%peer, "connection closed");
            }
        });
    }
}

async fn serve_connection<S: MenuSource>(
    config: Arc<SshConfig>,
    stream: TcpStream,
    handler: ConnectionHandler<S>,
) -> Result<(), ServerError> {
    let session = russh::server::run_stream(config, stream, handler).await?;
    session.await?;
    Ok(())
}

/// Resolves on SIGINT or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
