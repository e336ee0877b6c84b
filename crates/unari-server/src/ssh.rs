//! SSH connection handler.
//!
//! Each TCP connection gets one [`ConnectionHandler`]. It accepts a single
//! interactive session channel, collects the PTY request and environment,
//! then starts a [`Runtime`] over a [`TerminalDriver`] when the client asks
//! for a shell. Channel data and window changes are forwarded to the driver;
//! rendered frames come back through a writer task.

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use russh::{
    Channel, ChannelId, CryptoVec, Pty,
    server::{Auth, Handle, Handler, Msg, Session},
};
use tokio::sync::mpsc;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::Instrument;
use unari_app::Runtime;
use unari_core::{CampusDirectory, MenuSource};
use unari_tui::{ColorSupport, SessionInput, SessionIo, TerminalDriver, clamp_dimension};

use crate::SystemEnv;

/// Message written to clients that connect without a terminal.
pub const NO_PTY_MESSAGE: &str = "active terminal required\r\n";

/// Input chunks buffered between the SSH handler and the session loop.
const INPUT_QUEUE: usize = 64;

/// State shared by every connection of one server.
pub struct SessionContext<S> {
    /// Campus directory.
    pub campuses: Arc<CampusDirectory>,
    /// Menu source each session fetches from.
    pub source: Arc<S>,
    /// Clock and reference timezone.
    pub env: SystemEnv,
    /// Cancelled when the server shuts down.
    pub shutdown: CancellationToken,
    /// Tracks connection and session tasks for graceful shutdown.
    pub tracker: TaskTracker,
}

/// Terminal parameters from the client's PTY request.
#[derive(Debug, Clone)]
struct PtyRequest {
    term: String,
    size: (u16, u16),
}

/// Per-connection SSH handler.
pub struct ConnectionHandler<S> {
    context: Arc<SessionContext<S>>,
    peer: SocketAddr,
    channel: Option<ChannelId>,
    pty: Option<PtyRequest>,
    colorterm: Option<String>,
    input: Option<mpsc::Sender<SessionInput>>,
}

impl<S: MenuSource> ConnectionHandler<S> {
    /// Create a handler for a connection from `peer`.
    pub fn new(context: Arc<SessionContext<S>>, peer: SocketAddr) -> Self {
        Self { context, peer, channel: None, pty: None, colorterm: None, input: None }
    }

    fn refuse_without_pty(&self, channel: ChannelId, session: &mut Session) {
        tracing::info!(peer = %self.peer, "refusing session without a terminal");
        session.data(channel, CryptoVec::from_slice(NO_PTY_MESSAGE.as_bytes()));
        session.exit_status_request(channel, 1);
        session.eof(channel);
        session.close(channel);
    }

    fn start_session(&mut self, channel: ChannelId, pty: PtyRequest, session: &mut Session) {
        let colors = ColorSupport::detect(&pty.term, self.colorterm.as_deref());
        let (input_tx, input_rx) = mpsc::channel(INPUT_QUEUE);
        let (output_tx, output_rx) = mpsc::unbounded_channel();

        let io = SessionIo {
            input: input_rx,
            output: output_tx,
            size: pty.size,
            colors,
            shutdown: self.context.shutdown.child_token(),
        };

        let driver = match TerminalDriver::new(io) {
            Ok(driver) => driver,
            Err(e) => {
                tracing::warn!(peer = %self.peer, error = %e, "failed to create terminal");
                session.close(channel);
                return;
            },
        };

        let runtime = Runtime::new(
            driver,
            self.context.env,
            Arc::clone(&self.context.source),
            Arc::clone(&self.context.campuses),
            pty.size,
        );

        let span = tracing::info_span!("session", peer = %self.peer);
        self.context
            .tracker
            .spawn(forward_output(session.handle(), channel, output_rx).instrument(span.clone()));
        self.context.tracker.spawn(
            async move {
                tracing::info!(term = %pty.term, ?colors, cols = pty.size.0, rows = pty.size.1, "session opened");
                match runtime.run().await {
                    Ok(()) => tracing::info!("session closed"),
                    Err(e) if e.is_disconnect() => tracing::debug!("session closed by peer"),
                    Err(e) => tracing::warn!(error = %e, "session ended with error"),
                }
            }
            .instrument(span),
        );

        self.input = Some(input_tx);
    }

    async fn forward(&mut self, input: SessionInput) {
        let Some(sender) = &self.input else {
            return;
        };
        if sender.send(input).await.is_err() {
            tracing::debug!(peer = %self.peer, "input after session ended");
            self.input = None;
        }
    }
}

/// Copy rendered frames to the channel, then close it once the session
/// drops its output.
async fn forward_output(handle: Handle, channel: ChannelId, mut output: mpsc::UnboundedReceiver<Vec<u8>>) {
    while let Some(frame) = output.recv().await {
        if handle.data(channel, CryptoVec::from_slice(&frame)).await.is_err() {
            tracing::debug!("channel closed before frame was written");
            return;
        }
    }

    let _ = handle.eof(channel).await;
    let _ = handle.close(channel).await;
}

#[async_trait]
impl<S: MenuSource> Handler for ConnectionHandler<S> {
    type Error = russh::Error;

    async fn auth_none(&mut self, user: &str) -> Result<Auth, Self::Error> {
        tracing::debug!(peer = %self.peer, user, "accepting connection");
        Ok(Auth::Accept)
    }

    async fn auth_password(&mut self, user: &str, _password: &str) -> Result<Auth, Self::Error> {
        tracing::debug!(peer = %self.peer, user, "accepting password login");
        Ok(Auth::Accept)
    }

    async fn auth_publickey(
        &mut self,
        user: &str,
        _public_key: &russh_keys::key::PublicKey,
    ) -> Result<Auth, Self::Error> {
        tracing::debug!(peer = %self.peer, user, "accepting public key login");
        Ok(Auth::Accept)
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        if self.channel.is_some() {
            tracing::debug!(peer = %self.peer, "rejecting second session channel");
            return Ok(false);
        }
        self.channel = Some(channel.id());
        Ok(true)
    }

    #[allow(clippy::too_many_arguments)]
    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(Pty, u32)],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.pty = Some(PtyRequest {
            term: term.to_string(),
            size: (clamp_dimension(col_width), clamp_dimension(row_height)),
        });
        session.channel_success(channel);
        Ok(())
    }

    async fn env_request(
        &mut self,
        _channel: ChannelId,
        variable_name: &str,
        variable_value: &str,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if variable_name == "COLORTERM" {
            self.colorterm = Some(variable_value.to_string());
        }
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel != Some(channel) || self.input.is_some() {
            session.channel_failure(channel);
            return Ok(());
        }

        session.channel_success(channel);
        match self.pty.clone() {
            Some(pty) => self.start_session(channel, pty, session),
            None => self.refuse_without_pty(channel, session),
        }
        Ok(())
    }

    async fn exec_request(
        &mut self,
        channel: ChannelId,
        _data: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.shell_request(channel, session).await
    }

    async fn data(
        &mut self,
        channel: ChannelId,
        data: &[u8],
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel == Some(channel) {
            self.forward(SessionInput::Data(data.to_vec())).await;
        }
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel == Some(channel) {
            let (cols, rows) = (clamp_dimension(col_width), clamp_dimension(row_height));
            self.forward(SessionInput::Resize { cols, rows }).await;
        }
        Ok(())
    }

    async fn channel_eof(
        &mut self,
        channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel == Some(channel) {
            self.input = None;
        }
        Ok(())
    }

    async fn channel_close(
        &mut self,
        channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        if self.channel == Some(channel) {
            self.input = None;
        }
        Ok(())
    }
}
