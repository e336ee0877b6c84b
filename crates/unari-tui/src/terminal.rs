//! Terminal driver over a byte-stream session.
//!
//! Implements the [`Driver`] trait for a remote terminal: input arrives as
//! raw bytes and resize notices on a channel, rendered frames leave as byte
//! chunks on another. The transport that owns the connection (SSH in
//! production, plain channels in tests) only moves bytes.

use std::{
    collections::VecDeque,
    io::{self, Write},
};

use crossterm::{
    cursor::{Hide, Show},
    queue,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend, layout::Rect};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use unari_app::{App, Driver, RegionMap, TerminalInput};

use crate::{ColorSupport, InputDecoder, Theme, ui};

/// Button-event mouse tracking with SGR coordinates.
const MOUSE_ON: &[u8] = b"\x1b[?1002h\x1b[?1006h";
const MOUSE_OFF: &[u8] = b"\x1b[?1006l\x1b[?1002l";

/// Largest width or height a session frame is drawn at.
///
/// Clients pick their own window size; the frame buffer is allocated per
/// cell, so anything beyond this is drawn at this size.
pub const MAX_DIMENSION: u16 = 512;

/// Clamp a client-reported width or height to [`MAX_DIMENSION`].
pub fn clamp_dimension(value: u32) -> u16 {
    u16::try_from(value.min(u32::from(MAX_DIMENSION))).unwrap_or(MAX_DIMENSION)
}

fn clamp_size((cols, rows): (u16, u16)) -> (u16, u16) {
    (cols.min(MAX_DIMENSION), rows.min(MAX_DIMENSION))
}

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TerminalError {
    /// `true` if the peer is gone and nothing more can be written.
    pub fn is_disconnect(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                io::ErrorKind::BrokenPipe | io::ErrorKind::ConnectionReset | io::ErrorKind::UnexpectedEof
            ),
        }
    }
}

/// Input delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    /// Bytes typed by the client.
    Data(Vec<u8>),
    /// Client window changed size.
    Resize {
        /// Columns.
        cols: u16,
        /// Rows.
        rows: u16,
    },
}

/// Channels and metadata connecting a driver to its transport.
#[derive(Debug)]
pub struct SessionIo {
    /// Client input. Closing the sender ends the session.
    pub input: mpsc::Receiver<SessionInput>,
    /// Rendered output, one chunk per flush.
    pub output: mpsc::UnboundedSender<Vec<u8>>,
    /// Initial terminal size (columns, rows).
    pub size: (u16, u16),
    /// Client colour capability.
    pub colors: ColorSupport,
    /// Server-wide shutdown signal.
    pub shutdown: CancellationToken,
}

/// [`Write`] sink that batches bytes and hands each flushed frame to the
/// transport.
#[derive(Debug)]
pub struct FrameWriter {
    buffer: Vec<u8>,
    output: mpsc::UnboundedSender<Vec<u8>>,
}

impl FrameWriter {
    /// Create a writer that sends to `output`.
    pub fn new(output: mpsc::UnboundedSender<Vec<u8>>) -> Self {
        Self { buffer: Vec::new(), output }
    }
}

impl Write for FrameWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let frame = std::mem::take(&mut self.buffer);
        self.output
            .send(frame)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "session output closed"))
    }
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns the ratatui terminal for one session, decodes client bytes into
/// [`TerminalInput`] and sets up and restores the client's screen.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<FrameWriter>>,
    input: mpsc::Receiver<SessionInput>,
    decoder: InputDecoder,
    pending: VecDeque<TerminalInput>,
    theme: Theme,
    shutdown: CancellationToken,
    size: (u16, u16),
    active: bool,
}

impl TerminalDriver {
    /// Create a driver for the given session channels.
    pub fn new(io: SessionIo) -> Result<Self, TerminalError> {
        let size = clamp_size(io.size);
        let backend = CrosstermBackend::new(FrameWriter::new(io.output));
        let terminal = Terminal::with_options(backend, TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, size.0, size.1)),
        })?;

        Ok(Self {
            terminal,
            input: io.input,
            decoder: InputDecoder::new(),
            pending: VecDeque::new(),
            theme: Theme::for_colors(io.colors),
            shutdown: io.shutdown,
            size,
            active: false,
        })
    }

    /// Theme used for every frame of this session.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    fn restore(&mut self) -> io::Result<()> {
        let backend = self.terminal.backend_mut();
        backend.write_all(MOUSE_OFF)?;
        queue!(backend, Show, LeaveAlternateScreen)?;
        Write::flush(backend)
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn start(&mut self) -> Result<(), Self::Error> {
        let backend = self.terminal.backend_mut();
        queue!(backend, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        backend.write_all(MOUSE_ON)?;
        Write::flush(backend)?;
        self.active = true;
        Ok(())
    }

    async fn poll_event(&mut self) -> Result<Option<TerminalInput>, Self::Error> {
        loop {
            if let Some(input) = self.pending.pop_front() {
                return Ok(Some(input));
            }

            let received = tokio::select! {
                biased;
                () = self.shutdown.cancelled() => None,
                received = self.input.recv() => received,
            };

            match received {
                None => return Ok(None),
                Some(SessionInput::Data(bytes)) => self.pending.extend(self.decoder.feed(&bytes)),
                Some(SessionInput::Resize { cols, rows }) => {
                    let (cols, rows) = clamp_size((cols, rows));
                    self.pending.push_back(TerminalInput::Resize(cols, rows));
                },
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<RegionMap, Self::Error> {
        let size = clamp_size(app.terminal_size());
        if size != self.size {
            self.terminal.resize(Rect::new(0, 0, size.0, size.1))?;
            self.size = size;
        }

        let mut regions = RegionMap::new();
        self.terminal.draw(|frame| regions = ui::render(frame, app, &self.theme))?;
        Ok(regions)
    }

    fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        if let Err(e) = self.restore() {
            tracing::debug!(error = %e, "terminal restore not delivered");
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
