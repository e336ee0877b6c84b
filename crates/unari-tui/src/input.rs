//! Byte-stream input decoding.
//!
//! SSH delivers the client's keystrokes as raw terminal bytes. The
//! [`InputDecoder`] turns them into [`TerminalInput`] values: control keys,
//! cursor keys in CSI and SS3 form, UTF-8 text, and SGR or X10 mouse reports.
//! A sequence split across two reads is held until the rest arrives.

use unari_app::{KeyInput, MouseButton, MouseInput, MouseKind, TerminalInput};

const ESC: u8 = 0x1b;

/// Longest unterminated sequence held before it is discarded as garbage.
const MAX_PENDING: usize = 64;

/// Outcome of decoding from the front of the buffer.
enum Step {
    /// `usize` bytes consumed, producing an input if it was recognised.
    Emit(Option<TerminalInput>, usize),
    /// The buffer ends inside a sequence.
    Incomplete,
}

/// Incremental decoder for terminal input bytes.
#[derive(Debug, Default)]
pub struct InputDecoder {
    pending: Vec<u8>,
}

impl InputDecoder {
    /// Create a decoder with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk of bytes, returning every complete input in order.
    ///
    /// A chunk that ends in a bare `ESC` yields [`KeyInput::Esc`]: clients
    /// send escape sequences in a single write, so a lone trailing escape is
    /// the Escape key itself.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<TerminalInput> {
        self.pending.extend_from_slice(bytes);

        let mut inputs = Vec::new();
        let mut pos = 0;

        while pos < self.pending.len() {
            match decode(&self.pending[pos..]) {
                Step::Emit(input, used) => {
                    inputs.extend(input);
                    pos += used;
                },
                Step::Incomplete => break,
            }
        }

        self.pending.drain(..pos);

        if self.pending == [ESC] {
            self.pending.clear();
            inputs.push(TerminalInput::Key(KeyInput::Esc));
        } else if self.pending.len() > MAX_PENDING {
            tracing::debug!(len = self.pending.len(), "discarding unterminated input sequence");
            self.pending.clear();
        }

        inputs
    }

    /// `true` if part of a sequence is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

fn key(key: KeyInput) -> Option<TerminalInput> {
    Some(TerminalInput::Key(key))
}

fn decode(buf: &[u8]) -> Step {
    match buf[0] {
        ESC => decode_escape(buf),
        b'\r' | b'\n' => Step::Emit(key(KeyInput::Enter), 1),
        b'\t' => Step::Emit(key(KeyInput::Tab), 1),
        0x7f | 0x08 => Step::Emit(key(KeyInput::Backspace), 1),
        c @ 0x01..=0x1a => Step::Emit(key(KeyInput::Ctrl(char::from(c - 1 + b'a'))), 1),
        0x00 | 0x1c..=0x1f => Step::Emit(None, 1),
        _ => decode_utf8(buf),
    }
}

fn decode_utf8(buf: &[u8]) -> Step {
    let width = match buf[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Step::Emit(None, 1),
    };

    let Some(bytes) = buf.get(..width) else {
        return Step::Incomplete;
    };

    match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
        Some(c) => Step::Emit(key(KeyInput::Char(c)), width),
        None => Step::Emit(None, 1),
    }
}

fn decode_escape(buf: &[u8]) -> Step {
    match buf.get(1) {
        None => Step::Incomplete,
        Some(b'[') => decode_csi(buf),
        Some(b'O') => match buf.get(2) {
            None => Step::Incomplete,
            Some(&final_byte) => Step::Emit(cursor_key(final_byte).and_then(key), 3),
        },
        // Alt-modified keys and doubled escapes: report the escape alone
        // and decode what follows on the next step.
        Some(_) => Step::Emit(key(KeyInput::Esc), 1),
    }
}

fn cursor_key(final_byte: u8) -> Option<KeyInput> {
    match final_byte {
        b'A' => Some(KeyInput::Up),
        b'B' => Some(KeyInput::Down),
        b'C' => Some(KeyInput::Right),
        b'D' => Some(KeyInput::Left),
        b'H' => Some(KeyInput::Home),
        b'F' => Some(KeyInput::End),
        _ => None,
    }
}

fn decode_csi(buf: &[u8]) -> Step {
    if buf.get(2) == Some(&b'M') {
        return decode_x10_mouse(buf);
    }

    let Some(offset) = buf[2..].iter().position(|b| (0x40..=0x7e).contains(b)) else {
        return Step::Incomplete;
    };
    let end = 2 + offset;
    let params = &buf[2..end];
    let final_byte = buf[end];
    let used = end + 1;

    if let Some(sgr) = params.strip_prefix(b"<") {
        return Step::Emit(decode_sgr_mouse(sgr, final_byte).map(TerminalInput::Mouse), used);
    }

    let input = match final_byte {
        b'~' => match params {
            b"1" | b"7" => Some(KeyInput::Home),
            b"4" | b"8" => Some(KeyInput::End),
            b"3" => Some(KeyInput::Delete),
            _ => None,
        },
        other => cursor_key(other),
    };

    Step::Emit(input.and_then(key), used)
}

/// `ESC [ < b ; x ; y (M|m)`, coordinates 1-based.
fn decode_sgr_mouse(params: &[u8], final_byte: u8) -> Option<MouseInput> {
    let release = match final_byte {
        b'M' => false,
        b'm' => true,
        _ => return None,
    };

    let text = std::str::from_utf8(params).ok()?;
    let mut fields = text.split(';').map(str::parse::<u16>);
    let code = fields.next()?.ok()?;
    let x = fields.next()?.ok()?;
    let y = fields.next()?.ok()?;

    let mut input = mouse(code, x.saturating_sub(1), y.saturating_sub(1), release);
    // Some emitters report every release as button 3; treat it as primary.
    if release && input.button == MouseButton::None {
        input.button = MouseButton::Left;
    }
    Some(input)
}

/// `ESC [ M b x y`, each value offset by 32 and coordinates 1-based.
fn decode_x10_mouse(buf: &[u8]) -> Step {
    let Some(&[code, x, y]) = buf.get(3..6) else {
        return Step::Incomplete;
    };

    let code = u16::from(code.saturating_sub(32));
    let x = u16::from(x.saturating_sub(33));
    let y = u16::from(y.saturating_sub(33));
    // X10 reports every release as button 3 without naming the button.
    let release = code & 0b11 == 3 && code & 64 == 0;

    let mut input = mouse(code, x, y, release);
    if release {
        input.button = MouseButton::None;
    }
    Step::Emit(Some(TerminalInput::Mouse(input)), 6)
}

fn mouse(code: u16, x: u16, y: u16, release: bool) -> MouseInput {
    let button = if code & 64 != 0 {
        if code & 1 == 0 { MouseButton::WheelUp } else { MouseButton::WheelDown }
    } else {
        match code & 0b11 {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            _ => MouseButton::None,
        }
    };

    let kind = if release {
        MouseKind::Release
    } else if code & 32 != 0 {
        MouseKind::Drag
    } else {
        MouseKind::Press
    };

    MouseInput { x, y, button, kind }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(bytes: &[u8]) -> Vec<TerminalInput> {
        InputDecoder::new().feed(bytes)
    }

    #[test]
    fn plain_characters() {
        assert_eq!(keys(b"qj"), vec![
            TerminalInput::Key(KeyInput::Char('q')),
            TerminalInput::Key(KeyInput::Char('j')),
        ]);
    }

    #[test]
    fn control_characters() {
        assert_eq!(keys(&[0x03]), vec![TerminalInput::Key(KeyInput::Ctrl('c'))]);
        assert_eq!(keys(b"\r"), vec![TerminalInput::Key(KeyInput::Enter)]);
        assert_eq!(keys(&[0x7f]), vec![TerminalInput::Key(KeyInput::Backspace)]);
        assert_eq!(keys(b"\t"), vec![TerminalInput::Key(KeyInput::Tab)]);
    }

    #[test]
    fn cursor_keys_in_both_forms() {
        assert_eq!(keys(b"\x1b[A\x1b[B\x1b[C\x1b[D"), vec![
            TerminalInput::Key(KeyInput::Up),
            TerminalInput::Key(KeyInput::Down),
            TerminalInput::Key(KeyInput::Right),
            TerminalInput::Key(KeyInput::Left),
        ]);
        assert_eq!(keys(b"\x1bOA\x1bOD"), vec![
            TerminalInput::Key(KeyInput::Up),
            TerminalInput::Key(KeyInput::Left),
        ]);
    }

    #[test]
    fn tilde_sequences() {
        assert_eq!(keys(b"\x1b[3~"), vec![TerminalInput::Key(KeyInput::Delete)]);
        assert_eq!(keys(b"\x1b[1~\x1b[4~"), vec![
            TerminalInput::Key(KeyInput::Home),
            TerminalInput::Key(KeyInput::End),
        ]);
        assert!(keys(b"\x1b[15~").is_empty());
    }

    #[test]
    fn utf8_text() {
        assert_eq!(keys("ä".as_bytes()), vec![TerminalInput::Key(KeyInput::Char('ä'))]);
    }

    #[test]
    fn lone_escape_is_esc_key() {
        assert_eq!(keys(&[ESC]), vec![TerminalInput::Key(KeyInput::Esc)]);
    }

    #[test]
    fn split_sequence_waits_for_rest() {
        let mut decoder = InputDecoder::new();
        assert!(decoder.feed(b"\x1b[").is_empty());
        assert!(decoder.has_pending());
        assert_eq!(decoder.feed(b"A"), vec![TerminalInput::Key(KeyInput::Up)]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn split_utf8_waits_for_rest() {
        let mut decoder = InputDecoder::new();
        let bytes = "ö".as_bytes();
        assert!(decoder.feed(&bytes[..1]).is_empty());
        assert_eq!(decoder.feed(&bytes[1..]), vec![TerminalInput::Key(KeyInput::Char('ö'))]);
    }

    #[test]
    fn sgr_left_click_release() {
        assert_eq!(keys(b"\x1b[<0;5;7M\x1b[<0;5;7m"), vec![
            TerminalInput::Mouse(MouseInput {
                x: 4,
                y: 6,
                button: MouseButton::Left,
                kind: MouseKind::Press,
            }),
            TerminalInput::Mouse(MouseInput::left_release(4, 6)),
        ]);
    }

    #[test]
    fn sgr_wheel_and_drag() {
        let decoded = keys(b"\x1b[<64;1;1M\x1b[<32;2;2M");
        assert_eq!(decoded, vec![
            TerminalInput::Mouse(MouseInput {
                x: 0,
                y: 0,
                button: MouseButton::WheelUp,
                kind: MouseKind::Press,
            }),
            TerminalInput::Mouse(MouseInput {
                x: 1,
                y: 1,
                button: MouseButton::Left,
                kind: MouseKind::Drag,
            }),
        ]);
    }

    #[test]
    fn sgr_anonymous_release_is_primary() {
        assert_eq!(keys(b"\x1b[<3;10;4m"), vec![TerminalInput::Mouse(MouseInput::left_release(9, 3))]);
    }

    #[test]
    fn x10_release_has_no_button() {
        let decoded = keys(&[ESC, b'[', b'M', 32 + 3, 33 + 4, 33 + 2]);
        assert_eq!(decoded, vec![TerminalInput::Mouse(MouseInput {
            x: 4,
            y: 2,
            button: MouseButton::None,
            kind: MouseKind::Release,
        })]);
    }

    #[test]
    fn garbage_sequence_is_dropped() {
        let mut decoder = InputDecoder::new();
        let mut junk = b"\x1b[".to_vec();
        junk.extend(std::iter::repeat_n(b'1', MAX_PENDING));
        assert!(decoder.feed(&junk).is_empty());
        assert!(!decoder.has_pending());
        assert_eq!(decoder.feed(b"q"), vec![TerminalInput::Key(KeyInput::Char('q'))]);
    }
}
