use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

use base64::Engine;

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through the OSC 52 terminal escape sequence.
///
/// Works in most modern terminals (kitty, WezTerm, iTerm2, tmux with
/// `set-clipboard on`) and over SSH.
pub struct Osc52Clipboard<W: Write> {
    out: Mutex<W>,
    attached: bool,
}

impl Osc52Clipboard<io::Stderr> {
    /// Writes to stderr, keeping stdout free for exported text. Copying is
    /// unavailable when stderr is not a terminal.
    pub fn stderr() -> Self {
        let out = io::stderr();
        let attached = out.is_terminal();
        Self::new(out, attached)
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// `attached` says whether `out` reaches a terminal that can act on the
    /// escape sequence.
    pub fn new(out: W, attached: bool) -> Self {
        Self {
            out: Mutex::new(out),
            attached,
        }
    }

    pub fn into_inner(self) -> Result<W, ClipboardError> {
        self.out
            .into_inner()
            .map_err(|_| ClipboardError::Unavailable("writer lock poisoned".to_string()))
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.attached {
            return Err(ClipboardError::Unavailable("not a terminal".to_string()));
        }
        let mut out = self
            .out
            .lock()
            .map_err(|_| ClipboardError::Unavailable("writer lock poisoned".to_string()))?;
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
