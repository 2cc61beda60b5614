//! Toasts for the CLI: one coloured line per notice.

use std::io::{self, Stderr, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::{domain::notice::ToastKind, usecases::contracts::ToastSink};

pub struct TerminalToasts<W: Write> {
    out: W,
    colored: bool,
}

impl TerminalToasts<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr(), true)
    }
}

impl<W: Write> TerminalToasts<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, message: &str, kind: ToastKind) -> io::Result<()> {
        let line = format!("[{}] {message}\n", kind.as_label());

        if self.colored {
            queue!(
                self.out,
                SetForegroundColor(color(kind)),
                Print(line),
                ResetColor
            )?;
        } else {
            self.out.write_all(line.as_bytes())?;
        }

        self.out.flush()
    }
}

fn color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => Color::Blue,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    }
}

impl<W: Write> ToastSink for TerminalToasts<W> {
    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        if let Err(error) = self.write_line(message, kind) {
            tracing::warn!(error = %error, "terminal toast could not be written");
        }
    }
}
