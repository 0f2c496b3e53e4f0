//! Human-readable diagnostic output with optional ANSI colors.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colors when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics, quoting the offending source line when the script
/// text is available.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<&'src str>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Quote lines from `source` under each label.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    fn source_line(&self, line: u32) -> Option<&'src str> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.source?.lines().nth(index)
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let severity = diagnostic.severity.to_string();
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity, color)?;
        self.write_colored(&format!("[{}]", diagnostic.code), colors::BOLD)?;
        writeln!(self.writer, ": {}", diagnostic.message)?;

        for label in &diagnostic.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(self.writer, "  {marker} {}: ", label.span)?;
            let color = if label.is_primary {
                colors::ERROR
            } else {
                colors::SECONDARY
            };
            self.write_colored(&label.message, color)?;
            writeln!(self.writer)?;

            if let Some(text) = self.source_line(label.span.line) {
                writeln!(self.writer, "   | {}", text.trim_end())?;
            }
        }

        for note in &diagnostic.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}
