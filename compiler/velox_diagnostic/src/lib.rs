//! Diagnostics for Velox.
//!
//! Both failure classes of the engine (parse-time and run-time) convert
//! into a [`Diagnostic`] carrying a searchable [`ErrorCode`], a message, a
//! labelled source line and optional notes. Hosts render them with the
//! [`TerminalEmitter`].

mod diagnostic;
mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, TerminalEmitter};
pub use error_code::ErrorCode;
