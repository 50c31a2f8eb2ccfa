//! Background worker that performs network calls off the UI thread.

pub mod commands;
pub mod runtime;
