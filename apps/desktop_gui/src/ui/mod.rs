//! UI layer for desktop GUI: app shell and theme palettes.

pub mod app;
pub mod theme;

pub use app::{ResumeEvalApp, StartupConfig};
