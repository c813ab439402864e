//! ytgate download orchestrator.
//!
//! Invokes `yt-dlp` as a subprocess for metadata, direct URLs and
//! server-side downloads, relaying its output or failure unmodified.

pub mod command;
pub mod runner;

pub use command::ToolAction;
pub use runner::YtDlp;
