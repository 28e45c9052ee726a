// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod config;
mod environment;
mod error;
mod setup;
mod upsert;
mod workspace;

// Re-export main types
pub use config::{CommandLine, Config};
pub use environment::{Environment, Shell};
pub use error::SetupError;
pub use setup::{CloneOutcome, LinkOutcome, Setup};
pub use upsert::{file_contains_line, upsert_line, UpsertOutcome};
pub use workspace::{Workspace, WorkspacePath};
