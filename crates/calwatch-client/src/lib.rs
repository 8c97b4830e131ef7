//! calwatch command-line client.
//!
//! Loads [`config::WatchFaceConfig`], applies [`Cli`] overrides and drives a
//! [`calwatch_face::WatchFaceEngine`] to render frames, list events or run
//! the tick loop.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::WatchFaceConfig;
pub use error::{ClientError, ClientResult};
