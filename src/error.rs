//! Error types
//!
//! Two layers:
//! - `LayoutError` for problems with the layout description
//! - `AppError` for everything an event handler or startup can raise
//!
//! Event handler errors never escape the window: the controller turns
//! them into a message dialog (see `Controller::dispatch`).

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or binding the layout description
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse layout description")]
    Parse(#[from] serde_json::Error),

    #[error("Layout has no widget named `{0}`")]
    MissingWidget(String),

    #[error("Widget `{name}` is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Widget `{0}` is declared more than once")]
    DuplicateWidget(String),

    #[error("Dropdown `{0}` has no items")]
    EmptyDropdown(String),
}

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Layout could not be loaded")]
    Layout(#[from] LayoutError),

    #[error("No function named `{0}`")]
    UnknownFunction(String),

    #[error("Dropdown index {index} is out of range ({len} items)")]
    DropdownIndex { index: usize, len: usize },

    #[error("Offset must be a finite number, got {0}")]
    InvalidOffset(f64),

    #[error("Event loop failed")]
    EventLoop(#[from] eframe::Error),
}

impl AppError {
    /// Category name shown as the error dialog's title
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Layout(_) => "LayoutError",
            AppError::UnknownFunction(_) => "UnknownFunction",
            AppError::DropdownIndex { .. } => "DropdownIndex",
            AppError::InvalidOffset(_) => "InvalidOffset",
            AppError::EventLoop(_) => "EventLoop",
        }
    }
}

/// Render an error and its whole `source()` chain, one cause per line
pub fn trace(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut depth = 0;
    while let Some(cause) = source {
        out.push_str(&format!("\n    {}: {}", depth, cause));
        depth += 1;
        source = cause.source();
    }
    out
}
