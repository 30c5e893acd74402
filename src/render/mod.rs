//! Render module - UI components for visualization
//!
//! This module provides:
//! - Plot surface widget (axes + one series + navigation toolbar)
//! - Message dialog

mod dialog;
mod surface;

pub use dialog::MessageDialog;
pub use surface::{PlotSurface, Series, SurfaceSettings};
