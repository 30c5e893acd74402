//! plotdemo - embedded interactive plots
//!
//! A small desktop application showing how widget callbacks drive
//! embedded plots:
//! - sin / cos buttons and a phase spinner redraw the first plot
//! - a dropdown picks log or exp for the second plot
//! - File > Quit and Help > About from the menu bar
//!
//! The widget tree is read from `layout.json` at startup.

use eframe::egui;

mod app;
mod controller;
mod error;
mod functions;
mod layout;
mod render;

use app::PlotDemoApp;
use error::AppError;
use layout::{Layout, LAYOUT_PATH};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting plotdemo");

    if let Err(err) = run() {
        log::error!("{}", error::trace(&err));
        std::process::exit(1);
    }

    log::info!("Event loop exited");
}

fn run() -> Result<(), AppError> {
    let layout = Layout::load(LAYOUT_PATH)?;
    let bindings = layout.bind()?;

    let title = layout.window.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([layout.window.width, layout.window.height])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(PlotDemoApp::new(cc, layout, bindings)))),
    )?;

    Ok(())
}
