//! Modal message dialog
//!
//! Used for the About box and for errors raised by event handlers.
//! While a dialog is open the rest of the window is disabled by the app.

use eframe::egui::{self, Align2, RichText};

/// Text shown by the About action
pub const ABOUT_TEXT: &str = "A simple egui embedded plots demo...";

/// A title and a body, shown until the user dismisses it
#[derive(Clone, Debug, PartialEq)]
pub struct MessageDialog {
    pub title: String,
    pub body: String,
}

impl MessageDialog {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn about() -> Self {
        Self::new("About", ABOUT_TEXT)
    }

    /// Draw the dialog centered over the window
    ///
    /// # Returns
    /// `true` once the user has dismissed it
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;

        egui::Window::new(&self.title)
            .id(egui::Id::new("message_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.body).monospace());
                    });
                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Enter)) {
            dismissed = true;
        }

        dismissed
    }
}
