//! Plot surface widget
//!
//! A plot surface is a set of coordinate axes holding at most one
//! `(x, y)` series. Every redraw clears the axes before plotting, so
//! the surface only ever shows the most recent series.
//!
//! ## Navigation
//!
//! A small toolbar above the axes controls the view:
//! - Home: fit the view to the current series
//! - Pan / Zoom: enable or disable dragging and scroll-zooming
//! - the data coordinates under the cursor

use eframe::egui::{self, Color32};
use egui_plot::{Line, Plot, PlotPoints};

/// One `(x, y)` series
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend label
    pub label: String,
    /// Points as `[x, y]` pairs
    pub points: Vec<[f64; 2]>,
}

impl Series {
    /// Pair up `xs` and `ys`; extra values on the longer side are dropped
    pub fn new(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self {
            label: label.into(),
            points: xs.iter().zip(ys).map(|(x, y)| [*x, *y]).collect(),
        }
    }

    #[cfg(test)]
    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[1])
    }
}

/// Display settings for a plot surface
#[derive(Clone)]
pub struct SurfaceSettings {
    /// Line color
    pub color: Color32,

    /// Line thickness in pixels
    pub line_width: f32,

    /// Whether to draw grid lines
    pub show_grid: bool,

    pub x_label: String,
    pub y_label: String,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(31, 119, 180),
            line_width: 1.5,
            show_grid: true,
            x_label: "t".to_string(),
            y_label: "f(t)".to_string(),
        }
    }
}

/// Axes plus the series currently drawn on them
pub struct PlotSurface {
    /// egui id for the plot memory (view bounds, etc.)
    id: String,

    /// Display settings
    pub settings: SurfaceSettings,

    series: Option<Series>,

    /// Number of redraws since creation
    redraws: u64,

    /// Refit the view on the next frame
    reset_view: bool,

    pan_enabled: bool,
    zoom_enabled: bool,

    /// Data coordinates under the pointer during the last frame
    cursor: Option<[f64; 2]>,
}

impl PlotSurface {
    #[cfg(test)]
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_settings(id, SurfaceSettings::default())
    }

    pub fn with_settings(id: impl Into<String>, settings: SurfaceSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            series: None,
            redraws: 0,
            reset_view: false,
            pan_enabled: true,
            zoom_enabled: true,
            cursor: None,
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace whatever is on the axes with `series`
    pub fn plot(&mut self, series: Series) {
        self.clear();
        self.redraws += 1;
        log::debug!(
            "{}: redraw #{} plotting '{}' ({} points)",
            self.id,
            self.redraws,
            series.label,
            series.points.len()
        );
        self.series = Some(series);
        self.reset_view = true;
    }

    /// Remove all drawn content
    pub fn clear(&mut self) {
        self.series = None;
    }

    pub fn series(&self) -> Option<&Series> {
        self.series.as_ref()
    }

    #[cfg(test)]
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Fit the view to the data on the next frame
    pub fn home(&mut self) {
        self.reset_view = true;
    }

    /// Draw the toolbar and the axes, filling the available space
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        self.show_toolbar(ui);

        let mut plot = Plot::new(&self.id)
            .allow_drag(self.pan_enabled)
            .allow_zoom(self.zoom_enabled)
            .allow_scroll(self.pan_enabled)
            .allow_boxed_zoom(self.zoom_enabled)
            .show_grid(self.settings.show_grid)
            .x_axis_label(self.settings.x_label.clone())
            .y_axis_label(self.settings.y_label.clone());
        if self.reset_view {
            plot = plot.reset();
            self.reset_view = false;
        }

        let line = self.series.as_ref().map(|series| {
            Line::new(PlotPoints::from(series.points.clone()))
                .color(self.settings.color)
                .width(self.settings.line_width)
                .name(&series.label)
        });

        let response = plot.show(ui, |plot_ui| {
            if let Some(line) = line {
                plot_ui.line(line);
            }
        });

        self.cursor = response
            .response
            .hover_pos()
            .map(|pos| response.transform.value_from_position(pos))
            .map(|p| [p.x, p.y]);

        response.response
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("⌂ Home").on_hover_text("Fit view to data").clicked() {
                self.home();
            }
            ui.toggle_value(&mut self.pan_enabled, "✋ Pan");
            ui.toggle_value(&mut self.zoom_enabled, "🔍 Zoom");
            ui.separator();
            match self.cursor {
                Some([x, y]) => ui.small(format!("x={:.4}  y={:.4}", x, y)),
                None => ui.small(""),
            };
        });
    }
}
