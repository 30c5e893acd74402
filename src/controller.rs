//! Window controller
//!
//! Owns everything the window shows: the two plot surfaces, the selected
//! function and phase offset for the first surface, and the dropdown's
//! function table for the second. Widget interactions arrive as
//! `UiEvent`s through `dispatch`, one at a time on the UI thread.
//!
//! Nothing in here touches egui, so the whole event flow can be driven
//! from tests.

use crate::error::{self, AppError};
use crate::functions::{self, FunctionTable, MathFunction};
use crate::layout::Bindings;
use crate::render::{MessageDialog, PlotSurface, Series, SurfaceSettings};

/// Something the user did
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    SelectSine,
    SelectCosine,
    OffsetChanged(f64),
    DropdownActivated(usize),
    Quit,
    About,
}

/// Window state and event handlers
pub struct Controller {
    /// Function drawn on the first surface
    selected: MathFunction,
    /// Phase offset added to every sample on the first surface
    offset: f64,

    /// Name -> function mapping behind the dropdown
    table: FunctionTable,
    /// Dropdown items as laid out, index -> display name
    dropdown_items: Vec<String>,

    /// Shared sample grid, never modified after construction
    samples: Vec<f64>,

    pub surface1: PlotSurface,
    pub surface2: PlotSurface,

    /// Status bar text
    status: String,

    /// Dialog waiting to be dismissed, if any
    dialog: Option<MessageDialog>,

    close_requested: bool,
}

impl Controller {
    pub fn new(bindings: &Bindings, status: impl Into<String>) -> Self {
        let surface_settings = |x: &Option<String>, y: &Option<String>| {
            let mut settings = SurfaceSettings::default();
            if let Some(x) = x {
                settings.x_label = x.clone();
            }
            if let Some(y) = y {
                settings.y_label = y.clone();
            }
            settings
        };

        let preview = &bindings.preview;
        let preview_2 = &bindings.preview_2;

        Self {
            selected: MathFunction::Sine,
            offset: bindings.phase_box.value,
            table: FunctionTable::dropdown(),
            dropdown_items: bindings.func_dropdown.items.clone(),
            samples: functions::sample_grid(),
            surface1: PlotSurface::with_settings(
                preview.name.clone(),
                surface_settings(&preview.x_label, &preview.y_label),
            ),
            surface2: PlotSurface::with_settings(
                preview_2.name.clone(),
                surface_settings(&preview_2.x_label, &preview_2.y_label),
            ),
            status: status.into(),
            dialog: None,
            close_requested: false,
        }
    }

    pub fn selected(&self) -> MathFunction {
        self.selected
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[cfg(test)]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn dialog(&self) -> Option<&MessageDialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Route an event to its handler
    ///
    /// Any error a handler returns is turned into a message dialog titled
    /// with the error's kind; it never propagates past this point.
    pub fn dispatch(&mut self, event: UiEvent) {
        log::debug!("Dispatching {:?}", event);
        self.report_errors(|controller| controller.handle(event));
    }

    /// Run `handler`, showing a dialog instead of propagating its error
    fn report_errors<F>(&mut self, handler: F)
    where
        F: FnOnce(&mut Self) -> Result<(), AppError>,
    {
        if let Err(err) = handler(self) {
            log::warn!("{} in event handler: {}", err.kind(), err);
            self.dialog = Some(MessageDialog::new(err.kind(), error::trace(&err)));
        }
    }

    fn handle(&mut self, event: UiEvent) -> Result<(), AppError> {
        match event {
            UiEvent::SelectSine => self.select_function(MathFunction::Sine),
            UiEvent::SelectCosine => self.select_function(MathFunction::Cosine),
            UiEvent::OffsetChanged(offset) => self.set_offset(offset),
            UiEvent::DropdownActivated(index) => self.activate_dropdown(index),
            UiEvent::Quit => {
                self.quit();
                Ok(())
            }
            UiEvent::About => {
                self.about();
                Ok(())
            }
        }
    }

    /// Make `f` the first surface's function and redraw it
    fn select_function(&mut self, f: MathFunction) -> Result<(), AppError> {
        self.selected = f;
        self.plot_offset();
        Ok(())
    }

    /// Store a new phase offset and redraw the first surface with the current function
    fn set_offset(&mut self, offset: f64) -> Result<(), AppError> {
        if !offset.is_finite() {
            return Err(AppError::InvalidOffset(offset));
        }
        self.offset = offset;
        self.plot_offset();
        Ok(())
    }

    /// Plot the dropdown's `index`-th function on the second surface
    fn activate_dropdown(&mut self, index: usize) -> Result<(), AppError> {
        let name = self
            .dropdown_items
            .get(index)
            .ok_or(AppError::DropdownIndex {
                index,
                len: self.dropdown_items.len(),
            })?;
        let f = self.table.lookup(name)?;

        let ys = f.evaluate(&self.samples, 0.0);
        self.surface2
            .plot(Series::new(format!("{}(t)", f.name()), &self.samples, &ys));
        self.status = format!("Plotted {}(t)", f.name());
        Ok(())
    }

    fn plot_offset(&mut self) {
        let ys = self.selected.evaluate(&self.samples, self.offset);
        let label = format!("{}(t + {:.2})", self.selected.name(), self.offset);
        self.surface1.plot(Series::new(label.clone(), &self.samples, &ys));
        self.status = format!("Plotted {}", label);
    }

    fn quit(&mut self) {
        log::info!("Quit requested");
        self.close_requested = true;
    }

    fn about(&mut self) {
        self.dialog = Some(MessageDialog::about());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    const TOLERANCE: f64 = 1e-12;

    fn controller_from(json: &str) -> Controller {
        let layout = Layout::from_json(json).unwrap();
        let bindings = layout.bind().unwrap();
        Controller::new(&bindings, layout.status.clone())
    }

    fn controller() -> Controller {
        controller_from(include_str!("../layout.json"))
    }

    fn plotted_ys(surface: &PlotSurface) -> Vec<f64> {
        surface.series().expect("surface has a series").ys().collect()
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.selected(), MathFunction::Sine);
        assert_eq!(c.offset(), 0.0);
        assert_eq!(c.samples().len(), functions::SAMPLE_COUNT);
        assert_eq!(c.status(), "testing");
        assert!(c.surface1.series().is_none());
        assert!(c.surface2.series().is_none());
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_offset_then_sine_end_to_end() {
        let mut c = controller();
        c.dispatch(UiEvent::OffsetChanged(1.5));

        let ys = plotted_ys(&c.surface1);
        assert_eq!(ys.len(), c.samples().len());
        for (t, y) in c.samples().iter().zip(&ys) {
            assert!((y - (t + 1.5).sin()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_zero_offset_plots_function_at_samples() {
        let mut c = controller();
        c.dispatch(UiEvent::SelectCosine);

        let ys = plotted_ys(&c.surface1);
        let expected: Vec<f64> = c.samples().iter().map(|t| t.cos()).collect();
        assert_eq!(ys, expected);
    }

    #[test]
    fn test_status_reports_first_surface_redraws() {
        let mut c = controller();

        c.dispatch(UiEvent::OffsetChanged(1.5));
        assert_eq!(c.status(), "Plotted sin(t + 1.50)");

        c.dispatch(UiEvent::SelectCosine);
        assert_eq!(c.status(), "Plotted cos(t + 1.50)");

        c.dispatch(UiEvent::SelectSine);
        assert_eq!(c.status(), "Plotted sin(t + 1.50)");
    }

    #[test]
    fn test_status_reports_second_surface_redraws() {
        let mut c = controller();
        c.dispatch(UiEvent::OffsetChanged(2.0));

        c.dispatch(UiEvent::DropdownActivated(0));
        assert_eq!(c.status(), "Plotted log(t)");

        c.dispatch(UiEvent::DropdownActivated(1));
        assert_eq!(c.status(), "Plotted exp(t)");
    }

    #[test]
    fn test_status_unchanged_by_failed_handler() {
        let mut c = controller();
        c.dispatch(UiEvent::DropdownActivated(0));
        c.dispatch(UiEvent::DropdownActivated(9));
        assert_eq!(c.status(), "Plotted log(t)");
    }

    #[test]
    fn test_switching_function_keeps_offset() {
        let mut c = controller();
        c.dispatch(UiEvent::OffsetChanged(0.75));
        c.dispatch(UiEvent::SelectCosine);
        assert_eq!(c.offset(), 0.75);
        c.dispatch(UiEvent::SelectSine);
        assert_eq!(c.offset(), 0.75);
        assert_eq!(c.selected(), MathFunction::Sine);
    }

    #[test]
    fn test_offset_change_keeps_selected_function() {
        let mut c = controller();
        c.dispatch(UiEvent::SelectCosine);
        c.dispatch(UiEvent::OffsetChanged(2.0));

        assert_eq!(c.selected(), MathFunction::Cosine);
        let ys = plotted_ys(&c.surface1);
        for (t, y) in c.samples().iter().zip(&ys) {
            assert!((y - (t + 2.0).cos()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_redraw_clears_previous_series() {
        let mut c = controller();
        c.dispatch(UiEvent::SelectSine);
        c.dispatch(UiEvent::SelectCosine);

        let mut fresh = controller();
        fresh.dispatch(UiEvent::SelectCosine);

        assert_eq!(c.surface1.series(), fresh.surface1.series());
        assert_eq!(c.surface1.redraws(), 2);
    }

    #[test]
    fn test_dropdown_plots_without_offset() {
        let mut c = controller();
        c.dispatch(UiEvent::OffsetChanged(3.0));
        c.dispatch(UiEvent::DropdownActivated(0));

        let ys = plotted_ys(&c.surface2);
        for (t, y) in c.samples().iter().zip(&ys) {
            assert!((y - t.ln()).abs() < TOLERANCE);
        }

        c.dispatch(UiEvent::DropdownActivated(1));
        let ys = plotted_ys(&c.surface2);
        for (t, y) in c.samples().iter().zip(&ys) {
            assert!((y - t.exp()).abs() < TOLERANCE * y.abs().max(1.0));
        }
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_unmapped_dropdown_item_shows_dialog() {
        let json = include_str!("../layout.json").replace(r#"["log", "exp"]"#, r#"["log", "sqrt"]"#);
        let mut c = controller_from(&json);
        c.dispatch(UiEvent::DropdownActivated(0));
        let before = c.surface2.series().cloned();

        c.dispatch(UiEvent::DropdownActivated(1));

        let dialog = c.dialog().expect("error dialog");
        assert_eq!(dialog.title, "UnknownFunction");
        assert!(dialog.body.contains("sqrt"));
        assert_eq!(c.surface2.series().cloned(), before);
    }

    #[test]
    fn test_dropdown_index_out_of_range_shows_dialog() {
        let mut c = controller();
        c.dispatch(UiEvent::DropdownActivated(7));

        let dialog = c.dialog().expect("error dialog");
        assert_eq!(dialog.title, "DropdownIndex");
        assert!(c.surface2.series().is_none());

        c.dismiss_dialog();
        assert!(c.dialog().is_none());
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let mut c = controller();
        c.dispatch(UiEvent::OffsetChanged(1.0));
        c.dispatch(UiEvent::OffsetChanged(f64::INFINITY));

        assert_eq!(c.offset(), 1.0);
        assert_eq!(c.surface1.redraws(), 1);
        assert_eq!(c.dialog().map(|d| d.title.as_str()), Some("InvalidOffset"));
    }

    #[test]
    fn test_about_leaves_plot_state_alone() {
        let mut c = controller();
        c.dispatch(UiEvent::SelectCosine);
        c.dispatch(UiEvent::OffsetChanged(0.5));
        let series1 = c.surface1.series().cloned();
        let redraws = c.surface1.redraws();

        c.dispatch(UiEvent::About);
        c.dispatch(UiEvent::About);

        assert_eq!(c.dialog(), Some(&MessageDialog::about()));
        assert_eq!(c.selected(), MathFunction::Cosine);
        assert_eq!(c.offset(), 0.5);
        assert_eq!(c.surface1.series().cloned(), series1);
        assert_eq!(c.surface1.redraws(), redraws);
        assert!(c.surface2.series().is_none());
    }

    #[test]
    fn test_quit_only_requests_close() {
        let mut c = controller();
        c.dispatch(UiEvent::Quit);
        assert!(c.close_requested());
        assert!(c.dialog().is_none());
        assert!(c.surface1.series().is_none());
    }
}
