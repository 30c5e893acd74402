//! eframe application
//!
//! Draws the window described by the layout and turns widget
//! interactions into `UiEvent`s for the controller. Events are collected
//! while drawing and dispatched once the frame's panels are laid out.

use eframe::egui;

use crate::controller::{Controller, UiEvent};
use crate::layout::{Bindings, Layout, Role, SpinBoxSpec, Widget};

/// Main application state
pub struct PlotDemoApp {
    layout: Layout,
    bindings: Bindings,
    controller: Controller,

    active_tab: usize,

    // Widget state mirrored from the controls
    phase_value: f64,
    dropdown_index: usize,
}

impl PlotDemoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, layout: Layout, bindings: Bindings) -> Self {
        let controller = Controller::new(&bindings, layout.status.clone());
        let phase_value = bindings.phase_box.value;

        Self {
            layout,
            bindings,
            controller,
            active_tab: 0,
            phase_value,
            dropdown_index: 0,
        }
    }

    fn menu_bar(&self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        egui::menu::bar(ui, |ui| {
            for menu in &self.layout.menus {
                ui.menu_button(&menu.title, |ui| {
                    for action in &menu.actions {
                        if ui.button(&action.text).clicked() {
                            if action.name == self.bindings.quit.name {
                                events.push(UiEvent::Quit);
                            } else if action.name == self.bindings.about.name {
                                events.push(UiEvent::About);
                            } else {
                                log::debug!("Menu action {} has no handler", action.name);
                            }
                            ui.close_menu();
                        }
                    }
                });
            }
        });
    }

    fn tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for (i, tab) in self.layout.tabs.iter().enumerate() {
                ui.selectable_value(&mut self.active_tab, i, &tab.title);
            }
        });
    }

    /// Draw the active tab: controls in a row, plot areas sharing the rest
    fn tab_contents(&mut self, ui: &mut egui::Ui, events: &mut Vec<UiEvent>) {
        let Some(tab) = self.layout.tabs.get(self.active_tab) else {
            return;
        };

        ui.horizontal_wrapped(|ui| {
            for widget in &tab.widgets {
                let role = Role::from_widget_name(widget.name());
                match widget {
                    Widget::Button(spec) => {
                        if ui.button(&spec.label).clicked() {
                            match role {
                                Some(Role::SinButton) => events.push(UiEvent::SelectSine),
                                Some(Role::CosButton) => events.push(UiEvent::SelectCosine),
                                _ => log::debug!("Button {} has no handler", spec.name),
                            }
                        }
                    }
                    Widget::SpinBox(spec) => {
                        if role == Some(Role::PhaseBox) && spin_box(ui, spec, &mut self.phase_value) {
                            events.push(UiEvent::OffsetChanged(self.phase_value));
                        }
                    }
                    Widget::ComboBox(spec) => {
                        if role != Some(Role::FuncDropdown) || spec.items.is_empty() {
                            continue;
                        }
                        let current = spec
                            .items
                            .get(self.dropdown_index)
                            .map(String::as_str)
                            .unwrap_or_default();
                        egui::ComboBox::from_label(&spec.label)
                            .selected_text(current)
                            .show_ui(ui, |ui| {
                                for (i, item) in spec.items.iter().enumerate() {
                                    // Re-selecting the current item still fires, like a toolkit "activated" signal
                                    if ui
                                        .selectable_value(&mut self.dropdown_index, i, item)
                                        .clicked()
                                    {
                                        events.push(UiEvent::DropdownActivated(i));
                                    }
                                }
                            });
                    }
                    Widget::Label(spec) => {
                        ui.label(&spec.text);
                    }
                    Widget::PlotArea(_) => {}
                }
            }
        });
        ui.separator();

        let plots: Vec<Role> = tab
            .widgets
            .iter()
            .filter(|w| matches!(w, Widget::PlotArea(_)))
            .filter_map(|w| Role::from_widget_name(w.name()))
            .collect();
        if plots.is_empty() {
            return;
        }

        let height = ui.available_height() / plots.len() as f32;
        let width = ui.available_width();
        for role in plots {
            let surface = match role {
                Role::Preview => &mut self.controller.surface1,
                Role::Preview2 => &mut self.controller.surface2,
                _ => continue,
            };
            ui.allocate_ui(egui::vec2(width, height), |ui| {
                surface.show(ui);
            });
        }
    }
}

/// A numeric spinner: drag value plus step buttons
///
/// # Returns
/// `true` if the value changed this frame
fn spin_box(ui: &mut egui::Ui, spec: &SpinBoxSpec, value: &mut f64) -> bool {
    let mut changed = false;

    if !spec.label.is_empty() {
        ui.label(&spec.label);
    }
    if ui.small_button("−").clicked() {
        changed |= step_value(value, -spec.step, spec);
    }
    changed |= ui
        .add(
            egui::DragValue::new(value)
                .range(spec.min..=spec.max)
                .speed(spec.step)
                .fixed_decimals(spec.decimals),
        )
        .changed();
    if ui.small_button("+").clicked() {
        changed |= step_value(value, spec.step, spec);
    }

    changed
}

/// Move `value` by `delta`, clamped to the spinner's range and rounded to its decimals
///
/// # Returns
/// `true` if the value actually moved
fn step_value(value: &mut f64, delta: f64, spec: &SpinBoxSpec) -> bool {
    let stepped = (*value + delta).clamp(spec.min, spec.max);
    let stepped = egui::emath::round_to_decimals(stepped, spec.decimals);
    if stepped == *value {
        return false;
    }
    *value = stepped;
    true
}

impl eframe::App for PlotDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();
        let modal = self.controller.dialog().is_some();

        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| {
                self.menu_bar(ui, &mut events);
                self.tab_bar(ui);
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.controller.status());
                ui.separator();
                ui.small(format!(
                    "{}(t + {:.2})",
                    self.controller.selected().name(),
                    self.controller.offset()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal, |ui| {
                self.tab_contents(ui, &mut events);
            });
        });

        if let Some(dialog) = self.controller.dialog() {
            if dialog.show(ctx) {
                self.controller.dismiss_dialog();
            }
        }

        if !events.is_empty() {
            for event in events {
                self.controller.dispatch(event);
            }
            ctx.request_repaint();
        }

        if self.controller.close_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
