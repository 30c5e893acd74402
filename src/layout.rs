//! Layout description loading
//!
//! The window's widget tree (tabs, buttons, spinner, dropdown, plot
//! areas, menus) is described in an external JSON file rather than in
//! code. Loading happens in two steps:
//!
//! 1. `Layout::load` parses the file into plain data
//! 2. `Layout::bind` looks up the widgets the controller needs by name
//!    and checks they have the right kind
//!
//! Widgets without a role (e.g. plain labels) are still drawn, they just
//! don't produce events.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::LayoutError;

/// Where the layout description is read from, relative to the working directory
pub const LAYOUT_PATH: &str = "layout.json";

/// Top-level layout description
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Layout {
    pub window: WindowSpec,
    /// Message shown in the status bar at startup
    pub status: String,
    pub menus: Vec<MenuSpec>,
    pub tabs: Vec<TabSpec>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowSpec {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            title: "plotdemo".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MenuSpec {
    pub title: String,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ActionSpec {
    pub name: String,
    pub text: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TabSpec {
    pub title: String,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

/// A widget in a tab, tagged by `kind`
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Button(ButtonSpec),
    SpinBox(SpinBoxSpec),
    ComboBox(ComboBoxSpec),
    PlotArea(PlotAreaSpec),
    Label(LabelSpec),
}

impl Widget {
    pub fn name(&self) -> &str {
        match self {
            Widget::Button(w) => &w.name,
            Widget::SpinBox(w) => &w.name,
            Widget::ComboBox(w) => &w.name,
            Widget::PlotArea(w) => &w.name,
            Widget::Label(w) => &w.name,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Button(_) => "button",
            Widget::SpinBox(_) => "spin_box",
            Widget::ComboBox(_) => "combo_box",
            Widget::PlotArea(_) => "plot_area",
            Widget::Label(_) => "label",
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ButtonSpec {
    pub name: String,
    pub label: String,
}

/// A double spin box; defaults follow the usual toolkit defaults
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpinBoxSpec {
    pub name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub decimals: usize,
    pub value: f64,
}

impl Default for SpinBoxSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            min: 0.0,
            max: 99.99,
            step: 1.0,
            decimals: 2,
            value: 0.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ComboBoxSpec {
    pub name: String,
    #[serde(default)]
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlotAreaSpec {
    pub name: String,
    #[serde(default)]
    pub x_label: Option<String>,
    #[serde(default)]
    pub y_label: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LabelSpec {
    #[serde(default)]
    pub name: String,
    pub text: String,
}

/// What a bound widget does in the window
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    SinButton,
    CosButton,
    PhaseBox,
    FuncDropdown,
    Preview,
    Preview2,
}

impl Role {
    /// Widget name each role is bound to
    pub fn widget_name(&self) -> &'static str {
        match self {
            Role::SinButton => "sinButton",
            Role::CosButton => "cosButton",
            Role::PhaseBox => "phaseBox",
            Role::FuncDropdown => "funcDropdown",
            Role::Preview => "preview",
            Role::Preview2 => "preview_2",
        }
    }

    fn all() -> &'static [Role] {
        &[
            Role::SinButton,
            Role::CosButton,
            Role::PhaseBox,
            Role::FuncDropdown,
            Role::Preview,
            Role::Preview2,
        ]
    }

    /// Role of the widget called `name`, if it has one
    pub fn from_widget_name(name: &str) -> Option<Role> {
        Role::all().iter().copied().find(|r| r.widget_name() == name)
    }
}

pub const QUIT_ACTION: &str = "action_Quit";
pub const ABOUT_ACTION: &str = "action_About";

/// The widgets the controller addresses directly, resolved by name
///
/// The sin/cos buttons carry nothing beyond their label, so they are
/// checked by `Layout::bind` but not stored.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub phase_box: SpinBoxSpec,
    pub func_dropdown: ComboBoxSpec,
    pub preview: PlotAreaSpec,
    pub preview_2: PlotAreaSpec,
    pub quit: ActionSpec,
    pub about: ActionSpec,
}

impl Layout {
    /// Read and parse a layout file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layout = Self::from_json(&contents)?;
        log::info!(
            "Loaded layout from {} ({} tabs)",
            path.display(),
            layout.tabs.len()
        );
        Ok(layout)
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// All widgets across every tab, in declaration order
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.tabs.iter().flat_map(|tab| tab.widgets.iter())
    }

    fn find_widget(&self, name: &str) -> Result<&Widget, LayoutError> {
        self.widgets()
            .find(|w| w.name() == name)
            .ok_or_else(|| LayoutError::MissingWidget(name.to_string()))
    }

    fn find_action(&self, name: &str) -> Result<&ActionSpec, LayoutError> {
        self.menus
            .iter()
            .flat_map(|menu| menu.actions.iter())
            .find(|a| a.name == name)
            .ok_or_else(|| LayoutError::MissingWidget(name.to_string()))
    }

    /// Resolve every named widget the controller needs
    pub fn bind(&self) -> Result<Bindings, LayoutError> {
        let mut seen = HashSet::new();
        for widget in self.widgets() {
            let name = widget.name();
            if !name.is_empty() && !seen.insert(name) {
                return Err(LayoutError::DuplicateWidget(name.to_string()));
            }
        }

        let func_dropdown = self.combo_box(Role::FuncDropdown)?;
        if func_dropdown.items.is_empty() {
            return Err(LayoutError::EmptyDropdown(func_dropdown.name));
        }

        self.check_button(Role::SinButton)?;
        self.check_button(Role::CosButton)?;

        Ok(Bindings {
            phase_box: self.spin_box(Role::PhaseBox)?,
            func_dropdown,
            preview: self.plot_area(Role::Preview)?,
            preview_2: self.plot_area(Role::Preview2)?,
            quit: self.find_action(QUIT_ACTION)?.clone(),
            about: self.find_action(ABOUT_ACTION)?.clone(),
        })
    }

    fn check_button(&self, role: Role) -> Result<(), LayoutError> {
        match self.find_widget(role.widget_name())? {
            Widget::Button(_) => Ok(()),
            other => Err(wrong_kind(other, "button")),
        }
    }

    fn spin_box(&self, role: Role) -> Result<SpinBoxSpec, LayoutError> {
        match self.find_widget(role.widget_name())? {
            Widget::SpinBox(spec) => Ok(spec.clone()),
            other => Err(wrong_kind(other, "spin_box")),
        }
    }

    fn combo_box(&self, role: Role) -> Result<ComboBoxSpec, LayoutError> {
        match self.find_widget(role.widget_name())? {
            Widget::ComboBox(spec) => Ok(spec.clone()),
            other => Err(wrong_kind(other, "combo_box")),
        }
    }

    fn plot_area(&self, role: Role) -> Result<PlotAreaSpec, LayoutError> {
        match self.find_widget(role.widget_name())? {
            Widget::PlotArea(spec) => Ok(spec.clone()),
            other => Err(wrong_kind(other, "plot_area")),
        }
    }
}

fn wrong_kind(widget: &Widget, expected: &'static str) -> LayoutError {
    LayoutError::WrongKind {
        name: widget.name().to_string(),
        expected,
        found: widget.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"{
        "menus": [
            {"title": "File", "actions": [{"name": "action_Quit", "text": "Quit"}]},
            {"title": "Help", "actions": [{"name": "action_About", "text": "About"}]}
        ],
        "tabs": [
            {"title": "one", "widgets": [
                {"kind": "button", "name": "sinButton", "label": "sin"},
                {"kind": "button", "name": "cosButton", "label": "cos"},
                {"kind": "spin_box", "name": "phaseBox"},
                {"kind": "plot_area", "name": "preview"}
            ]},
            {"title": "two", "widgets": [
                {"kind": "combo_box", "name": "funcDropdown", "items": ["log", "exp"]},
                {"kind": "plot_area", "name": "preview_2"}
            ]}
        ]
    }"#;

    #[test]
    fn test_bind_minimal_layout() {
        let layout = Layout::from_json(MINIMAL).unwrap();
        let bindings = layout.bind().unwrap();

        assert_eq!(bindings.func_dropdown.items, vec!["log", "exp"]);
        assert_eq!(bindings.quit.text, "Quit");
        assert_eq!(Role::from_widget_name("phaseBox"), Some(Role::PhaseBox));
        assert_eq!(Role::from_widget_name("preview_2"), Some(Role::Preview2));
        assert_eq!(Role::from_widget_name("nothing"), None);

        // Unset fields fall back to defaults
        assert_eq!(layout.window.title, "plotdemo");
        assert_eq!(bindings.phase_box.max, 99.99);
        assert_eq!(bindings.phase_box.step, 1.0);
    }

    #[test]
    fn test_shipped_layout_binds() {
        let layout = Layout::from_json(include_str!("../layout.json")).unwrap();
        let bindings = layout.bind().unwrap();
        assert_eq!(layout.status, "testing");
        assert_eq!(bindings.func_dropdown.items, vec!["log", "exp"]);
    }

    #[test]
    fn test_missing_widget() {
        let json = MINIMAL.replace("\"cosButton\"", "\"tanButton\"");
        let err = Layout::from_json(&json).unwrap().bind().unwrap_err();
        assert!(matches!(err, LayoutError::MissingWidget(ref n) if n == "cosButton"));
    }

    #[test]
    fn test_missing_action() {
        let json = MINIMAL.replace("action_About", "action_Help");
        let err = Layout::from_json(&json).unwrap().bind().unwrap_err();
        assert!(matches!(err, LayoutError::MissingWidget(ref n) if n == "action_About"));
    }

    #[test]
    fn test_wrong_kind() {
        let json = MINIMAL.replace(
            r#"{"kind": "spin_box", "name": "phaseBox"}"#,
            r#"{"kind": "button", "name": "phaseBox", "label": "oops"}"#,
        );
        let err = Layout::from_json(&json).unwrap().bind().unwrap_err();
        match err {
            LayoutError::WrongKind { name, expected, found } => {
                assert_eq!(name, "phaseBox");
                assert_eq!(expected, "spin_box");
                assert_eq!(found, "button");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_widget() {
        let json = MINIMAL.replace("\"preview_2\"", "\"preview\"");
        let err = Layout::from_json(&json).unwrap().bind().unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateWidget(ref n) if n == "preview"));
    }

    #[test]
    fn test_empty_dropdown() {
        let json = MINIMAL.replace(r#"["log", "exp"]"#, "[]");
        let err = Layout::from_json(&json).unwrap().bind().unwrap_err();
        assert!(matches!(err, LayoutError::EmptyDropdown(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = Layout::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let layout = Layout::load(file.path()).unwrap();
        assert_eq!(layout.tabs.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Layout::load(&path).unwrap_err();
        match err {
            LayoutError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
