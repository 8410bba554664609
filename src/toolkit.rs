//! Seam between the app and the host UI toolkit.
//!
//! Everything the app asks of the host goes through [`Toolkit`], and
//! everything the host reports back arrives as a [`UiEvent`]. The values
//! crossing the seam are plain data so the app logic runs and is tested
//! without a window server.

use serde::Serialize;

use crate::menu::{Menu, MenuCommand};
use crate::settings::{SettingsContent, SettingsTab};

/// Logical size in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Description of the menu bar icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusIcon {
    /// SF Symbol name.
    pub symbol: &'static str,
    pub size: Size,
    /// Template images are tinted by the system for light and dark menu bars.
    pub template: bool,
}

impl Default for StatusIcon {
    fn default() -> Self {
        Self {
            symbol: "circle.fill",
            size: Size::new(20.0, 20.0),
            template: true,
        }
    }
}

/// Description of the settings panel frame and chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSpec {
    pub title: &'static str,
    pub size: Size,
    pub centered: bool,
    pub closable: bool,
    pub resizable: bool,
    /// Kept above normal windows.
    pub floating: bool,
    /// Name under which the host remembers the frame between launches.
    pub autosave_name: &'static str,
}

impl PanelSpec {
    pub fn settings() -> Self {
        Self {
            title: "Settings",
            size: Size::new(300.0, 200.0),
            centered: true,
            closable: true,
            resizable: false,
            floating: true,
            autosave_name: "Settings",
        }
    }
}

/// Events the host delivers to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiEvent {
    /// The host finished launching.
    Launched,
    Menu(MenuCommand),
    SelectTab(SettingsTab),
    ToggleLaunchAtLogin(bool),
    /// The user closed the settings panel.
    PanelClosed,
}

/// Host UI toolkit operations.
pub trait Toolkit {
    type StatusItem;
    type Panel;

    /// Create the menu bar item. `None` means the host could not provide one;
    /// the app keeps running without an icon.
    fn create_status_item(&mut self, icon: &StatusIcon) -> Option<Self::StatusItem>;

    /// Materialize `menu` and attach it to the status item.
    fn attach_menu(&mut self, item: &Self::StatusItem, menu: &Menu);

    /// Bring the process to the foreground.
    fn activate(&mut self);

    fn create_panel(&mut self, spec: &PanelSpec) -> Self::Panel;

    /// Replace the panel content with `content`.
    fn render_settings(&mut self, panel: &Self::Panel, content: &SettingsContent);

    /// Set the launch-at-login switch already on screen without rebuilding
    /// the panel content.
    fn update_launch_at_login(&mut self, panel: &Self::Panel, enabled: bool);

    /// Show the panel, make it key and raise it above other windows.
    fn show_panel(&mut self, panel: &Self::Panel);

    /// End the process normally.
    fn terminate(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Recording toolkit: panels are indices into `panels`.
    #[derive(Default)]
    pub struct FakeToolkit {
        pub status_items: Vec<StatusIcon>,
        pub attached_menus: Vec<Menu>,
        pub activations: usize,
        pub panels: Vec<FakePanel>,
        pub terminated: bool,
        pub refuse_status_item: bool,
    }

    #[derive(Debug, Clone)]
    pub struct FakePanel {
        pub spec: PanelSpec,
        pub shown: usize,
        pub content: Option<SettingsContent>,
        pub renders: usize,
        pub switch_updates: Vec<bool>,
    }

    impl Toolkit for FakeToolkit {
        type StatusItem = usize;
        type Panel = usize;

        fn create_status_item(&mut self, icon: &StatusIcon) -> Option<usize> {
            if self.refuse_status_item {
                return None;
            }
            self.status_items.push(icon.clone());
            Some(self.status_items.len() - 1)
        }

        fn attach_menu(&mut self, _item: &usize, menu: &Menu) {
            self.attached_menus.push(menu.clone());
        }

        fn activate(&mut self) {
            self.activations += 1;
        }

        fn create_panel(&mut self, spec: &PanelSpec) -> usize {
            self.panels.push(FakePanel {
                spec: spec.clone(),
                shown: 0,
                content: None,
                renders: 0,
                switch_updates: Vec::new(),
            });
            self.panels.len() - 1
        }

        fn render_settings(&mut self, panel: &usize, content: &SettingsContent) {
            let panel = &mut self.panels[*panel];
            panel.content = Some(content.clone());
            panel.renders += 1;
        }

        fn update_launch_at_login(&mut self, panel: &usize, enabled: bool) {
            let panel = &mut self.panels[*panel];
            panel.switch_updates.push(enabled);
            if let Some(content) = panel.content.as_mut() {
                content.pane = crate::settings::Pane::General { launch_at_login: enabled };
            }
        }

        fn show_panel(&mut self, panel: &usize) {
            self.panels[*panel].shown += 1;
        }

        fn terminate(&mut self) {
            self.terminated = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_icon_is_fixed_template() {
        let icon = StatusIcon::default();
        assert_eq!(icon.size, Size::new(20.0, 20.0));
        assert!(icon.template);
    }

    #[test]
    fn settings_panel_frame() {
        let spec = PanelSpec::settings();
        assert_eq!(spec.size, Size::new(300.0, 200.0));
        assert!(spec.centered && spec.closable);
        assert!(!spec.resizable);
        assert!(spec.floating);
    }
}
