//! Settings view: a General/About tab strip over a single content pane.
//!
//! The view keeps only the selected tab. The launch-at-login value is read
//! from the store on every render so the switch always shows what the store
//! reports, including after a rejected write.

use std::rc::Rc;

use serde::Serialize;

use crate::config::Config;
use crate::preferences::LoginItemStore;

/// Width reserved for the "Launch at login" label so the switch lines up.
pub const LAUNCH_LABEL_WIDTH: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SettingsTab {
    #[default]
    General,
    About,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 2] = [SettingsTab::General, SettingsTab::About];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::About => "About",
        }
    }

    /// SF Symbol shown above the label.
    pub fn symbol(self) -> &'static str {
        match self {
            SettingsTab::General => "gearshape",
            SettingsTab::About => "info.circle",
        }
    }

    /// Control tag used by the host to report tab clicks.
    pub fn tag(self) -> isize {
        match self {
            SettingsTab::General => 0,
            SettingsTab::About => 1,
        }
    }

    pub fn from_tag(tag: isize) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.tag() == tag)
    }
}

/// Tint of a tab button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TabTint {
    Accent,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabButton {
    pub tab: SettingsTab,
    pub label: &'static str,
    pub symbol: &'static str,
    pub selected: bool,
    pub tint: TabTint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pane {
    General { launch_at_login: bool },
    About { product_name: String, version: String },
}

/// One rendering of the view, handed to the toolkit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsContent {
    pub tabs: Vec<TabButton>,
    pub pane: Pane,
}

impl SettingsContent {
    pub fn selected_tab(&self) -> Option<SettingsTab> {
        self.tabs.iter().find(|t| t.selected).map(|t| t.tab)
    }
}

pub struct SettingsView<P> {
    selected: SettingsTab,
    preferences: Rc<P>,
}

impl<P: LoginItemStore> SettingsView<P> {
    pub fn new(preferences: Rc<P>) -> Self {
        Self {
            selected: SettingsTab::default(),
            preferences,
        }
    }

    pub fn selected_tab(&self) -> SettingsTab {
        self.selected
    }

    pub fn select_tab(&mut self, tab: SettingsTab) {
        crate::debug3!("Settings tab selected: {}", tab.label());
        self.selected = tab;
    }

    /// Current store value; read failures show as off.
    pub fn launch_at_login(&self) -> bool {
        match self.preferences.is_enabled() {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::warn!("Failed to read launch-at-login state: {}", e);
                false
            }
        }
    }

    /// Write the switch value through to the store, once.
    pub fn set_launch_at_login(&mut self, enabled: bool) {
        match self.preferences.set_enabled(enabled) {
            Ok(()) => tracing::info!(enabled, "Launch at login updated"),
            Err(e) => tracing::warn!(enabled, "Failed to update launch at login: {}", e),
        }
    }

    pub fn render(&self) -> SettingsContent {
        let tabs = SettingsTab::ALL
            .into_iter()
            .map(|tab| {
                let selected = tab == self.selected;
                TabButton {
                    tab,
                    label: tab.label(),
                    symbol: tab.symbol(),
                    selected,
                    tint: if selected { TabTint::Accent } else { TabTint::Neutral },
                }
            })
            .collect();

        let pane = match self.selected {
            SettingsTab::General => Pane::General {
                launch_at_login: self.launch_at_login(),
            },
            SettingsTab::About => Pane::About {
                product_name: Config::product_name(),
                version: format!("Version {}", Config::display_version()),
            },
        };

        SettingsContent { tabs, pane }
    }
}
