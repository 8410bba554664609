//! Application state
//!
//! [`AppState`] is the one top-level object of the process. It owns the host
//! toolkit, the status item and the menu controller, and is the single entry
//! point for every [`UiEvent`] the host delivers. The runner constructs it
//! explicitly and hands the host a dispatcher holding a reference to it.

use std::rc::Rc;

use crate::menu::{MenuCommand, MenuController, PanelState};
use crate::preferences::LoginItemStore;
use crate::toolkit::{StatusIcon, Toolkit, UiEvent};

/// Startup behavior chosen on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    /// Open the settings panel as soon as the host has launched.
    pub open_settings: bool,
}

pub struct AppState<T: Toolkit, P> {
    toolkit: T,
    menu: MenuController<T, P>,
    status_item: Option<T::StatusItem>,
    launched: bool,
    options: LaunchOptions,
}

impl<T: Toolkit, P: LoginItemStore> AppState<T, P> {
    pub fn new(toolkit: T, preferences: P, options: LaunchOptions) -> Self {
        Self {
            toolkit,
            menu: MenuController::new(Rc::new(preferences)),
            status_item: None,
            launched: false,
            options,
        }
    }

    /// Create the status icon and attach the menu. Runs once; later calls
    /// are ignored.
    pub fn on_launch(&mut self) {
        if self.launched {
            tracing::warn!("Launch reported twice, keeping the existing status item");
            return;
        }
        self.launched = true;

        let icon = StatusIcon::default();
        match self.toolkit.create_status_item(&icon) {
            Some(item) => {
                let menu = self.menu.build_menu();
                self.toolkit.attach_menu(&item, menu);
                self.status_item = Some(item);
                crate::debug1!("Status item ready ({} symbol)", icon.symbol);
            }
            None => tracing::error!("Status item unavailable, running without a menu bar icon"),
        }

        if self.options.open_settings {
            crate::debug1!("Opening settings panel at launch");
            self.menu.on_select_settings(&mut self.toolkit);
        }
    }

    pub fn handle(&mut self, event: UiEvent) {
        crate::debug2!("Handling {:?}", event);
        match event {
            UiEvent::Launched => self.on_launch(),
            UiEvent::Menu(MenuCommand::Settings) => self.menu.on_select_settings(&mut self.toolkit),
            UiEvent::Menu(MenuCommand::Quit) => self.menu.on_select_quit(&mut self.toolkit),
            UiEvent::SelectTab(tab) => self.menu.on_select_tab(&mut self.toolkit, tab),
            UiEvent::ToggleLaunchAtLogin(enabled) => {
                self.menu.on_toggle_launch_at_login(&mut self.toolkit, enabled)
            }
            UiEvent::PanelClosed => self.menu.on_panel_closed(),
        }
    }

    pub fn has_status_item(&self) -> bool {
        self.status_item.is_some()
    }

    pub fn panel_state(&self) -> PanelState {
        self.menu.panel_state()
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;
    use crate::preferences::testing::MemoryStore;
    use crate::settings::{Pane, SettingsTab};
    use crate::toolkit::testing::FakeToolkit;
    use crate::toolkit::Size;

    fn app(options: LaunchOptions) -> AppState<FakeToolkit, MemoryStore> {
        AppState::new(FakeToolkit::default(), MemoryStore::default(), options)
    }

    #[test]
    fn launch_creates_icon_with_menu() {
        let mut app = app(LaunchOptions::default());
        assert!(!app.has_status_item());

        app.handle(UiEvent::Launched);

        assert!(app.has_status_item());
        assert_eq!(app.panel_state(), PanelState::Uninitialized);
        let toolkit = app.toolkit();
        assert_eq!(toolkit.status_items, vec![StatusIcon::default()]);
        assert_eq!(toolkit.attached_menus.len(), 1);
        assert_eq!(toolkit.attached_menus[0].entries().len(), 3);
    }

    #[test]
    fn second_launch_keeps_single_icon() {
        let mut app = app(LaunchOptions::default());
        app.on_launch();
        app.on_launch();
        assert_eq!(app.toolkit().status_items.len(), 1);
        assert_eq!(app.toolkit().attached_menus.len(), 1);
    }

    #[test]
    fn missing_status_item_is_not_fatal() {
        let mut toolkit = FakeToolkit::default();
        toolkit.refuse_status_item = true;
        let mut app = AppState::new(toolkit, MemoryStore::default(), LaunchOptions::default());
        app.on_launch();
        assert!(!app.has_status_item());

        app.handle(UiEvent::Menu(MenuCommand::Settings));
        assert_eq!(app.panel_state(), PanelState::Visible);
    }

    #[test]
    fn open_settings_option_shows_panel_on_launch() {
        let mut app = app(LaunchOptions { open_settings: true });
        app.handle(UiEvent::Launched);
        assert_eq!(app.panel_state(), PanelState::Visible);
        assert_eq!(app.toolkit().panels.len(), 1);
    }

    #[test]
    fn full_session() {
        let mut app = app(LaunchOptions::default());
        app.handle(UiEvent::Launched);
        assert!(app.has_status_item());
        assert_eq!(app.panel_state(), PanelState::Uninitialized);

        let menu = &app.toolkit().attached_menus[0];
        assert!(matches!(menu.entries()[1], MenuEntry::Separator));

        app.handle(UiEvent::Menu(MenuCommand::Settings));
        assert_eq!(app.panel_state(), PanelState::Visible);
        let panel = &app.toolkit().panels[0];
        assert!(panel.spec.centered);
        assert_eq!(panel.spec.size, Size::new(300.0, 200.0));

        app.handle(UiEvent::ToggleLaunchAtLogin(true));
        app.handle(UiEvent::SelectTab(SettingsTab::About));
        let content = app.toolkit().panels[0].content.clone().unwrap();
        assert_eq!(
            content.pane,
            Pane::About {
                product_name: "MenuBar App Template".to_string(),
                version: "Version 1.0".to_string(),
            }
        );

        app.handle(UiEvent::PanelClosed);
        assert_eq!(app.panel_state(), PanelState::Hidden);
        app.handle(UiEvent::Menu(MenuCommand::Settings));
        assert_eq!(app.panel_state(), PanelState::Visible);
        assert_eq!(app.toolkit().panels.len(), 1);

        app.handle(UiEvent::Menu(MenuCommand::Quit));
        assert!(app.toolkit().terminated);
    }
}
