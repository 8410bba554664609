//! Status bar menu and settings panel lifecycle.
//!
//! The menu is rebuilt from scratch on every [`MenuController::build_menu`]
//! call. The settings panel is created on first use and then only shown or
//! hidden; there is never more than one.

use std::rc::Rc;

use serde::Serialize;

use crate::preferences::LoginItemStore;
use crate::settings::{SettingsTab, SettingsView};
use crate::toolkit::{PanelSpec, Toolkit};

/// Commands reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuCommand {
    Settings,
    Quit,
}

impl MenuCommand {
    /// Menu item tag used by the host to report selections.
    pub fn tag(self) -> isize {
        match self {
            MenuCommand::Settings => 1,
            MenuCommand::Quit => 2,
        }
    }

    pub fn from_tag(tag: isize) -> Option<Self> {
        [MenuCommand::Settings, MenuCommand::Quit]
            .into_iter()
            .find(|command| command.tag() == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MenuEntry {
    Item {
        title: &'static str,
        key_equivalent: &'static str,
        command: MenuCommand,
    },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn push(&mut self, entry: MenuEntry) {
        self.entries.push(entry);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelState {
    Uninitialized,
    Hidden,
    Visible,
}

struct SettingsPanel<H, P> {
    handle: H,
    view: SettingsView<P>,
    visible: bool,
}

pub struct MenuController<T: Toolkit, P> {
    menu: Menu,
    panel: Option<SettingsPanel<T::Panel, P>>,
    preferences: Rc<P>,
}

impl<T: Toolkit, P: LoginItemStore> MenuController<T, P> {
    pub fn new(preferences: Rc<P>) -> Self {
        Self {
            menu: Menu::default(),
            panel: None,
            preferences,
        }
    }

    /// Clear and rebuild: Settings, separator, Quit Application.
    pub fn build_menu(&mut self) -> &Menu {
        self.menu.clear();
        self.menu.push(MenuEntry::Item {
            title: "Settings",
            key_equivalent: "s",
            command: MenuCommand::Settings,
        });
        self.menu.push(MenuEntry::Separator);
        self.menu.push(MenuEntry::Item {
            title: "Quit Application",
            key_equivalent: "q",
            command: MenuCommand::Quit,
        });
        crate::debug3!("Menu rebuilt with {} entries", self.menu.entries().len());
        &self.menu
    }

    pub fn panel_state(&self) -> PanelState {
        match &self.panel {
            None => PanelState::Uninitialized,
            Some(panel) if panel.visible => PanelState::Visible,
            Some(_) => PanelState::Hidden,
        }
    }

    pub fn selected_tab(&self) -> Option<SettingsTab> {
        self.panel.as_ref().map(|panel| panel.view.selected_tab())
    }

    pub fn on_select_settings(&mut self, toolkit: &mut T) {
        toolkit.activate();

        let preferences = &self.preferences;
        let panel = self.panel.get_or_insert_with(|| {
            crate::debug1!("Creating settings panel");
            let handle = toolkit.create_panel(&PanelSpec::settings());
            SettingsPanel {
                handle,
                view: SettingsView::new(Rc::clone(preferences)),
                visible: false,
            }
        });

        toolkit.render_settings(&panel.handle, &panel.view.render());
        toolkit.show_panel(&panel.handle);
        panel.visible = true;
        crate::debug2!("Settings panel visible");
    }

    pub fn on_select_quit(&mut self, toolkit: &mut T) {
        tracing::info!("Quit requested from menu");
        toolkit.terminate();
    }

    pub fn on_panel_closed(&mut self) {
        match self.panel.as_mut() {
            Some(panel) => {
                panel.visible = false;
                crate::debug2!("Settings panel hidden");
            }
            None => tracing::debug!("Close reported with no settings panel"),
        }
    }

    pub fn on_select_tab(&mut self, toolkit: &mut T, tab: SettingsTab) {
        if let Some(panel) = self.panel.as_mut() {
            panel.view.select_tab(tab);
            toolkit.render_settings(&panel.handle, &panel.view.render());
        }
    }

    /// Write the new value, then move the existing switch to whatever the
    /// store now reports. The switch that sent the event stays in place.
    pub fn on_toggle_launch_at_login(&mut self, toolkit: &mut T, enabled: bool) {
        if let Some(panel) = self.panel.as_mut() {
            panel.view.set_launch_at_login(enabled);
            if panel.view.selected_tab() == SettingsTab::General {
                toolkit.update_launch_at_login(&panel.handle, panel.view.launch_at_login());
            } else {
                toolkit.render_settings(&panel.handle, &panel.view.render());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::testing::MemoryStore;
    use crate::settings::Pane;
    use crate::toolkit::testing::FakeToolkit;

    fn controller() -> (MenuController<FakeToolkit, MemoryStore>, Rc<MemoryStore>) {
        let store = Rc::new(MemoryStore::default());
        (MenuController::new(Rc::clone(&store)), store)
    }

    fn titles(menu: &Menu) -> Vec<Option<&'static str>> {
        menu.entries()
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item { title, .. } => Some(*title),
                MenuEntry::Separator => None,
            })
            .collect()
    }

    #[test]
    fn menu_is_settings_separator_quit() {
        let (mut menu, _) = controller();
        let built = menu.build_menu();
        assert_eq!(
            titles(built),
            vec![Some("Settings"), None, Some("Quit Application")]
        );
        assert_eq!(
            built.entries()[0],
            MenuEntry::Item {
                title: "Settings",
                key_equivalent: "s",
                command: MenuCommand::Settings,
            }
        );
        assert_eq!(
            built.entries()[2],
            MenuEntry::Item {
                title: "Quit Application",
                key_equivalent: "q",
                command: MenuCommand::Quit,
            }
        );
    }

    #[test]
    fn rebuilding_does_not_accumulate() {
        let (mut menu, _) = controller();
        let first = menu.build_menu().clone();
        for _ in 0..5 {
            assert_eq!(menu.build_menu(), &first);
        }
        assert_eq!(menu.build_menu().entries().len(), 3);
    }

    #[test]
    fn tags_resolve_to_commands() {
        let (mut menu, _) = controller();
        for entry in menu.build_menu().entries() {
            if let MenuEntry::Item { command, .. } = entry {
                assert_eq!(MenuCommand::from_tag(command.tag()), Some(*command));
            }
        }
        assert_eq!(MenuCommand::from_tag(0), None);
        assert_eq!(MenuCommand::from_tag(42), None);
    }

    #[test]
    fn settings_creates_one_panel() {
        let (mut menu, _) = controller();
        let mut toolkit = FakeToolkit::default();
        assert_eq!(menu.panel_state(), PanelState::Uninitialized);

        for n in 1..=4 {
            menu.on_select_settings(&mut toolkit);
            assert_eq!(menu.panel_state(), PanelState::Visible);
            assert_eq!(toolkit.panels.len(), 1);
            assert_eq!(toolkit.panels[0].shown, n);
            assert_eq!(toolkit.activations, n);
        }
        assert_eq!(toolkit.panels[0].spec, PanelSpec::settings());
    }

    #[test]
    fn close_hides_and_settings_reshows() {
        let (mut menu, _) = controller();
        let mut toolkit = FakeToolkit::default();

        menu.on_panel_closed();
        assert_eq!(menu.panel_state(), PanelState::Uninitialized);

        menu.on_select_settings(&mut toolkit);
        menu.on_panel_closed();
        assert_eq!(menu.panel_state(), PanelState::Hidden);

        menu.on_select_settings(&mut toolkit);
        assert_eq!(menu.panel_state(), PanelState::Visible);
        assert_eq!(toolkit.panels.len(), 1);
    }

    #[test]
    fn tab_selection_survives_hide() {
        let (mut menu, _) = controller();
        let mut toolkit = FakeToolkit::default();
        menu.on_select_settings(&mut toolkit);
        menu.on_select_tab(&mut toolkit, SettingsTab::About);
        menu.on_panel_closed();
        menu.on_select_settings(&mut toolkit);
        assert_eq!(menu.selected_tab(), Some(SettingsTab::About));
        let content = toolkit.panels[0].content.clone().unwrap();
        assert_eq!(content.selected_tab(), Some(SettingsTab::About));
    }

    #[test]
    fn toggle_updates_switch_in_place() {
        let (mut menu, store) = controller();
        let mut toolkit = FakeToolkit::default();
        menu.on_select_settings(&mut toolkit);
        let renders = toolkit.panels[0].renders;

        menu.on_toggle_launch_at_login(&mut toolkit, true);
        assert_eq!(store.writes(), vec![true]);
        assert_eq!(toolkit.panels[0].renders, renders);
        assert_eq!(toolkit.panels[0].switch_updates, vec![true]);
        assert_eq!(
            toolkit.panels[0].content.as_ref().map(|c| c.pane.clone()),
            Some(Pane::General { launch_at_login: true })
        );
    }

    #[test]
    fn rejected_toggle_moves_switch_back() {
        let (mut menu, store) = controller();
        let mut toolkit = FakeToolkit::default();
        menu.on_select_settings(&mut toolkit);
        store.fail_writes(true);

        menu.on_toggle_launch_at_login(&mut toolkit, true);
        assert_eq!(store.writes(), vec![true]);
        assert_eq!(toolkit.panels[0].switch_updates, vec![false]);
        assert_eq!(
            toolkit.panels[0].content.as_ref().map(|c| c.pane.clone()),
            Some(Pane::General { launch_at_login: false })
        );
    }

    #[test]
    fn panel_events_without_panel_are_ignored() {
        let (mut menu, store) = controller();
        let mut toolkit = FakeToolkit::default();
        menu.on_select_tab(&mut toolkit, SettingsTab::About);
        menu.on_toggle_launch_at_login(&mut toolkit, true);
        assert!(store.writes().is_empty());
        assert!(toolkit.panels.is_empty());
        assert_eq!(menu.selected_tab(), None);
    }

    #[test]
    fn quit_terminates() {
        let (mut menu, _) = controller();
        let mut toolkit = FakeToolkit::default();
        menu.on_select_quit(&mut toolkit);
        assert!(toolkit.terminated);
    }
}
