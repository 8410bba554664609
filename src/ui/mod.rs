//! AppKit host
//!
//! This module implements the [`Toolkit`] seam on top of AppKit:
//! - Status bar item and dropdown menu (`status_bar`)
//! - Floating settings panel and its views (`settings_panel`)
//! - Objective-C action target that feeds `UiEvent`s back (`handler`)

pub mod handler;
pub mod settings_panel;
pub mod status_bar;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{msg_send, MainThreadMarker};
use objc2_app_kit::{
    NSApplication, NSApplicationActivationPolicy, NSMenu, NSPanel, NSStatusItem, NSSwitch,
};

use crate::config::Config;
use crate::ffi::objc::ObjCError;
use crate::menu::Menu;
use crate::preferences::AutoLaunchStore;
use crate::settings::SettingsContent;
use crate::state::{AppState, LaunchOptions};
use crate::toolkit::{PanelSpec, StatusIcon, Toolkit};

pub struct AppKitToolkit {
    mtm: MainThreadMarker,
    target: Retained<AnyObject>,
    menu: Retained<NSMenu>,
    /// Switch in the General pane as last rendered, if it is showing.
    launch_switch: Option<Retained<NSSwitch>>,
}

impl AppKitToolkit {
    pub fn new(mtm: MainThreadMarker, target: Retained<AnyObject>) -> Self {
        Self {
            mtm,
            target,
            menu: NSMenu::new(mtm),
            launch_switch: None,
        }
    }
}

impl Toolkit for AppKitToolkit {
    type StatusItem = Retained<NSStatusItem>;
    type Panel = Retained<NSPanel>;

    fn create_status_item(&mut self, icon: &StatusIcon) -> Option<Self::StatusItem> {
        status_bar::create_status_item(self.mtm, icon)
    }

    fn attach_menu(&mut self, item: &Self::StatusItem, menu: &Menu) {
        status_bar::populate_menu(self.mtm, &self.menu, menu, &self.target);
        status_bar::attach_menu(item, &self.menu);
    }

    #[allow(deprecated)]
    fn activate(&mut self) {
        NSApplication::sharedApplication(self.mtm).activateIgnoringOtherApps(true);
    }

    fn create_panel(&mut self, spec: &PanelSpec) -> Self::Panel {
        settings_panel::create_panel(self.mtm, spec, &self.target)
    }

    fn render_settings(&mut self, panel: &Self::Panel, content: &SettingsContent) {
        self.launch_switch = settings_panel::render(self.mtm, panel, content, &self.target);
    }

    fn update_launch_at_login(&mut self, _panel: &Self::Panel, enabled: bool) {
        match &self.launch_switch {
            Some(switch) => settings_panel::set_switch(switch, enabled),
            None => tracing::debug!("No launch-at-login switch on screen"),
        }
    }

    fn show_panel(&mut self, panel: &Self::Panel) {
        panel.makeKeyAndOrderFront(None);
        panel.orderFrontRegardless();
    }

    fn terminate(&mut self) {
        NSApplication::sharedApplication(self.mtm).terminate(None);
    }
}

/// Set up AppKit, hand it the app state and run the event loop.
pub fn run_app(options: LaunchOptions) -> anyhow::Result<()> {
    let mtm = MainThreadMarker::new().ok_or(ObjCError::NotMainThread)?;
    let app = NSApplication::sharedApplication(mtm);
    // Menu bar only: no Dock icon, no main menu.
    app.setActivationPolicy(NSApplicationActivationPolicy::Accessory);

    let target = handler::new_action_target().context("registering action target")?;
    let store = AutoLaunchStore::new(&Config::login_item_name()).context("configuring login item")?;
    let toolkit = AppKitToolkit::new(mtm, target.clone());
    let state = Rc::new(RefCell::new(AppState::new(toolkit, store, options)));

    let dispatch_state = Rc::clone(&state);
    handler::install_dispatcher(move |event| match dispatch_state.try_borrow_mut() {
        Ok(mut state) => state.handle(event),
        Err(_) => tracing::warn!("Dropping {:?}, another event is still being handled", event),
    });

    // NSApplication holds its delegate weakly; `target` is kept by the toolkit.
    unsafe {
        let _: () = msg_send![&*app, setDelegate: &*target];
    }

    tracing::info!(
        version = %Config::version(),
        build = %Config::build_date(),
        "Starting {}",
        Config::product_name()
    );
    app.run();
    Ok(())
}
