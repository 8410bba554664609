//! Objective-C action target
//!
//! One class, one instance. It is the target of every menu item and
//! settings control, the application delegate and the panel delegate. Each
//! method turns the Cocoa callback into a [`UiEvent`] and hands it to the
//! dispatcher installed by the runner.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use objc2::rc::Retained;
use objc2::runtime::{AnyClass, AnyObject, ClassBuilder, NSObject, Sel};
use objc2::{msg_send, sel, ClassType};
use objc2_app_kit::NSControlStateValueOn;

use crate::ffi::objc::{ensure_class_responds, ObjCError, ObjCResult};
use crate::menu::MenuCommand;
use crate::settings::SettingsTab;
use crate::toolkit::UiEvent;

type Dispatcher = Rc<dyn Fn(UiEvent)>;

// AppKit callbacks arrive on the main thread only.
thread_local! {
    static DISPATCHER: RefCell<Option<Dispatcher>> = RefCell::new(None);
}

pub fn menu_command_sel() -> Sel {
    sel!(onMenuCommand:)
}

pub fn tab_selected_sel() -> Sel {
    sel!(onTabSelected:)
}

pub fn launch_toggled_sel() -> Sel {
    sel!(onLaunchAtLoginToggled:)
}

/// Route every event from the action target to `dispatcher`.
pub fn install_dispatcher(dispatcher: impl Fn(UiEvent) + 'static) {
    DISPATCHER.with(|cell| {
        *cell.borrow_mut() = Some(Rc::new(dispatcher));
    });
}

fn dispatch(event: UiEvent) {
    // Clone out so the dispatcher runs without the cell borrowed.
    let dispatcher = DISPATCHER.with(|cell| cell.borrow().clone());
    match dispatcher {
        Some(dispatcher) => dispatcher(event),
        None => tracing::warn!("No dispatcher installed, dropping {:?}", event),
    }
}

fn sender_tag(sender: *mut AnyObject) -> Option<isize> {
    if sender.is_null() {
        return None;
    }
    let tag: isize = unsafe { msg_send![sender, tag] };
    Some(tag)
}

extern "C-unwind" fn on_menu_command(_this: &AnyObject, _cmd: Sel, sender: *mut AnyObject) {
    match sender_tag(sender).and_then(MenuCommand::from_tag) {
        Some(command) => dispatch(UiEvent::Menu(command)),
        None => tracing::warn!("Menu action from unknown item"),
    }
}

extern "C-unwind" fn on_tab_selected(_this: &AnyObject, _cmd: Sel, sender: *mut AnyObject) {
    match sender_tag(sender).and_then(SettingsTab::from_tag) {
        Some(tab) => dispatch(UiEvent::SelectTab(tab)),
        None => tracing::warn!("Tab action from unknown control"),
    }
}

extern "C-unwind" fn on_launch_toggled(_this: &AnyObject, _cmd: Sel, sender: *mut AnyObject) {
    if sender.is_null() {
        return;
    }
    let state: isize = unsafe { msg_send![sender, state] };
    dispatch(UiEvent::ToggleLaunchAtLogin(state == NSControlStateValueOn));
}

extern "C-unwind" fn did_finish_launching(_this: &AnyObject, _cmd: Sel, _notification: *mut AnyObject) {
    dispatch(UiEvent::Launched);
}

extern "C-unwind" fn window_will_close(_this: &AnyObject, _cmd: Sel, _notification: *mut AnyObject) {
    dispatch(UiEvent::PanelClosed);
}

/// Get or register the action target class
fn action_target_class() -> ObjCResult<&'static AnyClass> {
    static REGISTER: OnceLock<Option<&'static AnyClass>> = OnceLock::new();
    let class = REGISTER.get_or_init(|| {
        let mut builder = ClassBuilder::new(c"MenuBarAppActionTarget", NSObject::class())?;
        unsafe {
            builder.add_method(
                menu_command_sel(),
                on_menu_command as extern "C-unwind" fn(_, _, _),
            );
            builder.add_method(
                tab_selected_sel(),
                on_tab_selected as extern "C-unwind" fn(_, _, _),
            );
            builder.add_method(
                launch_toggled_sel(),
                on_launch_toggled as extern "C-unwind" fn(_, _, _),
            );
            builder.add_method(
                sel!(applicationDidFinishLaunching:),
                did_finish_launching as extern "C-unwind" fn(_, _, _),
            );
            builder.add_method(
                sel!(windowWillClose:),
                window_will_close as extern "C-unwind" fn(_, _, _),
            );
        }
        let registered = builder.register();
        crate::debug2!("Objective-C class registered: {:?}", registered);
        Some(registered)
    });

    let class = (*class).ok_or_else(|| ObjCError::ClassAlreadyRegistered("MenuBarAppActionTarget".into()))?;
    ensure_class_responds(
        class,
        &[
            menu_command_sel(),
            tab_selected_sel(),
            launch_toggled_sel(),
            sel!(applicationDidFinishLaunching:),
            sel!(windowWillClose:),
        ],
    )?;
    Ok(class)
}

/// Create the action target instance.
pub fn new_action_target() -> ObjCResult<Retained<AnyObject>> {
    let class = action_target_class()?;
    let target: Option<Retained<AnyObject>> = unsafe { msg_send![class, new] };
    target.ok_or_else(|| ObjCError::DoesNotRespondToSelector("new".into()))
}
