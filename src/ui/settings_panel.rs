//! Settings panel window and its content views.
//!
//! Content is rebuilt from a [`SettingsContent`] on every render and swapped
//! in as the panel's content view. Coordinates are AppKit's: origin at the
//! bottom-left of the 300x200 content area.

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{msg_send, MainThreadMarker, MainThreadOnly};
use objc2_app_kit::{
    NSBackingStoreType, NSBox, NSBoxType, NSButton, NSCellImagePosition, NSColor,
    NSControlStateValueOff, NSControlStateValueOn, NSFloatingWindowLevel, NSFont,
    NSFontWeightBold, NSFontWeightMedium, NSPanel, NSSwitch, NSTextField, NSView,
    NSWindowStyleMask,
};
use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use super::handler::{launch_toggled_sel, tab_selected_sel};
use super::status_bar::symbol_image;
use crate::settings::{Pane, SettingsContent, TabButton, TabTint, LAUNCH_LABEL_WIDTH};
use crate::toolkit::PanelSpec;

const TAB_WIDTH: f64 = 72.0;
const TAB_HEIGHT: f64 = 46.0;
const TAB_TOP_MARGIN: f64 = 10.0;
const CONTENT_INSET: f64 = 36.0;

fn rect(x: f64, y: f64, width: f64, height: f64) -> NSRect {
    NSRect::new(NSPoint::new(x, y), NSSize::new(width, height))
}

/// Create the panel described by `spec`, delegating close events to
/// `delegate`. The panel survives being closed.
pub fn create_panel(mtm: MainThreadMarker, spec: &PanelSpec, delegate: &AnyObject) -> Retained<NSPanel> {
    let mut style = NSWindowStyleMask::Titled;
    if spec.closable {
        style = style | NSWindowStyleMask::Closable;
    }
    if spec.resizable {
        style = style | NSWindowStyleMask::Resizable;
    }

    let frame = rect(0.0, 0.0, spec.size.width, spec.size.height);
    let panel = unsafe {
        NSPanel::initWithContentRect_styleMask_backing_defer(
            NSPanel::alloc(mtm),
            frame,
            style,
            NSBackingStoreType::Buffered,
            false,
        )
    };

    unsafe {
        panel.setReleasedWhenClosed(false);
        panel.setTitle(&NSString::from_str(spec.title));
        if spec.centered {
            panel.center();
        }
        panel.setFrameAutosaveName(&NSString::from_str(spec.autosave_name));
        if spec.floating {
            panel.setFloatingPanel(true);
            panel.setLevel(NSFloatingWindowLevel);
        }
        let _: () = msg_send![&*panel, setDelegate: delegate];
    }

    crate::logging::write_structured_log(
        "ui/settings_panel.rs",
        "Settings panel created",
        &serde_json::json!({ "spec": spec }),
    );
    panel
}

/// Swap the panel content for a fresh rendering of `content`. Returns the
/// launch-at-login switch when the General pane is showing.
pub fn render(
    mtm: MainThreadMarker,
    panel: &NSPanel,
    content: &SettingsContent,
    target: &AnyObject,
) -> Option<Retained<NSSwitch>> {
    let size = panel.contentLayoutRect().size;
    let root = unsafe { NSView::initWithFrame(NSView::alloc(mtm), rect(0.0, 0.0, size.width, size.height)) };

    let strip_width = TAB_WIDTH * content.tabs.len() as f64;
    let strip_x = ((size.width - strip_width) / 2.0).max(0.0);
    let strip_y = size.height - TAB_TOP_MARGIN - TAB_HEIGHT;
    for (i, tab) in content.tabs.iter().enumerate() {
        let frame = rect(strip_x + TAB_WIDTH * i as f64, strip_y, TAB_WIDTH, TAB_HEIGHT);
        root.addSubview(&tab_button(mtm, tab, frame, target));
    }

    let divider_y = strip_y - 8.0;
    let divider = unsafe { NSBox::initWithFrame(NSBox::alloc(mtm), rect(20.0, divider_y, size.width - 40.0, 1.0)) };
    unsafe {
        divider.setBoxType(NSBoxType::Separator);
    }
    root.addSubview(&divider);

    let pane_top = divider_y - 16.0;
    let switch = match &content.pane {
        Pane::General { launch_at_login } => {
            Some(general_pane(mtm, &root, pane_top, *launch_at_login, target))
        }
        Pane::About { product_name, version } => {
            about_pane(mtm, &root, pane_top, product_name, version);
            None
        }
    };

    panel.setContentView(Some(&root));
    crate::debug3!("Settings panel rendered: {:?}", content.selected_tab());
    switch
}

pub fn set_switch(switch: &NSSwitch, on: bool) {
    unsafe {
        switch.setState(if on { NSControlStateValueOn } else { NSControlStateValueOff });
    }
}

fn tab_button(mtm: MainThreadMarker, tab: &TabButton, frame: NSRect, target: &AnyObject) -> Retained<NSButton> {
    let button = unsafe { NSButton::initWithFrame(NSButton::alloc(mtm), frame) };
    let tint = match tab.tint {
        TabTint::Accent => NSColor::controlAccentColor(),
        TabTint::Neutral => NSColor::systemGrayColor(),
    };

    unsafe {
        button.setTitle(&NSString::from_str(tab.label));
        if let Some(image) = symbol_image(tab.symbol, None, true) {
            button.setImage(Some(&image));
        }
        button.setImagePosition(NSCellImagePosition::ImageAbove);
        button.setBordered(false);
        button.setFont(Some(&NSFont::systemFontOfSize_weight(12.0, NSFontWeightMedium)));
        button.setContentTintColor(Some(&tint));
        button.setTag(tab.tab.tag());
        button.setTarget(Some(target));
        button.setAction(Some(tab_selected_sel()));
    }
    button
}

fn label(mtm: MainThreadMarker, text: &str, frame: NSRect, font: &NSFont) -> Retained<NSTextField> {
    let field = NSTextField::labelWithString(&NSString::from_str(text), mtm);
    field.setFrame(frame);
    field.setFont(Some(font));
    field
}

fn general_pane(
    mtm: MainThreadMarker,
    root: &NSView,
    top: f64,
    launch_at_login: bool,
    target: &AnyObject,
) -> Retained<NSSwitch> {
    let row_y = top - 24.0;
    let caption = label(
        mtm,
        "Launch at login",
        rect(CONTENT_INSET, row_y + 2.0, LAUNCH_LABEL_WIDTH, 20.0),
        &NSFont::systemFontOfSize(14.0),
    );
    root.addSubview(&caption);

    let switch = unsafe {
        NSSwitch::initWithFrame(
            NSSwitch::alloc(mtm),
            rect(CONTENT_INSET + LAUNCH_LABEL_WIDTH + 8.0, row_y, 42.0, 24.0),
        )
    };
    set_switch(&switch, launch_at_login);
    unsafe {
        switch.setTarget(Some(target));
        switch.setAction(Some(launch_toggled_sel()));
    }
    root.addSubview(&switch);
    switch
}

fn about_pane(mtm: MainThreadMarker, root: &NSView, top: f64, product_name: &str, version: &str) {
    let name = label(
        mtm,
        product_name,
        rect(CONTENT_INSET, top - 22.0, 240.0, 22.0),
        &unsafe { NSFont::systemFontOfSize_weight(16.0, NSFontWeightBold) },
    );
    root.addSubview(&name);

    let version_label = label(
        mtm,
        version,
        rect(CONTENT_INSET, top - 46.0, 240.0, 18.0),
        &NSFont::systemFontOfSize(12.0),
    );
    version_label.setTextColor(Some(&NSColor::secondaryLabelColor()));
    root.addSubview(&version_label);
}
