//! Status bar item and its dropdown menu.

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{MainThreadMarker, MainThreadOnly};
use objc2_app_kit::{
    NSCellImagePosition, NSImage, NSImageScaling, NSMenu, NSMenuItem, NSStatusBar, NSStatusItem,
};
use objc2_foundation::{NSSize, NSString};

use super::handler::menu_command_sel;
use crate::menu::{Menu, MenuEntry};
use crate::toolkit::{Size, StatusIcon};

/// SF Symbol image at a fixed size; `None` if the symbol is unknown.
pub fn symbol_image(symbol: &str, size: Option<Size>, template: bool) -> Option<Retained<NSImage>> {
    let name = NSString::from_str(symbol);
    let image = NSImage::imageWithSystemSymbolName_accessibilityDescription(&name, None)?;
    unsafe {
        if let Some(size) = size {
            image.setSize(NSSize::new(size.width, size.height));
        }
        image.setTemplate(template);
    }
    Some(image)
}

/// Create the fixed-width status item showing `icon` only.
pub fn create_status_item(mtm: MainThreadMarker, icon: &StatusIcon) -> Option<Retained<NSStatusItem>> {
    let status_bar = NSStatusBar::systemStatusBar();
    let status_item = status_bar.statusItemWithLength(icon.size.width);

    let Some(button) = status_item.button(mtm) else {
        tracing::error!("Status item has no button");
        status_bar.removeStatusItem(&status_item);
        return None;
    };

    unsafe {
        button.setImagePosition(NSCellImagePosition::ImageOnly);
        button.setImageScaling(NSImageScaling::ScaleNone);
    }

    match symbol_image(icon.symbol, Some(icon.size), icon.template) {
        Some(image) => button.setImage(Some(&image)),
        // Item stays in the bar but shows nothing.
        None => tracing::warn!(symbol = icon.symbol, "Status icon symbol unavailable"),
    }

    crate::logging::write_structured_log(
        "ui/status_bar.rs",
        "Status item created",
        &serde_json::json!({ "icon": icon }),
    );
    Some(status_item)
}

/// Replace the items of `ns_menu` with `menu`, all targeting `target`.
pub fn populate_menu(mtm: MainThreadMarker, ns_menu: &NSMenu, menu: &Menu, target: &AnyObject) {
    ns_menu.removeAllItems();

    for entry in menu.entries() {
        match entry {
            MenuEntry::Item {
                title,
                key_equivalent,
                command,
            } => {
                let item = unsafe {
                    NSMenuItem::initWithTitle_action_keyEquivalent(
                        NSMenuItem::alloc(mtm),
                        &NSString::from_str(title),
                        Some(menu_command_sel()),
                        &NSString::from_str(key_equivalent),
                    )
                };
                unsafe {
                    item.setTarget(Some(target));
                }
                item.setTag(command.tag());
                ns_menu.addItem(&item);
            }
            MenuEntry::Separator => ns_menu.addItem(&NSMenuItem::separatorItem(mtm)),
        }
    }

    crate::debug3!("NSMenu populated with {} items", ns_menu.numberOfItems());
}

/// Attach `ns_menu` so clicking the icon opens it.
pub fn attach_menu(status_item: &NSStatusItem, ns_menu: &NSMenu) {
    status_item.setMenu(Some(ns_menu));
}
