//! Checked wrappers for Objective-C runtime calls
//!
//! Class registration and selector checks go through here so a broken
//! action target is reported as an error instead of failing silently when
//! the user clicks.

use objc2::msg_send;
use objc2::runtime::{AnyClass, Sel};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjCError {
    #[error("Objective-C class already registered: {0}")]
    ClassAlreadyRegistered(String),

    #[error("Objective-C object does not respond to selector: {0}")]
    DoesNotRespondToSelector(String),

    #[error("AppKit must be driven from the main thread")]
    NotMainThread,
}

pub type ObjCResult<T> = Result<T, ObjCError>;

pub fn instances_respond_to_selector(class: &AnyClass, sel: Sel) -> bool {
    unsafe {
        let responds: bool = msg_send![class, instancesRespondToSelector: sel];
        responds
    }
}

/// Fail unless every selector in `sels` is implemented by `class`.
pub fn ensure_class_responds(class: &AnyClass, sels: &[Sel]) -> ObjCResult<()> {
    for &sel in sels {
        if !instances_respond_to_selector(class, sel) {
            return Err(ObjCError::DoesNotRespondToSelector(
                sel.name().to_string_lossy().to_string(),
            ));
        }
    }
    Ok(())
}
