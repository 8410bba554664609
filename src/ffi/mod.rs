//! Foreign Function Interface (FFI) safety module
//!
//! - `objc`: checked wrappers for Objective-C runtime calls used by the
//!   AppKit host in `ui`.

pub mod objc;
