//! menubar-app Library
//!
//! A minimal macOS menu bar application: a status icon whose menu opens a
//! floating settings panel (launch-at-login toggle, About pane) or quits.
//!
//! ## Architecture
//!
//! - `logging`: Structured logging with tracing
//! - `config`: Paths, build info and product strings
//! - `preferences`: Launch-at-login store (`auto-launch`)
//! - `settings`: Settings view model (tabs, panes)
//! - `menu`: Menu model and settings panel lifecycle
//! - `toolkit`: Trait seam to the host UI toolkit, and the events it reports
//! - `state`: `AppState`, the single top-level application object
//! - `ffi`, `ui`: AppKit host (macOS only)
//!
//! ## Main Entry Point
//!
//! - `run()`: Start the menu bar app and block in the AppKit event loop

mod logging;
pub mod config;
pub mod preferences;
pub mod settings;
pub mod menu;
pub mod toolkit;
pub mod state;
#[cfg(target_os = "macos")]
mod ffi;
#[cfg(target_os = "macos")]
mod ui;

// Re-export logging functions (macros are auto-exported via #[macro_export])
pub use logging::{init_tracing, set_verbosity};
pub use state::LaunchOptions;

/// Run the menu bar app until the user quits.
#[cfg(target_os = "macos")]
pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    debug1!("Starting AppKit host (open settings: {})", options.open_settings);
    ui::run_app(options)
}

/// Run the menu bar app until the user quits.
#[cfg(not(target_os = "macos"))]
pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    debug1!("No menu bar host on this platform (open settings: {})", options.open_settings);
    anyhow::bail!("the menu bar host is only available on macOS")
}
