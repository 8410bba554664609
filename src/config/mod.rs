//! Configuration module for portable paths and build information
//!
//! Provides centralized configuration including:
//! - Log file paths under `$HOME/.menubar-app/`
//! - Build information (date, version)
//! - Product strings shown in the About pane and used for the login item
//!
//! The app owns no config file and reads no environment variables of its own.

use std::path::PathBuf;

/// Name of the per-user directory holding the log file.
const APP_DIR_NAME: &str = ".menubar-app";

/// Configuration manager
pub struct Config;

impl Config {
    /// Product name shown in the About pane
    pub const PRODUCT_NAME: &'static str = "MenuBar App Template";

    /// Name registered with the login-item service
    pub const LOGIN_ITEM_NAME: &'static str = "MenuBarApp";

    /// Get the per-user app directory
    ///
    /// Returns `$HOME/.menubar-app`, falling back to a temporary directory
    /// if HOME is not available.
    pub fn app_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(APP_DIR_NAME);
        }
        std::env::temp_dir().join("menubar-app")
    }

    /// Get the log file path
    ///
    /// Returns `$HOME/.menubar-app/debug.log` (temp-dir fallback).
    pub fn log_file_path() -> PathBuf {
        Self::app_dir().join("debug.log")
    }

    /// Ensure the log directory exists
    pub fn ensure_log_directory() -> std::io::Result<()> {
        let log_path = Self::log_file_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Build date stamped by `build.rs`, or "unknown".
    pub fn build_date() -> String {
        option_env!("BUILD_DATE").unwrap_or("unknown").to_string()
    }

    /// Full package version from CARGO_PKG_VERSION.
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Short "major.minor" version used in the About pane.
    pub fn display_version() -> String {
        format!(
            "{}.{}",
            env!("CARGO_PKG_VERSION_MAJOR"),
            env!("CARGO_PKG_VERSION_MINOR")
        )
    }

    pub fn product_name() -> String {
        Self::PRODUCT_NAME.to_string()
    }

    pub fn login_item_name() -> String {
        Self::LOGIN_ITEM_NAME.to_string()
    }
}
