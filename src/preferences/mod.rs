//! Launch-at-login preference
//!
//! The app never registers login items itself. It talks to a
//! [`LoginItemStore`], whose production implementation wraps the
//! `auto-launch` crate (a LaunchAgent on macOS, an autostart entry elsewhere).

use auto_launch::{AutoLaunch, AutoLaunchBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("cannot resolve the current executable: {0}")]
    ExecutablePath(#[source] std::io::Error),

    #[error("executable path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("cannot configure login item: {0}")]
    Builder(#[source] auto_launch::Error),

    #[error("cannot read login item state: {0}")]
    Read(#[source] auto_launch::Error),

    #[error("cannot update login item: {0}")]
    Write(#[source] auto_launch::Error),
}

pub type PreferenceResult<T> = Result<T, PreferenceError>;

/// Boolean get/set contract of the login-item service.
pub trait LoginItemStore {
    fn is_enabled(&self) -> PreferenceResult<bool>;
    fn set_enabled(&self, enabled: bool) -> PreferenceResult<()>;
}

/// Login item backed by `auto-launch`, pointing at the running executable.
pub struct AutoLaunchStore {
    inner: AutoLaunch,
}

impl AutoLaunchStore {
    pub fn new(app_name: &str) -> PreferenceResult<Self> {
        let exe = std::env::current_exe().map_err(PreferenceError::ExecutablePath)?;
        let app_path = exe
            .to_str()
            .ok_or_else(|| PreferenceError::NonUtf8Path(exe.display().to_string()))?;

        let inner = AutoLaunchBuilder::new()
            .set_app_name(app_name)
            .set_app_path(app_path)
            .set_use_launch_agent(true)
            .build()
            .map_err(PreferenceError::Builder)?;

        tracing::debug!(app_name, app_path, "Login item store configured");
        Ok(Self { inner })
    }
}

impl LoginItemStore for AutoLaunchStore {
    fn is_enabled(&self) -> PreferenceResult<bool> {
        self.inner.is_enabled().map_err(PreferenceError::Read)
    }

    fn set_enabled(&self, enabled: bool) -> PreferenceResult<()> {
        if enabled {
            self.inner.enable().map_err(PreferenceError::Write)
        } else {
            self.inner.disable().map_err(PreferenceError::Write)
        }
    }
}
