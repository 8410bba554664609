use std::sync::atomic::{AtomicU8, Ordering};

// Debug verbosity level: 0 = none, 1 = -v, 2 = -vv, 3 = -vvv
static VERBOSITY: AtomicU8 = AtomicU8::new(0);

pub fn verbosity() -> u8 {
    VERBOSITY.load(Ordering::Relaxed)
}

// "src/ui/status_bar.rs" -> "ui/status_bar.rs"
fn shorten_file_path(file_path: &str) -> String {
    if let Some(stripped) = file_path.strip_prefix("src/") {
        stripped.to_string()
    } else if let Some(pos) = file_path.rfind("src/") {
        file_path[pos + 4..].to_string()
    } else {
        file_path.to_string()
    }
}

// Structured entry with a JSON payload, emitted through tracing.
// min_verbosity: minimum verbosity level required (1, 2, or 3)
pub fn write_structured_log_with_verbosity(
    location: &str,
    message: &str,
    data: &serde_json::Value,
    min_verbosity: u8,
) {
    if verbosity() < min_verbosity {
        return;
    }

    let is_empty = data.as_object().map(|o| o.is_empty()).unwrap_or(false);
    match min_verbosity {
        0 | 1 => {
            if is_empty {
                tracing::info!(location, "{}", message);
            } else {
                tracing::info!(location, data = %data, "{}", message);
            }
        }
        2 => {
            if is_empty {
                tracing::debug!(location, "{}", message);
            } else {
                tracing::debug!(location, data = %data, "{}", message);
            }
        }
        _ => {
            if is_empty {
                tracing::trace!(location, "{}", message);
            } else {
                tracing::trace!(location, data = %data, "{}", message);
            }
        }
    }
}

// Defaults to verbosity >= 2
#[cfg(target_os = "macos")]
pub fn write_structured_log(location: &str, message: &str, data: &serde_json::Value) {
    write_structured_log_with_verbosity(location, message, data, 2);
}

// Used by the debug macros to turn file!() into a short location
pub fn shorten_file_path_internal(file_path: &str) -> String {
    shorten_file_path(file_path)
}

#[macro_export]
macro_rules! debug {
    ($level:expr, $($arg:tt)*) => {
        {
            if $crate::logging::verbosity() >= $level {
                let message = format!($($arg)*);
                let location = $crate::logging::shorten_file_path_internal(file!());
                $crate::logging::write_structured_log_with_verbosity(&location, &message, &serde_json::json!({}), $level);
            }
        }
    };
}

#[macro_export]
macro_rules! debug1 {
    ($($arg:tt)*) => { $crate::debug!(1, $($arg)*); };
}

#[macro_export]
macro_rules! debug2 {
    ($($arg:tt)*) => { $crate::debug!(2, $($arg)*); };
}

#[macro_export]
macro_rules! debug3 {
    ($($arg:tt)*) => { $crate::debug!(3, $($arg)*); };
}

pub fn set_verbosity(level: u8) {
    VERBOSITY.store(level.min(3), Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_strips_src_prefix() {
        assert_eq!(shorten_file_path("src/ui/status_bar.rs"), "ui/status_bar.rs");
        assert_eq!(shorten_file_path("/build/crate/src/menu.rs"), "menu.rs");
        assert_eq!(shorten_file_path("build.rs"), "build.rs");
    }
}
