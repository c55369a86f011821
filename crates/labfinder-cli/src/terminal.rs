//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the text output
//! format. JSON output never uses these.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for lab names.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary details (location, contact).
    pub const GRAY: &str = "\x1b[90m";
    /// Green for active certificates.
    pub const GREEN: &str = "\x1b[32m";
    /// Red for expired certificates.
    pub const RED: &str = "\x1b[31m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            green: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects the `NO_COLOR` environment variable (https://no-color.org/)
/// and the `TERM=dumb` convention.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette_colored() {
        let p = ColorPalette::colored();
        assert!(!p.reset.is_empty());
        assert!(!p.green.is_empty());
        assert!(!p.red.is_empty());
    }

    #[test]
    fn test_color_palette_plain() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.white_bold.is_empty());
        assert!(p.gray.is_empty());
    }

    mod env_tests {
        use super::super::*;
        use std::env;
        use std::sync::Mutex;

        /// Environment variables are process-global; serialize tests that touch them.
        static ENV_MUTEX: Mutex<()> = Mutex::new(());

        fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
        where
            F: FnOnce() -> R,
        {
            let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

            let saved: Vec<_> = vars
                .iter()
                .map(|(key, _)| (*key, env::var(key).ok()))
                .collect();

            for (key, value) in vars {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            let result = f();

            for (key, value) in saved {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }

            result
        }

        #[test]
        fn test_no_color_disables_color() {
            with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", Some("xterm"))], || {
                assert!(!supports_color());
            });
        }

        #[test]
        fn test_dumb_terminal_disables_color() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("DUMB"))], || {
                assert!(!supports_color());
            });
        }

        #[test]
        fn test_color_enabled_by_default() {
            with_env_vars(&[("NO_COLOR", None), ("TERM", Some("xterm-256color"))], || {
                assert!(supports_color());
            });
        }
    }
}
