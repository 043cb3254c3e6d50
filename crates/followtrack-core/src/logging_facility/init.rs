//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Map a `pretty` / `json` format name onto a profile.
    ///
    /// Unknown names fall back to `Development`.
    pub fn from_format(format: &str) -> Self {
        match format.trim().to_lowercase().as_str() {
            "json" | "production" => Profile::Production,
            _ => Profile::Development,
        }
    }

    fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "followtrack=debug",
            Profile::Production | Profile::Test => "followtrack=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored. `RUST_LOG` overrides the
/// profile's default filter.
///
/// ```
/// use followtrack_core::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    init_with_default_filter(profile, profile.default_filter());
}

/// Like [`init`], with a caller-chosen filter used when `RUST_LOG` is unset.
///
/// Output goes to stderr so command output on stdout stays clean.
pub fn init_with_default_filter(profile: Profile, default_filter: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            Profile::Test => {
                // Test capture installs its own layer via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_format() {
        assert_eq!(Profile::from_format("json"), Profile::Production);
        assert_eq!(Profile::from_format("JSON "), Profile::Production);
        assert_eq!(Profile::from_format("pretty"), Profile::Development);
        assert_eq!(Profile::from_format("whatever"), Profile::Development);
    }

    #[test]
    fn test_default_filters() {
        assert_eq!(Profile::Development.default_filter(), "followtrack=debug");
        assert_eq!(Profile::Production.default_filter(), "followtrack=info");
    }
}
