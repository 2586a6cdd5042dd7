//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the logging profile
pub const PROFILE_ENV: &str = "TRANSIT_LOG_PROFILE";

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
    /// Read the profile from `TRANSIT_LOG_PROFILE`, defaulting to `Development`
    pub fn from_env() -> Self {
        match std::env::var(PROFILE_ENV).as_deref() {
            Ok("production") | Ok("prod") | Ok("json") => Profile::Production,
            Ok("test") => Profile::Test,
            _ => Profile::Development,
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup. `RUST_LOG` overrides the default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `transit=debug`
/// - **Production**: JSON structured logs, `transit=info`
/// - **Test**: Plain registry; use `init_test_capture()` to collect events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("transit=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("transit=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().try_init().ok();
        }
    });
}
