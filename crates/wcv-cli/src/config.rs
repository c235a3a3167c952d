//! CLI configuration from environment.

use std::env;

/// Default log directive when `WCV_LOG` is unset.
const DEFAULT_LOG: &str = "wcv_cli=info,wcv_detect=info";
/// Default lookahead time (s) when a scenario does not give one.
const DEFAULT_LOOKAHEAD_S: f64 = 180.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_directive: String,
    pub lookahead_s: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_directive: DEFAULT_LOG.to_string(),
            lookahead_s: DEFAULT_LOOKAHEAD_S,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_directive: env::var("WCV_LOG").unwrap_or_else(|_| DEFAULT_LOG.to_string()),
            lookahead_s: env::var("WCV_LOOKAHEAD_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|t: &f64| t.is_finite() && *t > 0.0)
                .unwrap_or(DEFAULT_LOOKAHEAD_S),
        }
    }
}
