//! Environment helpers: centralized dotenv loading and ergonomic getters.
//! Call `init_env()` once early in each binary (or rely on lazy Once).
use std::sync::Once;
use tracing::info;

static INIT: Once = Once::new();

/// Default catalog location, relative to the working directory.
pub const DEFAULT_DB_URL: &str = "sqlite://db.sqlite";

/// Load .env exactly once. Safe to call many times.
pub fn init_env() {
    INIT.call_once(|| {
        if dotenv::dotenv().is_err() {
            // Fallback to the crate root when started from elsewhere.
            let candidate = format!("{}/.env", env!("CARGO_MANIFEST_DIR"));
            let _ = dotenv::from_filename(candidate);
        }
    });
}

/// Get optional env var (None if unset or empty).
pub fn env_opt(key: &str) -> Option<String> {
    init_env();
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

/// Boolean flag; accepts 1/true/on/yes and 0/false/off/no (case-insensitive).
pub fn env_flag(key: &str, default: bool) -> bool {
    env_opt(key)
        .and_then(|raw| parse_flag(&raw))
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Catalog database URL: `CATALOG_DB_URL`, then `DATABASE_URL`, then the
/// bundled default.
pub fn db_url() -> String {
    env_opt("CATALOG_DB_URL")
        .or_else(|| env_opt("DATABASE_URL"))
        .unwrap_or_else(|| DEFAULT_DB_URL.to_string())
}

fn redact_value(key: &str, val: &str) -> String {
    let k = key.to_ascii_uppercase();
    if k.contains("PASSWORD") || k.contains("SECRET") || k.contains("TOKEN") {
        return "***".to_string();
    }
    val.trim().to_string()
}

/// Log a consolidated, redacted snapshot of configuration.
pub fn preflight_check(title: &str, keys: &[&str]) {
    let snapshot: Vec<(String, String)> = keys
        .iter()
        .map(|&k| (k.to_string(), redact_value(k, &env_opt(k).unwrap_or_default())))
        .collect();
    info!(target = "preflight", title, snapshot = ?snapshot, "configuration snapshot");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flag_spellings() {
        for raw in ["1", "true", "ON", " yes "] {
            assert_eq!(parse_flag(raw), Some(true), "{raw:?}");
        }
        for raw in ["0", "False", "off", "no"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw:?}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn redacts_sensitive_keys_only() {
        assert_eq!(redact_value("API_SECRET", "hunter2"), "***");
        assert_eq!(redact_value("CATALOG_DB_URL", " sqlite://db.sqlite "), "sqlite://db.sqlite");
    }

    #[test]
    fn unset_keys_fall_back() {
        assert_eq!(env_opt("CATALOG_TEST_UNSET_PORT"), None);
        assert!(env_flag("CATALOG_TEST_UNSET_FLAG", true));
    }
}
