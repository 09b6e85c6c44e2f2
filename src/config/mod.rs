//! Configuration module for the resume backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Longest accepted session lifetime, 30 days.
pub const MAX_SESSION_TTL_MINUTES: u64 = 30 * 24 * 60;

/// Longest accepted ATS analyzer timeout.
pub const MAX_ATS_TIMEOUT_SECS: u64 = 600;

/// Default endpoint of the external ATS analyzer.
pub const DEFAULT_ATS_URL: &str = "http://localhost:5001/api/analyze-ats";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Endpoint of the external ATS analyzer
    pub ats_url: String,
    /// Upper bound on a single ATS analyzer call
    pub ats_timeout: Duration,
    /// Lifetime of a login session
    pub session_ttl: chrono::Duration,
    /// Optional skill catalog file; the bundled catalog is used when unset
    pub skills_path: Option<PathBuf>,
    /// Mark the session cookie `Secure` (requires HTTPS)
    pub cookie_secure: bool,
    /// Settings that were rejected and replaced by their defaults
    pub rejected: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("RESUME_DB_PATH")
            .unwrap_or_else(|_| "./data/resumes.sqlite".to_string())
            .into();

        let bind_addr = env::var("RESUME_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid RESUME_BIND_ADDR format");

        let log_level = env::var("RESUME_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        // ATS_ANALYZER_URL is the name the analyzer deployment already exports
        let ats_url = env::var("RESUME_ATS_URL")
            .or_else(|_| env::var("ATS_ANALYZER_URL"))
            .unwrap_or_else(|_| DEFAULT_ATS_URL.to_string());

        let mut rejected = Vec::new();

        let ats_timeout = Duration::from_secs(parse_bounded(
            "RESUME_ATS_TIMEOUT_SECS",
            env::var("RESUME_ATS_TIMEOUT_SECS").ok(),
            30,
            MAX_ATS_TIMEOUT_SECS,
            &mut rejected,
        ));

        let ttl_minutes = parse_bounded(
            "RESUME_SESSION_TTL_MINUTES",
            env::var("RESUME_SESSION_TTL_MINUTES").ok(),
            120,
            MAX_SESSION_TTL_MINUTES,
            &mut rejected,
        );
        // Bounded above, so the conversion cannot fail
        let session_ttl = chrono::Duration::minutes(i64::try_from(ttl_minutes).unwrap_or(120));

        let skills_path = env::var("RESUME_SKILLS_PATH").ok().map(PathBuf::from);

        let cookie_secure = env::var("RESUME_COOKIE_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            db_path,
            bind_addr,
            log_level,
            ats_url,
            ats_timeout,
            session_ttl,
            skills_path,
            cookie_secure,
            rejected,
        }
    }
}

/// Parse a positive integer setting no larger than `max`.
///
/// Anything else falls back to `default` and is recorded in `rejected`, since
/// logging is not set up yet when configuration loads.
fn parse_bounded(
    key: &str,
    raw: Option<String>,
    default: u64,
    max: u64,
    rejected: &mut Vec<String>,
) -> u64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if (1..=max).contains(&value) => value,
        _ => {
            rejected.push(format!(
                "Ignoring invalid {}={:?} (expected 1..={}), using {}",
                key, raw, max, default
            ));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("RESUME_DB_PATH");
        env::remove_var("RESUME_BIND_ADDR");
        env::remove_var("RESUME_LOG_LEVEL");
        env::remove_var("RESUME_ATS_URL");
        env::remove_var("ATS_ANALYZER_URL");
        env::remove_var("RESUME_ATS_TIMEOUT_SECS");
        env::remove_var("RESUME_SESSION_TTL_MINUTES");
        env::remove_var("RESUME_SKILLS_PATH");
        env::remove_var("RESUME_COOKIE_SECURE");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/resumes.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.ats_url, DEFAULT_ATS_URL);
        assert_eq!(config.ats_timeout, Duration::from_secs(30));
        assert_eq!(config.session_ttl, chrono::Duration::hours(2));
        assert!(config.skills_path.is_none());
        assert!(!config.cookie_secure);
        assert!(config.rejected.is_empty());
    }

    #[test]
    fn test_parse_bounded_accepts_values_in_range() {
        let mut rejected = Vec::new();
        assert_eq!(parse_bounded("K", None, 120, 600, &mut rejected), 120);
        assert_eq!(parse_bounded("K", Some("45".into()), 120, 600, &mut rejected), 45);
        assert_eq!(parse_bounded("K", Some("600".into()), 120, 600, &mut rejected), 600);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_parse_bounded_rejects_bad_values() {
        let mut rejected = Vec::new();
        for raw in ["abc", "0", "-5", "601", "18446744073709551615"] {
            assert_eq!(parse_bounded("K", Some(raw.into()), 120, 600, &mut rejected), 120);
        }
        assert_eq!(rejected.len(), 5);
        assert!(rejected[0].contains("K=\"abc\""));
    }

    #[test]
    fn test_huge_session_ttl_falls_back_to_default() {
        let mut rejected = Vec::new();
        let minutes = parse_bounded(
            "RESUME_SESSION_TTL_MINUTES",
            Some(u64::MAX.to_string()),
            120,
            MAX_SESSION_TTL_MINUTES,
            &mut rejected,
        );
        assert_eq!(minutes, 120);
        assert_eq!(rejected.len(), 1);
    }
}
