use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  true  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "NO"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_rejects_unknown_and_empty() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// Config::from_lookup
// =============================================================================

#[test]
fn config_requires_database_url() {
    let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
}

#[test]
fn config_applies_defaults() {
    let cfg = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")])).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.db_max_connections, 5);
    assert_eq!(cfg.frontend_url, "http://localhost:3000");
    assert!(!cfg.cookie_secure);
    assert_eq!(cfg.session_ttl_days, 14);
    assert_eq!(cfg.scrape_timeout, Duration::from_secs(15));
    assert!(cfg.email.is_none());
}

#[test]
fn config_infers_secure_cookie_from_https_frontend() {
    let cfg = Config::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("FRONTEND_URL", "https://cards.example.com/"),
    ]))
    .unwrap();
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.frontend_url, "https://cards.example.com");
}

#[test]
fn config_explicit_cookie_flag_wins() {
    let cfg = Config::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("FRONTEND_URL", "https://cards.example.com"),
        ("COOKIE_SECURE", "off"),
    ]))
    .unwrap();
    assert!(!cfg.cookie_secure);
}

#[test]
fn config_rejects_bad_port() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("PORT", "http")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
}

#[test]
fn config_rejects_non_positive_session_ttl() {
    let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("SESSION_TTL_DAYS", "0")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: "SESSION_TTL_DAYS", .. }));
}

#[test]
fn config_reads_pool_size() {
    let cfg = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("DB_MAX_CONNECTIONS", " 12 ")]))
        .unwrap();
    assert_eq!(cfg.db_max_connections, 12);
}

#[test]
fn config_rejects_bad_pool_size() {
    for raw in ["lots", "-1", "0"] {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("DB_MAX_CONNECTIONS", raw)]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }), "{raw}");
    }
}

#[test]
fn config_email_requires_key_and_sender() {
    let only_key = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x"), ("RESEND_API_KEY", "re_123")]))
        .unwrap();
    assert!(only_key.email.is_none());

    let both = Config::from_lookup(lookup_from(&[
        ("DATABASE_URL", "postgres://x"),
        ("RESEND_API_KEY", "re_123"),
        ("RESEND_FROM", "Flashcards <noreply@example.com>"),
    ]))
    .unwrap();
    assert_eq!(both.email.map(|e| e.api_key), Some("re_123".to_owned()));
}
