use hostcache_domain::{CacheConfig, CliOverrides, Config, ConfigError, HostTtl, LogFormat};
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.cache.default_ttl_secs, 60);
    assert!(!config.cache.coalesce_misses);
    assert!(config.cache.host_ttl.is_empty());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[test]
fn test_config_empty_toml_uses_defaults() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.cache.default_ttl_secs, 60);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_parses_host_overrides() {
    let toml_str = r#"
        [cache]
        default_ttl_secs = 30
        coalesce_misses = true

        [[cache.host_ttl]]
        host = "api.example.com"
        ttl_ms = 5000

        [[cache.host_ttl]]
        host = "fast.example.com"
        ttl_ms = 5

        [logging]
        level = "debug"
        format = "json"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.cache.default_ttl_secs, 30);
    assert!(config.cache.coalesce_misses);
    assert_eq!(
        config.cache.host_ttl,
        vec![
            HostTtl {
                host: "api.example.com".to_string(),
                ttl_ms: 5000,
            },
            HostTtl {
                host: "fast.example.com".to_string(),
                ttl_ms: 5,
            },
        ]
    );
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_config_ttl_policy_from_cache_section() {
    let cache = CacheConfig {
        default_ttl_secs: 60,
        coalesce_misses: false,
        host_ttl: vec![HostTtl {
            host: "x".to_string(),
            ttl_ms: 5,
        }],
    };

    let policy = cache.ttl_policy();

    assert_eq!(policy.default_ttl(), Duration::from_secs(60));
    assert_eq!(policy.ttl_for("x"), Duration::from_millis(5));
    assert_eq!(policy.ttl_for("y"), Duration::from_secs(60));
    assert_eq!(policy.min_ttl(), Duration::from_millis(5));
}

#[test]
fn test_config_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[cache]\ndefault_ttl_secs = \"soon\"");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_missing_file_is_read_error() {
    let result = Config::load(
        Some("/nonexistent/hostcache-test.toml"),
        CliOverrides::default(),
    );
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_config_validate_rejects_blank_host() {
    let toml_str = r#"
        [[cache.host_ttl]]
        host = "  "
        ttl_ms = 100
    "#;

    let config = Config::from_toml(toml_str).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_config_cli_overrides_win() {
    let path = std::env::temp_dir().join(format!("hostcache-cfg-{}.toml", std::process::id()));
    std::fs::write(&path, "[cache]\ndefault_ttl_secs = 10\n").unwrap();

    let config = Config::load(
        path.to_str(),
        CliOverrides {
            default_ttl_secs: Some(0),
            log_level: Some("trace".to_string()),
        },
    )
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.cache.default_ttl_secs, 0);
    assert_eq!(config.logging.level, "trace");
}
