use std::collections::HashMap;
use std::path::PathBuf;

use shopping_cart_cli::cli::Args;
use shopping_cart_cli::utils::Config;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.log_level, "warn");
    assert_eq!(config.environment, "development");
    assert!(config.catalog_path.is_none());
    assert!(!config.is_production());
}

#[test]
fn test_reads_variables() {
    let config = Config::from_lookup(lookup(&[
        ("LOG_LEVEL", "info,shopping_cart_cli=debug"),
        ("APP_ENV", "production"),
        ("CATALOG_PATH", "/tmp/catalog.json"),
    ]))
    .unwrap();

    assert_eq!(config.log_level, "info,shopping_cart_cli=debug");
    assert!(config.is_production());
    assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
}

#[test]
fn test_rejects_bad_values() {
    assert!(Config::from_lookup(lookup(&[("LOG_LEVEL", "shopping_cart_cli=loud")])).is_err());
    assert!(Config::from_lookup(lookup(&[("CATALOG_PATH", "")])).is_err());
}

#[test]
fn test_args_override_environment() {
    let mut config = Config::from_lookup(lookup(&[("CATALOG_PATH", "env.json")])).unwrap();
    let args = Args {
        verbose: true,
        catalog: Some(PathBuf::from("cli.json")),
        plain: false,
    };

    config.apply_args(&args);

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.catalog_path, Some(PathBuf::from("cli.json")));
}

#[test]
fn test_args_without_flags_keep_environment() {
    let mut config = Config::from_lookup(lookup(&[("LOG_LEVEL", "error")])).unwrap();

    config.apply_args(&Args::default());

    assert_eq!(config.log_level, "error");
    assert!(config.catalog_path.is_none());
}
