use std::ffi::OsString;
use std::fs;

use ortho_config::OrthoConfig;
use rbl_config::Config;
use tempfile::TempDir;

fn load_with_file(contents: &str) -> Result<Config, String> {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("rbld.toml");
    fs::write(&path, contents).expect("write config");

    let args = vec![
        OsString::from("rbld"),
        OsString::from("--config-path"),
        path.into_os_string(),
    ];
    Config::load_from_iter(args).map_err(|error| error.to_string())
}

#[test]
fn malformed_toml_is_reported() {
    let error = load_with_file("score_interval = = 77\n").expect_err("loading must fail");
    assert!(!error.is_empty(), "expected a descriptive error");
}

#[test]
fn invalid_server_address_is_reported() {
    let result = load_with_file("server_address = \"unix:///tmp/rbld.sock\"\n");
    assert!(result.is_err(), "unix sockets are not served");
}

#[test]
fn unknown_log_format_is_reported() {
    let result = load_with_file("log_format = \"syslog\"\n");
    assert!(result.is_err(), "unknown log format must fail");
}

#[test]
fn scoring_values_are_read_from_file() {
    let config = load_with_file("score_interval = 77\nscore_limit = 0.13\n")
        .expect("valid configuration");
    let score = config.score().expect("valid score parameters");
    assert_eq!(score.interval(), 77);
    assert!((score.limit() - 0.13).abs() < f64::EPSILON);
}
