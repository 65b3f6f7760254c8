use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use rbl_config::{
    Config, DEFAULT_SCORE_INTERVAL, DEFAULT_SCORE_LIMIT, default_database_path,
    default_log_filter, default_log_format, default_server_address,
};

// Scenarios mutate process-wide environment variables, so they run one at a
// time.
static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    file_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            file_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("rbld")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _guard: guard,
        }
    }

    fn add_file_line(&self, line: String) {
        self.file_lines.borrow_mut().push(line);
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on edition 2024. The harness holds
        // the env mutex and restores overrides in `Drop`.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let mut args = self.cli_args.borrow().clone();
        let lines = self.file_lines.borrow();
        if !lines.is_empty() {
            let path = self.temp_dir.path().join("rbld.toml");
            if let Err(error) = fs::write(&path, lines.join("\n")) {
                panic!("failed to write configuration: {error}");
            }
            args.push(OsString::from("--config-path"));
            args.push(path.into_os_string());
        }

        match Config::load_from_iter(args) {
            Ok(config) => {
                *self.loaded.borrow_mut() = Some(config);
            }
            Err(error) => {
                *self.error.borrow_mut() = Some(error.to_string());
            }
        }
    }

    fn with_loaded<T>(&self, inspect: impl FnOnce(&Config) -> T) -> T {
        self.load();

        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }

        let loaded = self.loaded.borrow();
        match loaded.as_ref() {
            Some(config) => inspect(config),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the score interval to {interval}")]
fn given_file_interval(harness: &Harness, interval: u32) {
    harness.add_file_line(format!("score_interval = {interval}"));
}

#[given("a configuration file setting the server address to \"{address}\"")]
fn given_file_address(harness: &Harness, address: String) {
    harness.add_file_line(format!("server_address = \"{address}\""));
}

#[given("the environment overrides the score interval to {interval}")]
fn given_env_interval(harness: &Harness, interval: u32) {
    harness.set_env("RBLD_SCORE_INTERVAL", &interval.to_string());
}

#[when("the CLI sets the score interval to {interval}")]
fn when_cli_interval(harness: &Harness, interval: u32) {
    harness.push_cli_arg("--score-interval");
    harness.push_cli_arg(interval.to_string());
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the score interval to {interval}")]
fn then_resolved_interval(harness: &Harness, interval: u32) {
    let resolved = harness.with_loaded(|config| config.score_interval);
    assert_eq!(resolved, interval);
}

#[then("loading the configuration resolves the server address to \"{address}\"")]
fn then_resolved_address(harness: &Harness, address: String) {
    let resolved = harness.with_loaded(|config| config.server_address().to_string());
    assert_eq!(resolved, address);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    harness.with_loaded(|config| {
        assert_eq!(config.server_address(), &default_server_address());
        assert_eq!(config.database_path(), &default_database_path());
        assert_eq!(config.log_filter(), default_log_filter());
        assert_eq!(config.log_format(), default_log_format());
        assert_eq!(config.score_interval, DEFAULT_SCORE_INTERVAL);
        assert!((config.score_limit - DEFAULT_SCORE_LIMIT).abs() < f64::EPSILON);
    });
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply when nothing is configured"
)]
fn defaults_apply(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file overrides the defaults"
)]
fn file_overrides_defaults(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "The command line overrides the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "A configuration file sets the listener address"
)]
fn file_sets_server_address(#[from(harness)] harness: Harness) {
    let _ = harness;
}
