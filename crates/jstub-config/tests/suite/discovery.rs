use std::ffi::OsString;
use std::sync::Mutex;

use jstub_config::{discover_config_path, load_for_dir, JSTUB_CONFIG_ENV_VAR};
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct EnvVarGuard {
    key: &'static str,
    prev: Option<OsString>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &std::path::Path) -> Self {
        let prev = std::env::var_os(key);
        std::env::set_var(key, value);
        Self { key, prev }
    }

    fn unset(key: &'static str) -> Self {
        let prev = std::env::var_os(key);
        std::env::remove_var(key);
        Self { key, prev }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

#[test]
fn discovers_jstub_toml_in_base_dir() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(JSTUB_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("jstub.toml");
    std::fs::write(&config_path, "[stubs]\ninclude_nested = false\n").unwrap();
    std::fs::write(dir.path().join(".jstub.toml"), "").unwrap();

    let discovered = discover_config_path(dir.path()).expect("jstub.toml should be discovered");
    assert_eq!(discovered, config_path.canonicalize().unwrap_or(config_path));
}

#[test]
fn falls_back_to_hidden_config() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(JSTUB_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".jstub.toml");
    std::fs::write(&config_path, "").unwrap();

    let discovered = discover_config_path(dir.path()).expect(".jstub.toml should be discovered");
    assert_eq!(discovered, config_path.canonicalize().unwrap_or(config_path));
}

#[test]
fn env_override_wins_over_base_dir_file() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("jstub.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
    let override_path = dir.path().join("override.toml");
    std::fs::write(&override_path, "[logging]\nlevel = \"debug\"\n").unwrap();
    let _env = EnvVarGuard::set(JSTUB_CONFIG_ENV_VAR, &override_path);

    let (config, path, _diagnostics) = load_for_dir(dir.path()).expect("config should load");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(
        path,
        Some(override_path.canonicalize().unwrap_or(override_path))
    );
}

#[test]
fn no_config_yields_defaults() {
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK mutex poisoned");
    let _env = EnvVarGuard::unset(JSTUB_CONFIG_ENV_VAR);

    let dir = tempdir().unwrap();
    let (config, path, diagnostics) = load_for_dir(dir.path()).expect("defaults");
    assert_eq!(config, Default::default());
    assert_eq!(path, None);
    assert!(diagnostics.is_empty());
}
