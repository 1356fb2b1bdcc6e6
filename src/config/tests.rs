use std::sync::{Mutex, OnceLock};

use super::load::{default_config_path, resolve_config_path};
use super::schema::*;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert!(!s.playback.shuffle);
    assert!(!s.playback.repeat);
    assert_eq!(s.playback.volume, 1.0);
    assert_eq!(s.playback.tick_ms, 500);
    assert_eq!(s.library.extensions.len(), 5);
}

#[test]
fn accepts_extension_is_case_insensitive_and_dot_tolerant() {
    let lib = LibrarySettings::default();
    assert!(lib.accepts_extension("mp3"));
    assert!(lib.accepts_extension("FLAC"));
    assert!(!lib.accepts_extension("txt"));

    let custom = LibrarySettings { extensions: vec![".opus".into()], ..LibrarySettings::default() };
    assert!(custom.accepts_extension("opus"));
    assert!(!custom.accepts_extension("mp3"));
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions.clear();
    assert!(s.validate().is_err());
}

#[test]
fn resolve_config_path_prefers_vivace_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", "/tmp/vivace-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/vivace-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("vivace")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("vivace")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
shuffle = true
repeat = true
volume = 0.4
tick_ms = 250

[controls]
scrub_seconds = 9
volume_step = 0.05

[library]
extensions = ["mp3", "opus"]
follow_links = false

[ui]
header_text = "hello"
notice_seconds = 7
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("VIVACE__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat);
    assert_eq!(s.playback.volume, 0.4);
    assert_eq!(s.playback.tick_ms, 250);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 0.05);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "opus".to_string()]);
    assert!(!s.library.follow_links);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.notice_seconds, 7);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("VIVACE__PLAYBACK__TICK_MS", "100");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.tick_ms, 100);
}

#[test]
fn settings_round_trip_through_toml() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("VIVACE__PLAYBACK__TICK_MS");

    let mut original = Settings::default();
    original.playback.volume = 0.25;
    original.ui.header_text = "round trip".to_string();

    let text = toml::to_string(&original).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, text).unwrap();

    let _g2 = EnvGuard::set("VIVACE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let loaded = Settings::load().unwrap();
    assert_eq!(loaded.playback.volume, 0.25);
    assert_eq!(loaded.ui.header_text, "round trip");
    assert_eq!(loaded.library.extensions, original.library.extensions);
}
