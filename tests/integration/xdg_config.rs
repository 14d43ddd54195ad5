//! Integration tests for XDG configuration loading

use stanza::config::{ConfigLoader, StanzaConfig};
use stanza::output::{Dialect, Mode};
use std::fs;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

#[test]
fn test_global_config_path_follows_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = ConfigLoader::global_config_path().unwrap();
        assert_eq!(
            path,
            test_dir.path().join("config").join("stanza").join("config.toml")
        );
    });
}

#[test]
fn test_default_history_path_follows_xdg_data_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = StanzaConfig::default();
        assert_eq!(
            config.console.history_path().unwrap(),
            test_dir.path().join("data").join("stanza").join("history")
        );
    });
}

#[test]
fn test_load_without_global_config() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(None).unwrap();
        assert_eq!(config, StanzaConfig::default());
    });
}

#[test]
fn test_load_with_global_config() {
    let test_dir = TempDir::new().unwrap();
    let config_dir = test_dir.path().join("config").join("stanza");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        r#"
[console]
delimiter = ";"
output = "ttable"
table_format = "jira"
graphics = false
max_commands = 50
"#,
    )
    .unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(None).unwrap();
        let format = config.console.format().unwrap();
        assert_eq!(config.console.delimiter, ";");
        assert_eq!(format.mode, Mode::TTable);
        assert_eq!(format.opts.dialect, Dialect::Jira);
        assert!(!format.opts.graphics);
        assert_eq!(config.console.max_commands, 50);
    });
}

#[test]
fn test_explicit_config_overrides_global_config() {
    let test_dir = TempDir::new().unwrap();
    let config_dir = test_dir.path().join("config").join("stanza");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[console]\ndelimiter = \";\"\noutput = \"lua\"\n",
    )
    .unwrap();
    let explicit = test_dir.path().join("session.toml");
    fs::write(&explicit, "[console]\noutput = \"table\"\n").unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(Some(&explicit)).unwrap();
        assert_eq!(config.console.delimiter, ";");
        assert_eq!(config.console.output, "table");
    });
}
