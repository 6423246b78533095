use dynview_core::config::{ConfigError, ConfigLoader, DEFAULT_NAMESPACE};
use dynview_core::synth::PropertySpec;
use dynview_core::{BaseType, create_with_config};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn missing_file_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("nope/config.toml");
    let err = ConfigLoader::load(Some(&cfg_path)).unwrap_err();
    match err {
        ConfigError::NotFound(_) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("nope/config.toml");
    let cfg = ConfigLoader::load_or_default(Some(&cfg_path)).unwrap();
    assert_eq!(cfg.namespace, DEFAULT_NAMESPACE);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn bad_version_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = 2\n");

    let err = ConfigLoader::load(Some(&cfg_path)).unwrap_err();
    match err {
        ConfigError::BadVersion(2) => {}
        other => panic!("expected BadVersion(2), got {other:?}"),
    }
}

#[test]
fn bad_toml_fails() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    write_file(&cfg_path, "version = [\n");

    let err = ConfigLoader::load(Some(&cfg_path)).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(..)));
}

#[test]
fn empty_namespace_fails() {
    let err = ConfigLoader::from_toml_str("version = 1\nnamespace = \"  \"\n", "inline")
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyNamespace));
}

#[test]
fn full_config_loads() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let log_file = tmp.path().join("dynview.log");
    let toml = format!(
        r#"
version = 1
namespace = "MyCompany"

[logging]
level = "debug"
file_level = "trace"
file = "{}"
"#,
        log_file.display()
    );
    write_file(&cfg_path, &toml);

    let cfg = ConfigLoader::load(Some(&cfg_path)).unwrap();
    assert_eq!(cfg.namespace, "MyCompany");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.file_level.as_deref(), Some("trace"));
    assert_eq!(cfg.logging.file, Some(log_file));
}

#[test]
fn create_with_config_uses_configured_namespace() {
    let cfg = ConfigLoader::from_toml_str("version = 1\nnamespace = \"Configured\"\n", "inline")
        .unwrap();
    let dvm = create_with_config(
        &cfg,
        &BaseType::default(),
        "Configured.Greeting",
        &[PropertySpec::text("Message").with_initial_value("hi")],
    )
    .unwrap();

    assert_eq!(dvm.get("Message").unwrap().as_text(), Some("hi"));
}
