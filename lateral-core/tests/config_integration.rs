use lateral_core::Config;
use std::fs;

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[run]
gene_tree_suffix = ".newick"

[queue]
threads = 4
wall_time = "24:00:00"

[tools]
install_dir = "/opt/hgt-tools"
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.run.gene_tree_suffix, ".newick");
    assert_eq!(config.queue.threads, 4);
    assert_eq!(config.queue.wall_time, "24:00:00");
    assert_eq!(config.tools.install_dir.as_deref(), Some("/opt/hgt-tools"));
    // unspecified fields fall back to defaults
    assert_eq!(config.queue.memory, "8G");
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.queue.submit_delay_secs = 5;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.queue.submit_delay_secs, 5);
}

#[test]
fn test_malformed_config_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "queue = \"not a table\"").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, lateral_core::LateralError::Configuration(_)));
}
