//! Tests for layered configuration loading.

use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// A project with a `.git` marker and a nested working directory.
fn project_layout(root: &Path) -> (PathBuf, PathBuf) {
    let project_root = root.join("site");
    fs::create_dir_all(project_root.join(".git")).expect("git");
    let cwd = project_root.join("pages");
    fs::create_dir_all(&cwd).expect("cwd");
    (project_root, cwd)
}

#[test]
fn empty_config_uses_defaults() {
    let config = ShopdirConfig::load_from_str("{}").expect("config");
    assert_eq!(config.catalog.entertainment_extra_types, vec!["KTV".to_string()]);
    assert_eq!(config.catalog.highlight_count, 4);
    assert_eq!(config.fallback.location, "data/shops.json");
    assert_eq!(config.sheet.timeout_secs, 8);
    assert!(!config.sheet.is_active());
}

#[test]
fn export_url_includes_sheet_and_tab() {
    let config = ShopdirConfig::load_from_str(
        r#"{ sheet: { host: "https://sheets.example/d/", spreadsheet_id: "abc", tab_id: 7 } }"#,
    )
    .expect("config");
    assert!(config.sheet.is_active());
    assert_eq!(
        config.sheet.export_url(),
        "https://sheets.example/d/abc/export?format=csv&gid=7"
    );
}

#[test]
fn rejects_unknown_nested_key() {
    let err = ShopdirConfig::load_from_str("{ catalog: { extra: [] } }").unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("catalog.extra"), "{msg}");
    assert!(msg.contains("unknown key"), "{msg}");
}

#[test]
fn rejects_non_string_extra_type() {
    let err = ShopdirConfig::load_from_str("{ catalog: { entertainment_extra_types: [1] } }")
        .unwrap_err();
    assert!(format!("{err}").contains("catalog.entertainment_extra_types[0]"));
}

#[test]
fn rejects_zero_timeout() {
    let err = ShopdirConfig::load_from_str("{ sheet: { timeout_secs: 0 } }").unwrap_err();
    let ConfigError::InvalidField { path, .. } = err else {
        panic!("expected invalid field");
    };
    assert_eq!(path, "sheet.timeout_secs");
}

#[test]
fn repo_layer_overrides_cwd_and_user() {
    let temp = TempDir::new().expect("tmp");
    let (project_root, cwd) = project_layout(temp.path());

    let user_config = temp.path().join("user.json5");
    write_json5(&user_config, r#"{ fallback: { location: "user.json" } }"#);
    write_json5(
        &project_root.join(DEFAULT_CONFIG_FILE),
        r#"{ fallback: { location: "project.json" }, catalog: { highlight_count: 6 } }"#,
    );
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        r#"{ fallback: { location: "cwd.json" } }"#,
    );
    write_json5(
        &project_root
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE),
        r#"{ fallback: { location: "repo.json" } }"#,
    );

    let mut options = LayeredConfigOptions::new(&cwd);
    options.user_config_path = Some(user_config);

    let layered = ShopdirConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.fallback.location, "repo.json");
    assert_eq!(layered.config.catalog.highlight_count, 6);
    let sources: Vec<_> = layered.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            ConfigLayerSource::User,
            ConfigLayerSource::Project,
            ConfigLayerSource::Cwd,
            ConfigLayerSource::Repo,
        ]
    );
}

#[test]
fn runtime_override_wins() {
    let temp = TempDir::new().expect("tmp");
    let (project_root, _) = project_layout(temp.path());
    write_json5(
        &project_root.join(DEFAULT_CONFIG_FILE),
        "{ server: { port: 8000 } }",
    );
    let runtime = temp.path().join("runtime.json5");
    write_json5(&runtime, "{ server: { port: 9090 } }");

    let mut options = LayeredConfigOptions::new(&project_root).with_runtime_path(&runtime);
    options.user_config_path = None;

    let layered = ShopdirConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.config.server.port, 9090);
    // project root == cwd, so the same file is only read once.
    assert_eq!(layered.layers.len(), 2);
}

#[test]
fn missing_runtime_path_is_an_error() {
    let temp = TempDir::new().expect("tmp");
    let mut options = LayeredConfigOptions::new(temp.path())
        .with_runtime_path(temp.path().join("missing.json5"));
    options.user_config_path = None;

    let err = ShopdirConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed { .. }));
}

#[test]
fn invalid_layer_reports_its_origin() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ server: { port: 70000 } }",
    );
    let mut options = LayeredConfigOptions::new(temp.path());
    options.user_config_path = None;

    let err = ShopdirConfig::load_layered_with_options(options).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("), "{msg}");
    assert!(msg.contains("server.port"), "{msg}");
}
