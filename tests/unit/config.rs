//! Config regeneration: stale-file deletion and YAML post-processing.

#![allow(clippy::expect_used)]

use quickstart_cli::config;
use quickstart_cli::output::OutputContext;

use crate::mocks::ScaffoldWritesConfig;

fn read_yaml(path: &std::path::Path) -> serde_yaml::Value {
    let text = std::fs::read_to_string(path).expect("read config");
    serde_yaml::from_str(&text).expect("parse config")
}

#[test]
fn deletes_existing_config_before_scaffold() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");
    std::fs::write(&path, "stale: true\n").expect("write stale");

    let deleted = config::remove_stale(&OutputContext::new(), &path).expect("remove");
    assert!(deleted);
    assert!(!path.exists());
}

#[test]
fn missing_config_skips_deletion_without_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");

    let deleted = config::remove_stale(&OutputContext::new(), &path).expect("remove");
    assert!(!deleted);
}

#[test]
fn update_sets_port_and_command_on_every_app() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");
    std::fs::write(
        &path,
        "project: demo\nappRegion: us-east\napps:\n  - appId: order-app\n    appPort: 0\n  - appId: other-app\n",
    )
    .expect("write scaffold");

    config::update_dev_config(&path).expect("update");

    let doc = read_yaml(&path);
    assert_eq!(doc["project"], "demo");
    assert_eq!(doc["appRegion"], "us-east");

    let apps = doc["apps"].as_sequence().expect("apps");
    assert_eq!(apps.len(), 2);
    for app in apps {
        assert_eq!(app["appPort"].as_u64(), Some(5002));
        let command = app["command"].as_sequence().expect("command");
        let parts: Vec<_> = command.iter().filter_map(|v| v.as_str()).collect();
        assert_eq!(parts, ["npm", "run", "start"]);
    }
    assert_eq!(apps[0]["appId"], "order-app");
}

#[test]
fn update_leaves_documents_without_apps_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");
    std::fs::write(&path, "project: demo\n").expect("write scaffold");

    config::update_dev_config(&path).expect("update");

    let doc = read_yaml(&path);
    assert_eq!(doc["project"], "demo");
    assert!(doc.get("apps").is_none());
}

#[tokio::test]
async fn regenerate_replaces_stale_file_and_patches_apps() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");
    std::fs::write(&path, "stale: true\n").expect("write stale");

    let diagrid = ScaffoldWritesConfig { path: path.clone() };
    config::regenerate(&OutputContext::new(), &diagrid, &path)
        .await
        .expect("regenerate");

    let doc = read_yaml(&path);
    assert!(doc.get("stale").is_none());
    assert_eq!(doc["project"], "demo");
    let apps = doc["apps"].as_sequence().expect("apps");
    assert_eq!(apps[0]["appPort"].as_u64(), Some(5002));
}
