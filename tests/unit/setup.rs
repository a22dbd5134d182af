//! Setup step behaviour: prerequisite gating, failure diagnostics, and the
//! end-to-end ordering of the flow.

#![allow(clippy::expect_used)]

use quickstart_cli::error::SetupError;
use quickstart_cli::output::OutputContext;
use quickstart_cli::setup::{self, SetupOptions};

use crate::mocks::{
    DiagridMissing, MissingToolRunner, OkRunner, ProjectCreateFails, RecordingDiagrid, VersionOk,
};

#[tokio::test]
async fn prerequisites_pass_with_all_tools_present() {
    setup::check_prerequisites(&OutputContext::new(), &OkRunner, &VersionOk)
        .await
        .expect("prerequisites");
}

#[tokio::test]
async fn prerequisites_fail_without_node_toolchain() {
    let err = setup::check_prerequisites(&OutputContext::new(), &MissingToolRunner, &VersionOk)
        .await
        .expect_err("missing node");
    assert!(err.to_string().contains("Node.js"));
}

#[tokio::test]
async fn prerequisites_fail_without_diagrid_cli() {
    let err = setup::check_prerequisites(&OutputContext::new(), &OkRunner, &DiagridMissing)
        .await
        .expect_err("missing diagrid");
    assert!(err.to_string().contains("diagrid CLI"));
}

#[tokio::test]
async fn project_create_failure_carries_diagnostics() {
    let err = setup::create_project(&OutputContext::new(), &ProjectCreateFails, "demo")
        .await
        .expect_err("create fails");
    let setup_err = err.downcast_ref::<SetupError>().expect("typed error");
    assert!(matches!(setup_err, SetupError::CommandFailed { .. }));
    assert!(err.to_string().contains("project quota exceeded"));
}

#[tokio::test]
async fn full_flow_runs_steps_in_order_and_writes_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dev-demo.yaml");
    // A stale file from a previous run is deleted along the way.
    std::fs::write(&path, "stale: true\n").expect("write stale");

    let diagrid = RecordingDiagrid::new(path.clone());
    setup::run(
        &OutputContext::new(),
        &OkRunner,
        &diagrid,
        &SetupOptions {
            project_name: "demo".to_string(),
            config_file: path.clone(),
        },
    )
    .await
    .expect("full flow");

    let log = diagrid.log.borrow();
    let log: Vec<&str> = log.iter().map(String::as_str).collect();
    assert_eq!(
        log,
        [
            "version",
            "project create demo",
            "project use demo",
            "appid create demo order-app",
            "appid get demo order-app",
            "dev scaffold",
        ]
    );

    let doc: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&path).expect("read config"))
            .expect("parse config");
    assert!(doc.get("stale").is_none());
    let apps = doc["apps"].as_sequence().expect("apps");
    assert_eq!(apps[0]["appPort"].as_u64(), Some(5002));
}
