//! Scenario: build, upload, activate, release again and roll back.

use ssh_index::commands::DeployOptions;
use ssh_index::SshIndexError;

use crate::common::*;

fn deploy_with_key(project: &Project, key: &str, activate: bool) {
    project
        .deploy(DeployOptions {
            revision: Some(key.to_string()),
            activate,
            ..Default::default()
        })
        .unwrap();
}

#[test]
fn first_release_is_inactive_until_activated() {
    let project = Project::new(MEMORY_CONFIG);
    project.build(INDEX_V1);

    let report = project.deploy(DeployOptions::default()).unwrap();

    let revisions = project.list().unwrap();
    assert_eq!(revisions.len(), 1);
    assert_eq!(revisions[0].revision, report.revision);
    assert!(!revisions[0].active);
    assert!(!project.remote.exists("/srv/site/index.html"));

    project.activate(&report.revision).unwrap();
    assert_eq!(project.active(), Some(report.revision));
}

#[test]
fn release_then_rollback() {
    let project = Project::new(MEMORY_CONFIG);

    project.build(INDEX_V1);
    deploy_with_key(&project, "v1", true);
    project.build(INDEX_V2);
    deploy_with_key(&project, "v2", true);
    project.build(INDEX_V3);
    deploy_with_key(&project, "v3", false);

    let order: Vec<String> = project
        .list()
        .unwrap()
        .into_iter()
        .map(|r| r.revision)
        .collect();
    assert_eq!(order, vec!["v3", "v2", "v1"]);
    assert_eq!(project.active().as_deref(), Some("v2"));

    project.activate("v1").unwrap();

    assert_eq!(project.active().as_deref(), Some("v1"));
    assert_eq!(
        project.remote.link_target("/srv/site/index.html").as_deref(),
        Some("/srv/site/proj:v1.html")
    );
    assert_eq!(
        project.remote.file("/srv/site/proj:v2.html").unwrap(),
        INDEX_V2.as_bytes().to_vec()
    );
}

#[test]
fn redeploying_an_active_revision_changes_nothing() {
    let project = Project::new(MEMORY_CONFIG);
    project.build(INDEX_V1);
    deploy_with_key(&project, "v1", true);
    let before = project.list().unwrap();

    let report = project
        .deploy(DeployOptions {
            revision: Some("v1".to_string()),
            ..Default::default()
        })
        .unwrap();

    assert!(report.upload.is_none());
    assert_eq!(project.list().unwrap(), before);
}

#[test]
fn activating_unknown_revision_keeps_live_site() {
    let project = Project::new(MEMORY_CONFIG);
    project.build(INDEX_V1);
    deploy_with_key(&project, "v1", true);

    let err = project.activate("v9").unwrap_err();

    assert!(matches!(err, SshIndexError::RevisionNotFound { .. }));
    assert_eq!(project.active().as_deref(), Some("v1"));
}

#[test]
fn activation_repairs_a_missing_entry_point() {
    let project = Project::new(MEMORY_CONFIG);
    project.build(INDEX_V1);
    deploy_with_key(&project, "v1", true);
    project.remote.remove("/srv/site/index.html");

    let result = project.activate("v1").unwrap();

    assert!(result.entry_point_was_absent);
    assert_eq!(project.active().as_deref(), Some("v1"));
}
