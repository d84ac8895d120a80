//! Scenario: two projects share one remote directory via key prefixes.

use ssh_index::commands::DeployOptions;
use ssh_index::infrastructure::MemoryRemote;

use crate::common::*;

const BLOG_CONFIG: &str = r#"
[ssh]
host = "example.com"
username = "deploy"
agent = true

[remote]
dir = "/srv/site"
key_prefix = "blog"
"#;

const SHOP_CONFIG: &str = r#"
[ssh]
host = "example.com"
username = "deploy"
agent = true

[remote]
dir = "/srv/site"
key_prefix = "shop"
"#;

fn on_remote(config: &str, remote: &MemoryRemote) -> Project {
    let mut project = Project::new(config);
    project.remote = remote.clone();
    project
}

#[test]
fn prefixes_partition_the_listing() {
    let remote = MemoryRemote::with_dir("/srv/site");
    let blog = on_remote(BLOG_CONFIG, &remote);
    let shop = on_remote(SHOP_CONFIG, &remote);

    blog.build(INDEX_V1);
    blog.deploy(DeployOptions {
        revision: Some("r1".to_string()),
        ..Default::default()
    })
    .unwrap();
    shop.build(INDEX_V2);
    shop.deploy(DeployOptions {
        revision: Some("r1".to_string()),
        ..Default::default()
    })
    .unwrap();

    let blog_files: Vec<String> = blog.list().unwrap().into_iter().map(|r| r.filename).collect();
    let shop_files: Vec<String> = shop.list().unwrap().into_iter().map(|r| r.filename).collect();
    assert_eq!(blog_files, vec!["blog:r1.html"]);
    assert_eq!(shop_files, vec!["shop:r1.html"]);
}

#[test]
fn same_key_under_another_prefix_is_not_a_duplicate() {
    let remote = MemoryRemote::with_dir("/srv/site");
    let blog = on_remote(BLOG_CONFIG, &remote);
    let shop = on_remote(SHOP_CONFIG, &remote);
    blog.build(INDEX_V1);
    shop.build(INDEX_V1);

    let first = blog.deploy(DeployOptions::default()).unwrap();
    let second = shop.deploy(DeployOptions::default()).unwrap();

    assert_eq!(first.revision, second.revision);
    assert!(first.upload.is_some());
    assert!(second.upload.is_some());
}
