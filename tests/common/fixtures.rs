//! Reusable test content.

/// Minimal config pointing at an unreachable host
pub const UNREACHABLE_CONFIG: &str = r#"
[ssh]
host = "127.0.0.1"
port = 1
username = "deploy"
agent = true
timeout_secs = 5

[remote]
dir = "/srv/site"
key_prefix = "proj"
"#;

/// Config used with the in-memory remote
pub const MEMORY_CONFIG: &str = r#"
[ssh]
host = "example.com"
username = "deploy"
agent = true

[remote]
dir = "/srv/site"
key_prefix = "proj"
"#;

pub const INDEX_V1: &str = "<!doctype html><title>v1</title>";
pub const INDEX_V2: &str = "<!doctype html><title>v2</title>";
pub const INDEX_V3: &str = "<!doctype html><title>v3</title>";
