//! CLI tests that run the real binary.
//!
//! None of these reach a live SSH server: each fails or finishes before
//! connecting, or connects to a closed local port.

mod common;

use common::*;

#[test]
fn help_lists_subcommands() {
    let env = TestEnv::new();

    let result = env.run(&["--help"]);

    assert!(result.success);
    for command in ["deploy", "activate", "list"] {
        assert!(
            result.stdout.contains(command),
            "help should mention '{}'; got:\n{}",
            command,
            result.stdout
        );
    }
}

#[test]
fn version_flag_prints_package_version() {
    let env = TestEnv::new();

    let result = env.run(&["--version"]);

    assert!(result.success);
    assert!(result.stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_config_is_bad_input() {
    let env = TestEnv::new();

    let result = env.run(&["list"]);

    assert_eq!(result.exit_code, 2, "stderr:\n{}", result.stderr);
    assert!(result.stderr.contains("missing required config 'ssh.host'"));
}

#[test]
fn json_errors_are_written_to_stdout() {
    let env = TestEnv::new();

    let result = env.run(&["list", "--json"]);

    assert_eq!(result.exit_code, 2);
    let last = result.stdout.lines().last().expect("json error line");
    let value: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(value["event"], "error");
    assert_eq!(value["command"], "list");
    assert_eq!(value["kind"], "bad_input");
}

#[test]
fn unknown_target_is_bad_input() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", UNREACHABLE_CONFIG);

    let result = env.run(&["list", "--target", "staging"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("unknown deploy target 'staging'"));
}

#[test]
fn unknown_config_keys_are_reported() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", "[ssh]\nhots = \"example.com\"\n");

    let result = env.run(&["list"]);

    assert_eq!(result.exit_code, 2);
    assert!(
        result.stderr.contains("hots"),
        "stderr:\n{}",
        result.stderr
    );
}

#[test]
fn config_is_found_from_a_subdirectory() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", UNREACHABLE_CONFIG);
    std::fs::create_dir_all(env.project_path("src/pages")).unwrap();

    let result = env.run_from(&env.project_path("src/pages"), &["deploy"]);

    // Config resolved; the artifact is what is missing
    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("failed to read artifact"));
}

#[test]
fn invalid_revision_key_is_rejected_before_connecting() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", UNREACHABLE_CONFIG);
    env.write("dist/index.html", INDEX_V1);

    let result = env.run(&["deploy", "--revision", "a/b"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("invalid revision key"));
}

#[test]
fn activate_requires_a_revision() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", UNREACHABLE_CONFIG);

    let result = env.run(&["activate"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("--revision"));
}

#[test]
fn unreachable_host_is_a_failure() {
    let env = TestEnv::new();
    env.write("ssh-index.toml", UNREACHABLE_CONFIG);

    let result = env.run(&["list"]);

    assert_eq!(result.exit_code, 1, "stderr:\n{}", result.stderr);
    assert!(result.stderr.contains("127.0.0.1"));
}
