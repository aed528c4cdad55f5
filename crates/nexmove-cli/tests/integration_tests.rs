//! Integration tests for CLI commands

use std::path::Path;
use std::process::Command;

/// Helper to run the nexmove binary with an isolated environment
fn nexmove(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_nexmove"))
        .args(args)
        .env_remove("NEXMOVE_STAGING_URL")
        .env_remove("NEXMOVE_TARGET_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute nexmove")
}

/// Diagnostic text with miette's line wrapping and box drawing removed
fn flatten(output: &[u8]) -> String {
    String::from_utf8_lossy(output)
        .split_whitespace()
        .filter(|word| !word.chars().all(|c| "│×╭╰─".contains(c)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_settings(dir: &Path, yaml: &str) -> String {
    let path = dir.join("settings.yaml");
    std::fs::write(&path, yaml).unwrap();
    path.display().to_string()
}

/// Arguments for a run that only performs the delete step
fn delete_only_args<'a>(settings: &'a str, build_dir: &'a str) -> Vec<&'a str> {
    vec![
        "move",
        "--group-id",
        "com.acme",
        "--artifact-id",
        "widget",
        "--artifact-version",
        "1.2.3",
        "--packaging",
        "jar",
        // Port 9 (discard); nothing must ever connect here
        "--staging-url",
        "http://127.0.0.1:9",
        "--staging-repo-id",
        "staging",
        "--target-repo-id",
        "releases",
        "--skip-fetch",
        "--skip-publish",
        "--settings",
        settings,
        "--build-dir",
        build_dir,
    ]
}

mod help {
    use super::*;

    #[test]
    fn test_help() {
        let output = nexmove(&["--help"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("move"));
        assert!(stdout.contains("servers"));
    }

    #[test]
    fn test_move_help_lists_skip_flags() {
        let output = nexmove(&["move", "--help"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("--skip-fetch"));
        assert!(stdout.contains("--skip-publish"));
        assert!(stdout.contains("--skip-delete"));
    }
}

mod move_command {
    use super::*;

    #[test]
    fn test_missing_required_argument() {
        let output = nexmove(&["move", "--group-id", "com.acme"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("--artifact-id"));
    }

    #[test]
    fn test_invalid_staging_url_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(dir.path(), "servers: []\n");
        let build_dir = dir.path().display().to_string();

        let mut args = delete_only_args(&settings, &build_dir);
        let idx = args.iter().position(|a| *a == "http://127.0.0.1:9").unwrap();
        args[idx] = "ftp://nexus.local";

        let output = nexmove(&args);
        assert_eq!(output.status.code(), Some(2));
    }

    #[test]
    fn test_missing_server_fails_delete_step() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(
            dir.path(),
            "servers:\n  - id: releases\n    username: releaser\n    password: s3cret\n",
        );
        let build_dir = dir.path().display().to_string();

        let output = nexmove(&delete_only_args(&settings, &build_dir));
        assert_eq!(output.status.code(), Some(5));

        // The credential lookup failed; a connection attempt would report a transport error
        let stderr = flatten(&output.stderr);
        assert!(
            stderr.contains("No server with id 'staging' in settings"),
            "stderr: {}",
            stderr
        );
        assert!(!stderr.contains("DELETE"));
        assert!(stderr.contains("com.acme:widget:1.2.3:jar"));
        assert!(!stderr.contains("s3cret"));
    }

    #[test]
    fn test_all_steps_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(dir.path(), "servers: []\n");
        let build_dir = dir.path().display().to_string();

        let mut args = delete_only_args(&settings, &build_dir);
        args.push("--skip-delete");
        args.push("--json");

        let output = nexmove(&args);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");

        let steps = json["steps"].as_array().unwrap();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s["status"] == "skipped"));
        assert_eq!(json["target"]["repositoryId"], "releases");
    }

    #[test]
    fn test_maven_transport_requires_pinned_plugins() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(dir.path(), "servers: []\n");
        let build_dir = dir.path().display().to_string();

        let mut args = delete_only_args(&settings, &build_dir);
        args.extend(["--transport", "maven"]);

        let output = nexmove(&args);
        assert_eq!(output.status.code(), Some(2));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("maven-dependency-plugin"));
    }
}

mod servers_command {
    use super::*;

    const SETTINGS: &str = "servers:\n  - id: staging\n    username: deployer\n    password: hunter2\n";

    #[test]
    fn test_servers_never_print_passwords() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(dir.path(), SETTINGS);

        let output = nexmove(&["servers", "--settings", &settings]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("staging"));
        assert!(stdout.contains("deployer"));
        assert!(!stdout.contains("hunter2"));
    }

    #[test]
    fn test_servers_json() {
        let dir = tempfile::tempdir().unwrap();
        let settings = write_settings(dir.path(), SETTINGS);

        let output = nexmove(&["servers", "--settings", &settings, "--json"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json[0]["id"], "staging");
        assert!(json[0].get("password").is_none());
    }

    #[test]
    fn test_servers_add() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.yaml").display().to_string();

        let output = nexmove(&[
            "servers",
            "--settings",
            &settings,
            "add",
            "staging",
            "--username",
            "deployer",
            "--password-env",
            "NEXUS_PASSWORD",
        ]);
        assert!(output.status.success());

        let saved = std::fs::read_to_string(&settings).unwrap();
        assert!(saved.contains("${env.NEXUS_PASSWORD}"));

        let output = nexmove(&["servers", "--settings", &settings, "--json"]);
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json[0]["id"], "staging");
        assert_eq!(json[0]["username"], "deployer");
    }

    #[test]
    fn test_servers_add_requires_password() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.yaml").display().to_string();

        let output = nexmove(&[
            "servers",
            "--settings",
            &settings,
            "add",
            "staging",
            "--username",
            "deployer",
        ]);
        assert_eq!(output.status.code(), Some(2));
        assert!(!Path::new(&settings).exists());
    }
}
