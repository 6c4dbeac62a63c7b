/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const MANIFEST: &str = "tests/fixtures/sample-project/project.toml";

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sample-project")
        .join(relative)
}

/// Writes a config file using the fixture license catalog
fn catalog_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("license-info.config.yml");
    fs::write(
        &config_path,
        format!(
            "license_catalog:\n  file: {}\ncache:\n  ttl_minutes: 1\n",
            fixture_path("licenses.json").display()
        ),
    )
    .unwrap();
    config_path
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("license-info").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("license-info").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("license-info")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("license-info").assert().code(2);
    }

    /// Exit code 1: Application error - unknown generator
    #[test]
    fn test_exit_code_unknown_generator() {
        cargo_bin_cmd!("license-info")
            .args(["generate", "-m", MANIFEST, "-g", "Foo"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Unknown output generator: Foo"));
    }

    /// Exit code 1: Application error - missing manifest
    #[test]
    fn test_exit_code_missing_manifest() {
        cargo_bin_cmd!("license-info")
            .args([
                "generate",
                "-m",
                "/nonexistent/project.toml",
                "-g",
                "TextGenerator::DISCLOSURE",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("project manifest"));
    }
}

mod generate_tests {
    use super::*;

    #[test]
    fn test_generate_text_disclosure() {
        cargo_bin_cmd!("license-info")
            .args(["generate", "-m", MANIFEST, "-g", "TextGenerator::DISCLOSURE"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Open Source Software used in Sample Project"))
            .stdout(predicate::str::contains("libfoo 1.0"))
            .stdout(predicate::str::contains("libbar 2.3"))
            .stdout(predicate::str::contains("bundle 5.0"))
            .stdout(predicate::str::contains("zlib 1.3"))
            .stdout(predicate::str::contains("License: Apache License 2.0"))
            .stdout(predicate::str::contains(
                "Error reading license information: No applicable parser has been found for the attachment",
            ))
            .stdout(predicate::str::contains("Source file: unscanned-0.1.bin"))
            .stdout(predicate::str::contains("Proprietary").not());
    }

    #[test]
    fn test_generate_text_report_with_catalog_todos() {
        let dir = TempDir::new().unwrap();
        let config = catalog_config(&dir);

        cargo_bin_cmd!("license-info")
            .args(["--config"])
            .arg(&config)
            .args(["generate", "-m", MANIFEST, "-g", "TextGenerator::REPORT"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Releases and Copyright Statements"))
            .stdout(predicate::str::contains("Copyright (c) 2020 Acme Inc."))
            .stdout(predicate::str::contains("Todo: Ship the NOTICE file"))
            .stdout(predicate::str::contains("Todo: todo not determined so far."));
    }

    #[test]
    fn test_generate_xhtml_to_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("disclosure.html");

        cargo_bin_cmd!("license-info")
            .args(["generate", "-m", MANIFEST, "-g", "XhtmlGenerator::DISCLOSURE", "-o"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.contains("<h1>Appendix - License Texts</h1>"));
        assert!(html.contains("class=\"error\""));
    }

    #[test]
    fn test_generate_docx_requires_output() {
        cargo_bin_cmd!("license-info")
            .args(["generate", "-m", MANIFEST, "-g", "DocxGenerator::DISCLOSURE"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--output"));
    }

    #[test]
    fn test_generate_docx_to_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("disclosure.docx");

        cargo_bin_cmd!("license-info")
            .args(["generate", "-m", MANIFEST, "-g", "DocxGenerator::REPORT", "-o"])
            .arg(&output)
            .assert()
            .success();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_generate_as_other_user() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("project.toml");
        fs::write(
            &manifest,
            r#"
[project]
name = "Restricted"

[[releases]]
id = "r1"
name = "secret"
version = "1.0"
readers = ["owner@example.com"]

[[releases.attachments]]
content_id = "att-1"
filename = "secret.spdx"
type = "OTHER"
"#,
        )
        .unwrap();

        cargo_bin_cmd!("license-info")
            .args(["generate", "-g", "TextGenerator::DISCLOSURE", "-m"])
            .arg(&manifest)
            .args(["--user", "intruder@example.com"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not allowed to read release r1"));
    }
}

mod listing_tests {
    use super::*;

    #[test]
    fn test_formats() {
        cargo_bin_cmd!("license-info")
            .arg("formats")
            .assert()
            .success()
            .stdout(predicate::str::contains("TextGenerator::DISCLOSURE"))
            .stdout(predicate::str::contains("TextGenerator::REPORT"))
            .stdout(predicate::str::contains("XhtmlGenerator::DISCLOSURE"))
            .stdout(predicate::str::contains("DocxGenerator::DISCLOSURE"))
            .stdout(predicate::str::contains("DocxGenerator::REPORT"))
            .stdout(predicate::str::contains("XhtmlGenerator::REPORT").not());
    }

    #[test]
    fn test_header() {
        cargo_bin_cmd!("license-info")
            .arg("header")
            .assert()
            .success()
            .stdout(predicate::str::contains("open source software components"))
            .stdout(predicate::str::contains("#").not());
    }

    #[test]
    fn test_inspect_prints_json_results() {
        let output = cargo_bin_cmd!("license-info")
            .args([
                "inspect",
                "-m",
                MANIFEST,
                "-r",
                "rel-libbar",
                "-a",
                "att-libbar-cli",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let results: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let results = results.as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["status"], "SUCCESS");
        assert_eq!(results[0]["name"], "libbar");
        assert_eq!(results[0]["version"], "2.3");
    }

    #[test]
    fn test_inspect_unknown_release() {
        cargo_bin_cmd!("license-info")
            .args(["inspect", "-m", MANIFEST, "-r", "rel-none", "-a", "att-1"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Release not found: rel-none"));
    }
}
