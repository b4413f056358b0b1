//! Generation Invariant Tests
//!
//! End-to-end checks of the generate pipeline against real directories.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use mcpgen_core::generator::{self, APPROVALS_SUBPATH, CONFIG_SUBPATH};

const SAMPLE: &str = r#"{
  "mcpServers": {
    "test-server": {
      "command": "node",
      "args": ["server.js"]
    },
    "another-server": {
      "command": "python",
      "args": ["-m", "server"]
    }
  }
}"#;

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("mcp.json");
    fs::write(&path, content).unwrap();
    path
}

fn read_approvals(out: &Path) -> Vec<String> {
    let content = fs::read_to_string(out.join(APPROVALS_SUBPATH)).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn invariant_generates_both_files() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), SAMPLE);
    let out = tmp.path().join("output");

    let files = generator::generate(&input, &out).unwrap();
    assert_eq!(files.config_path, out.join(CONFIG_SUBPATH));
    assert_eq!(files.approvals_path, out.join(APPROVALS_SUBPATH));

    // Copy is byte-identical to the input, not a re-serialization.
    let copied = fs::read_to_string(&files.config_path).unwrap();
    assert_eq!(copied, SAMPLE);

    let approvals = read_approvals(&out);
    assert_eq!(approvals.len(), 2);
    assert!(Regex::new(r"^test-server-[a-f0-9]{16}$")
        .unwrap()
        .is_match(&approvals[0]));
    assert!(Regex::new(r"^another-server-[a-f0-9]{16}$")
        .unwrap()
        .is_match(&approvals[1]));
}

#[test]
fn invariant_copy_preserves_formatting() {
    // Odd whitespace and key order must survive the round trip untouched.
    let raw = "{\"mcpServers\":\t{ \"s\" : {\"b\":1,\"a\":2} }\n}\n";
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), raw);
    let out = tmp.path().join("output");

    generator::generate(&input, &out).unwrap();

    let copied = fs::read(out.join(CONFIG_SUBPATH)).unwrap();
    assert_eq!(copied, raw.as_bytes());
}

#[test]
fn invariant_approvals_deterministic_across_directories() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), SAMPLE);
    let out1 = tmp.path().join("output1");
    let out2 = tmp.path().join("output2");

    generator::generate(&input, &out1).unwrap();
    generator::generate(&input, &out2).unwrap();

    let bytes1 = fs::read(out1.join(APPROVALS_SUBPATH)).unwrap();
    let bytes2 = fs::read(out2.join(APPROVALS_SUBPATH)).unwrap();
    assert_eq!(bytes1, bytes2);
}

#[test]
fn invariant_rerun_overwrites_existing_files() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("output");

    let input = write_input(tmp.path(), SAMPLE);
    generator::generate(&input, &out).unwrap();

    let input = write_input(tmp.path(), r#"{"mcpServers":{"only-one":{"command":"x"}}}"#);
    generator::generate(&input, &out).unwrap();

    let approvals = read_approvals(&out);
    assert_eq!(approvals.len(), 1);
    assert!(approvals[0].starts_with("only-one-"));
}

#[test]
fn invariant_entry_order_matches_input() {
    let raw = r#"{"mcpServers":{"zeta":{"command":"a"},"alpha":{"command":"b"},"mid":{"command":"c"}}}"#;
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), raw);
    let out = tmp.path().join("output");

    generator::generate(&input, &out).unwrap();

    let approvals = read_approvals(&out);
    assert_eq!(approvals.len(), 3);
    assert!(approvals[0].starts_with("zeta-"));
    assert!(approvals[1].starts_with("alpha-"));
    assert!(approvals[2].starts_with("mid-"));
}

#[test]
fn invariant_malformed_input_creates_no_outputs() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "{ invalid json }");
    let out = tmp.path().join("output");

    let err = generator::generate(&input, &out).unwrap_err();
    assert!(err.to_string().contains("Failed to parse mcp.json"));
    assert!(!out.exists());
}

#[test]
fn invariant_missing_servers_field_creates_no_outputs() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "{}");
    let out = tmp.path().join("output");

    let err = generator::generate(&input, &out).unwrap_err();
    assert!(err
        .to_string()
        .contains("missing or invalid 'mcpServers' field"));
    assert!(!out.exists());
}

#[test]
fn invariant_missing_input_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("output");

    let err = generator::generate(&tmp.path().join("nope.json"), &out).unwrap_err();
    assert!(matches!(err, generator::GeneratorError::Io(_)));
    assert!(!out.exists());
}

#[test]
fn invariant_empty_mapping_yields_empty_array() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), r#"{"mcpServers":{}}"#);
    let out = tmp.path().join("output");

    generator::generate(&input, &out).unwrap();

    let content = fs::read_to_string(out.join(APPROVALS_SUBPATH)).unwrap();
    assert_eq!(content, "[]\n");
}

#[test]
fn invariant_approvals_file_is_pretty_printed_with_newline() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), SAMPLE);
    let out = tmp.path().join("output");

    generator::generate(&input, &out).unwrap();

    let content = fs::read_to_string(out.join(APPROVALS_SUBPATH)).unwrap();
    assert!(content.starts_with("[\n  \""));
    assert!(content.ends_with("\"\n]\n"));
}
