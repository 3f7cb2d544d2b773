//! Configuration file handling through the binary

use super::{requeues, stderr, stdout};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_selects_store() {
    let file = config_file("[store]\nurl = \"memory://\"\n[queue]\nblock_size = 1\n");
    let path = file.path().to_str().unwrap();

    let output = requeues(&["--config-file", path, "-q", "a", "push", "egg", "spam"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "2\n");
}

#[test]
fn test_missing_config_file_fails() {
    let output = requeues(&["--config-file", "/nonexistent/requeues.toml", "version"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist"));
}

#[test]
fn test_invalid_config_value_fails() {
    let file = config_file("[queue]\nblock_size = 0\n");
    let path = file.path().to_str().unwrap();

    let output = requeues(&["--config-file", path, "version"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("block_size"));
}

#[test]
fn test_cli_store_url_overrides_config() {
    let file = config_file("[store]\nurl = \"redis://127.0.0.1:1/\"\n");
    let path = file.path().to_str().unwrap();

    let output = requeues(&["-c", path, "-u", "memory://", "-q", "a", "len"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0\n");
}
