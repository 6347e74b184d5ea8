//! Tests for error handling and CLI flags.

use crate::support::*;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_missing_root_shows_usage() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sealdir").unwrap();
    cmd.args(["-g", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_version_flag() {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sealdir").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_decrypt_and_encrypt_conflict() {
    let t = Test::new();
    let output = t.cmd().args(["-d", "-e"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_missing_secret_ring_reports_path() {
    let t = Test::new();
    let output = t.search(None);
    assert_failure(&output);
    assert_stderr_contains(&output, "secring.gpg");
}

#[test]
fn test_wrong_passphrase_exits_nonzero() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_encrypted("a.gpg", SAMPLE_SECRET, &[&alice]);

    let output = t
        .cmd()
        .env("SEALDIR_PASSPHRASE", "wrong")
        .output()
        .unwrap();
    assert_failure(&output);
    assert!(stdout(&output).is_empty());
    assert_stderr_contains(&output, "decryption failed");
}

#[test]
fn test_invalid_regex_exits_nonzero() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);

    let output = t.search(Some("(unclosed"));
    assert_failure(&output);
}

#[test]
fn test_unknown_recipient_exits_nonzero() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_access_list("mallory@example.com\n");
    t.write_plaintext("a.txt", "x\n");

    let output = t.encrypt();
    assert_failure(&output);
    assert_stderr_contains(&output, "mallory@example.com");
    assert!(!t.root().join("files/a.gpg").exists());
}
