//! Tests for the search, decrypt-root and encrypt-root modes.

use crate::support::*;

#[test]
fn test_search_with_pattern() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_encrypted("a.gpg", SAMPLE_SECRET, &[&alice]);

    let output = t.search(Some("accountA"));
    assert_success(&output);

    let header = t.root().join("files").join("a.gpg").display().to_string();
    assert_eq!(stdout(&output), format!("{}\n3:accountA=xyz\n\n", header));
}

#[test]
fn test_search_without_pattern_prints_everything() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_encrypted("a.gpg", SAMPLE_SECRET, &[&alice]);

    let output = t.search(None);
    assert_success(&output);
    assert_eq!(stdout(&output), SAMPLE_SECRET);
}

#[test]
fn test_decrypt_mode_writes_plaintext() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_encrypted("a.gpg", SAMPLE_SECRET, &[&alice]);

    let output = t.decrypt();
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted 1 file");
    assert_eq!(t.read("a.txt"), SAMPLE_SECRET);
}

#[test]
fn test_encrypt_mode_needs_no_passphrase() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_access_list("alice@example.com\n");
    t.write_plaintext("a.txt", SAMPLE_SECRET);

    let output = t
        .cmd()
        .arg("-e")
        .env_remove("SEALDIR_PASSPHRASE")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted 1 file");
    assert!(t.read("files/a.gpg").starts_with("-----BEGIN PGP MESSAGE-----"));
}

#[test]
fn test_encrypt_then_search_roundtrip() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    t.write_access_list("alice@example.com\n");
    t.write_plaintext("a.txt", SAMPLE_SECRET);

    assert_success(&t.encrypt());

    let output = t.search(None);
    assert_success(&output);
    assert_eq!(stdout(&output), SAMPLE_SECRET);
}

#[test]
fn test_config_file_layout() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    let vault = t.root().join("vault");
    std::fs::create_dir_all(&vault).unwrap();
    std::fs::write(
        vault.join("a.asc"),
        encrypt_for(b"custom layout\n", &[&alice]),
    )
    .unwrap();

    let config = t.keys.path().join("config.toml");
    std::fs::write(
        &config,
        "[layout]\nfiles_dir = \"vault\"\nencrypted_suffix = \"asc\"\n",
    )
    .unwrap();

    let output = t.cmd().arg("-c").arg(&config).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "custom layout\n");
}

#[test]
fn test_config_path_under_home() {
    let alice = Identity::generate("alice@example.com");
    let t = Test::with_keys(&[&alice], &[&alice]);
    let vault = t.root().join("vault");
    std::fs::create_dir_all(&vault).unwrap();
    std::fs::write(vault.join("a.gpg"), encrypt_for(b"from home config\n", &[&alice])).unwrap();
    std::fs::write(
        t.home.path().join("sealdir.toml"),
        "[layout]\nfiles_dir = \"vault\"\n",
    )
    .unwrap();

    let output = t.cmd().args(["-c", "~/sealdir.toml"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "from home config\n");
}
