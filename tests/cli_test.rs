//! Command line tests for the `inch` binary

mod common;

use assert_cmd::Command;
use common::{decode_hex_literal, make_folder};
use inch_rs::{read_entry, EntryLookup};
use std::fs;
use tempfile::TempDir;

fn inch() -> Command {
    Command::cargo_bin("inch").unwrap()
}

#[test]
fn test_embed_prints_declarations() {
    let temp_dir = TempDir::new().unwrap();
    make_folder(temp_dir.path(), "greeting", &[("hello.txt", b"Hi")]);

    inch()
        .current_dir(temp_dir.path())
        .arg("greeting")
        .assert()
        .success()
        .stdout("void* greeting_data(void);\nuint64_t greeting_size(void);\n");

    let text = fs::read_to_string(temp_dir.path().join("src/resources.c")).unwrap();
    let archive = decode_hex_literal(&text);
    assert_eq!(
        read_entry(&archive, "hello.txt").unwrap(),
        EntryLookup::Found(b"Hi".to_vec())
    );
    assert!(!temp_dir.path().join("greeting.zip").exists());
}

#[test]
fn test_trailing_separator_and_output_flag() {
    let temp_dir = TempDir::new().unwrap();
    make_folder(temp_dir.path(), "media", &[("a.txt", b"a")]);

    inch()
        .current_dir(temp_dir.path())
        .args(["media/", "--output", "gen/media.c", "--encoding", "decimal-array"])
        .assert()
        .success()
        .stdout("char media[];\n");

    let text = fs::read_to_string(temp_dir.path().join("gen/media.c")).unwrap();
    assert!(text.starts_with("char media[]={"));
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    make_folder(temp_dir.path(), "media", &[("a.txt", b"a")]);
    fs::write(
        temp_dir.path().join("inch.toml"),
        "output_path = \"out/res.c\"\nkeep_archive = true\n",
    )
    .unwrap();

    inch()
        .current_dir(temp_dir.path())
        .args(["media", "--config", "inch.toml", "--name", "assets"])
        .assert()
        .success()
        .stdout("void* assets_data(void);\nuint64_t assets_size(void);\n");

    assert!(temp_dir.path().join("out/res.c").exists());
    assert!(temp_dir.path().join("media.zip").exists());
}

#[test]
fn test_requires_folder_argument() {
    for args in [&[][..], &["one", "two"][..]] {
        let assert = inch().args(args).assert().failure().code(2).stdout("");

        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
        assert!(stderr.contains("Usage: inch"), "{}", stderr);
        assert!(stderr.contains("void* <name>_data(void);"), "{}", stderr);
        assert!(stderr.contains("uint64_t <name>_size(void);"), "{}", stderr);
    }
}

#[test]
fn test_verbose_logs_progress() {
    let temp_dir = TempDir::new().unwrap();
    make_folder(temp_dir.path(), "media", &[("a.txt", b"a")]);

    let assert = inch()
        .current_dir(temp_dir.path())
        .args(["media", "-vv"])
        .assert()
        .success()
        .stdout("void* media_data(void);\nuint64_t media_size(void);\n");

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("encoding: "), "{}", stderr);
}

#[test]
fn test_missing_folder_fails() {
    let temp_dir = TempDir::new().unwrap();

    inch()
        .current_dir(temp_dir.path())
        .arg("absent")
        .assert()
        .failure()
        .stdout("");

    assert!(!temp_dir.path().join("src/resources.c").exists());
}

#[test]
fn test_help_lists_accessors() {
    let output = inch().arg("--help").output().unwrap();
    assert!(output.status.success());

    let help = String::from_utf8(output.stdout).unwrap();
    assert!(help.contains("void* <name>_data(void);"));
    assert!(help.contains("uint64_t <name>_size(void);"));
}
