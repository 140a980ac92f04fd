// e2e/cli_integration.rs: black-box tests of the `unlz4r` binary
//
// Drives the binary with std::process::Command. Covers file-to-file
// decoding, stdin/stdout piping, test mode, overwrite protection, source
// removal, recursive mode and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use lz4_flex::frame::{BlockMode, FrameEncoder, FrameInfo};
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_unlz4r"))
}

fn encode(data: &[u8]) -> Vec<u8> {
    let info = FrameInfo::new()
        .block_mode(BlockMode::Independent)
        .content_checksum(true);
    let mut enc = FrameEncoder::with_frame_info(info, Vec::new());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn content() -> Vec<u8> {
    "Hello, LZ4 frame!\n".repeat(512).into_bytes()
}

fn write_lz4(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, encode(data)).unwrap();
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run unlz4r")
}

fn run_with_stdin(dir: &Path, args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn unlz4r");
    let mut stdin = child.stdin.take().unwrap();
    let input = input.to_vec();
    let writer = std::thread::spawn(move || stdin.write_all(&input));
    let out = child.wait_with_output().unwrap();
    writer.join().unwrap().unwrap();
    out
}

// ── Files ────────────────────────────────────────────────────────────────────

#[test]
fn decodes_file_next_to_source() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "notes.txt.lz4", &content());

    let out = run(dir.path(), &[src.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), content());
    assert!(src.exists(), "source kept by default");
}

#[test]
fn explicit_output_path() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "in.lz4", b"explicit");
    let out = run(dir.path(), &["-o", "chosen.bin", src.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("chosen.bin")).unwrap(), b"explicit");
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "data.lz4", b"new");
    fs::write(dir.path().join("data"), b"old").unwrap();

    let out = run(dir.path(), &[src.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("data")).unwrap(), b"old");

    let out = run(dir.path(), &["-f", src.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(fs::read(dir.path().join("data")).unwrap(), b"new");
}

#[test]
fn rm_removes_source() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "gone.lz4", b"bye");
    let out = run(dir.path(), &["--rm", src.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(!src.exists());
    assert_eq!(fs::read(dir.path().join("gone")).unwrap(), b"bye");
}

#[test]
fn recursive_directory() {
    let dir = TempDir::new().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir_all(tree.join("deep")).unwrap();
    write_lz4(&tree, "a.lz4", b"A");
    write_lz4(&tree.join("deep"), "b.lz4", b"B");
    fs::write(tree.join("ignored.txt"), b"plain").unwrap();

    let out = run(dir.path(), &["-r", "-T", "2", "tree"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(tree.join("a")).unwrap(), b"A");
    assert_eq!(fs::read(tree.join("deep/b")).unwrap(), b"B");
}

// ── Pipes ────────────────────────────────────────────────────────────────────

#[test]
fn stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let out = run_with_stdin(dir.path(), &[], &encode(&content()));
    assert!(out.status.success());
    assert_eq!(out.stdout, content());
}

#[test]
fn concatenated_files_to_stdout_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_lz4(dir.path(), "a.lz4", b"first;");
    let b = write_lz4(dir.path(), "b.lz4", b"second");
    let out = run(dir.path(), &["-c", a.to_str().unwrap(), b.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"first;second");
}

#[test]
fn concatenated_frames_on_stdin() {
    let dir = TempDir::new().unwrap();
    let mut stream = encode(b"one ");
    stream.extend_from_slice(&encode(b"two"));
    let out = run_with_stdin(dir.path(), &["-"], &stream);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"one two");
}

// ── Test mode and failures ───────────────────────────────────────────────────

#[test]
fn test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "check.lz4", &content());
    let out = run(dir.path(), &["-t", src.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!dir.path().join("check").exists());
}

#[test]
fn corrupt_input_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let mut frame = encode(&content());
    let last = frame.len() - 1;
    frame[last] ^= 0xFF;
    fs::write(dir.path().join("bad.lz4"), &frame).unwrap();

    let out = run(dir.path(), &["-t", "bad.lz4"]);
    assert!(out.status.success(), "content checksum is not checked by default");

    let out = run(dir.path(), &["-t", "--verify", "bad.lz4"]);
    assert_eq!(out.status.code(), Some(1));

    let out = Command::new(bin())
        .args(["-t", "bad.lz4"])
        .env("LZ4_VERIFY", "1")
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn wrong_extension_is_skipped_with_failure_status() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plain.txt"), encode(b"x")).unwrap();
    let out = run(dir.path(), &["plain.txt"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn missing_file_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["does-not-exist.lz4"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn bad_usage_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let out = run(dir.path(), &["--no-such-flag"]);
    assert!(!out.status.success());
}

#[test]
fn quiet_mode_is_silent_on_success() {
    let dir = TempDir::new().unwrap();
    let src = write_lz4(dir.path(), "q.lz4", b"quiet");
    let out = run(dir.path(), &["-q", "-q", src.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty());
}
