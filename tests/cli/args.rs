// Integration tests for src/cli/args.rs: argument resolution

use std::fs;

use clap::Parser;
use tempfile::TempDir;
use unlz4r::cli::args::{Args, Destination};
use unlz4r::io::STDIN_MARK;

fn resolve(argv: &[&str]) -> anyhow::Result<unlz4r::cli::args::Invocation> {
    let mut full = vec!["unlz4r"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full)?.into_plan_with_env(None, None)
}

#[test]
fn recursive_expands_directories_to_lz4_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("one.lz4"), b"").unwrap();
    fs::write(dir.path().join("readme.txt"), b"").unwrap();
    fs::write(dir.path().join("nested/two.lz4"), b"").unwrap();

    let inv = resolve(&["-r", dir.path().to_str().unwrap()]).unwrap();
    assert_eq!(inv.inputs.len(), 2);
    assert!(inv.inputs.iter().all(|p| p.ends_with(".lz4")));
    assert_eq!(inv.destination, Destination::StripSuffix);
}

#[test]
fn recursive_with_no_matches_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("plain.txt"), b"").unwrap();
    assert!(resolve(&["-r", dir.path().to_str().unwrap()]).is_err());
}

#[test]
fn stdout_flag_sends_everything_to_stdout() {
    let inv = resolve(&["-c", "a.lz4", "b.lz4"]).unwrap();
    assert_eq!(inv.destination, Destination::Stdout);
    assert_eq!(inv.inputs, vec!["a.lz4", "b.lz4"]);
}

#[test]
fn output_dash_means_stdout() {
    let inv = resolve(&["-o", "-", "a.lz4"]).unwrap();
    assert_eq!(inv.destination, Destination::Stdout);
}

#[test]
fn stdin_with_explicit_output() {
    let inv = resolve(&["-o", "plain.bin"]).unwrap();
    assert_eq!(inv.inputs, vec![STDIN_MARK]);
    assert_eq!(inv.destination, Destination::File("plain.bin".into()));
}

#[test]
fn flags_reach_prefs() {
    let inv = resolve(&["-f", "--rm", "--verify", "-T", "2", "a.lz4"]).unwrap();
    assert!(inv.prefs.overwrite);
    assert!(inv.prefs.remove_src_file);
    assert!(inv.prefs.verify_checksums);
    assert_eq!(inv.prefs.nb_workers, 2);
}

#[test]
fn unknown_flag_is_rejected() {
    assert!(Args::try_parse_from(["unlz4r", "--compress", "a"]).is_err());
}
