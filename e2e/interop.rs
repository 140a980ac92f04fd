//! Interoperability tests: frames written by other encoders.
//!
//! lz4_flex's frame encoder is always available. When a system `lz4` binary
//! is found (or `LZ4_BIN` points at one) its output is decoded as well;
//! otherwise those tests print a skip message and return.

use std::io::{Read, Write};
use std::process::{Command, Stdio};

use lz4_flex::frame::{BlockMode, BlockSize, FrameEncoder, FrameInfo};
use unlz4r::io::decompress_stream;
use unlz4r::{DecoderConfig, FrameDecoder};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn system_lz4() -> Option<String> {
    if let Ok(p) = std::env::var("LZ4_BIN") {
        if std::path::Path::new(&p).exists() {
            return Some(p);
        }
    }
    let out = Command::new("which").arg("lz4").output().ok()?;
    if out.status.success() {
        let path = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if !path.is_empty() {
            return Some(path);
        }
    }
    None
}

fn corpus(len: usize) -> Vec<u8> {
    let words = [
        "frame", "block", "checksum", "decoder", "stream", "buffer", "marker", "header",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[(i * 7 + i / 5) % words.len()].as_bytes());
        out.push(if i % 11 == 0 { b'\n' } else { b' ' });
        i += 1;
    }
    out.truncate(len);
    out
}

fn flex_encode(info: FrameInfo, data: &[u8]) -> Vec<u8> {
    let mut enc = FrameEncoder::with_frame_info(info, Vec::new());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn strict() -> DecoderConfig {
    DecoderConfig::new().verify_checksums(true)
}

fn decode_strict(frame: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    FrameDecoder::with_config(frame, strict())
        .read_to_end(&mut out)
        .unwrap();
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// lz4_flex encoder
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn flex_every_block_size() {
    let data = corpus(600_000);
    for size in [
        BlockSize::Max64KB,
        BlockSize::Max256KB,
        BlockSize::Max1MB,
        BlockSize::Max4MB,
    ] {
        let info = FrameInfo::new()
            .block_size(size)
            .block_mode(BlockMode::Independent)
            .content_checksum(true);
        assert_eq!(decode_strict(&flex_encode(info, &data)), data, "{size:?}");
    }
}

#[test]
fn flex_all_optional_fields() {
    let data = corpus(250_000);
    let info = FrameInfo::new()
        .block_size(BlockSize::Max64KB)
        .block_mode(BlockMode::Independent)
        .block_checksums(true)
        .content_checksum(true)
        .content_size(Some(data.len() as u64));
    let frame = flex_encode(info, &data);

    let mut decoder = FrameDecoder::with_config(&frame[..], strict());
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
    let d = decoder.descriptor().unwrap();
    assert!(d.block_checksum);
    assert_eq!(d.content_size, Some(data.len() as u64));
}

#[test]
fn flex_incompressible_data() {
    let mut state = 0x1234_5678u32;
    let data: Vec<u8> = (0..200_000)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    let info = FrameInfo::new()
        .block_size(BlockSize::Max64KB)
        .block_mode(BlockMode::Independent)
        .content_checksum(true);
    assert_eq!(decode_strict(&flex_encode(info, &data)), data);
}

#[test]
fn flex_frames_concatenated() {
    let a = corpus(1000);
    let b = corpus(99_999);
    let info = || FrameInfo::new().block_mode(BlockMode::Independent);
    let mut stream = flex_encode(info(), &a);
    stream.extend_from_slice(&flex_encode(info(), &b));

    let mut out = Vec::new();
    let stats = decompress_stream(&mut &stream[..], &mut out, strict()).unwrap();
    assert_eq!(stats.frames, 2);
    assert_eq!(out.len(), a.len() + b.len());
    assert_eq!(&out[..a.len()], &a[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// System lz4 binary
// ─────────────────────────────────────────────────────────────────────────────

fn system_compress(bin: &str, args: &[&str], data: &[u8]) -> Vec<u8> {
    let mut child = Command::new(bin)
        .args(args)
        .arg("-c")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn lz4");
    let mut stdin = child.stdin.take().unwrap();
    let input = data.to_vec();
    let writer = std::thread::spawn(move || stdin.write_all(&input));
    let out = child.wait_with_output().expect("wait lz4");
    writer.join().unwrap().unwrap();
    assert!(out.status.success());
    out.stdout
}

#[test]
fn system_lz4_default_frame() {
    let Some(bin) = system_lz4() else {
        eprintln!("system lz4 not found; skipping");
        return;
    };
    let data = corpus(300_000);
    let frame = system_compress(&bin, &[], &data);
    assert_eq!(decode_strict(&frame), data);
}

#[test]
fn system_lz4_block_checksums_and_sizes() {
    let Some(bin) = system_lz4() else {
        eprintln!("system lz4 not found; skipping");
        return;
    };
    let data = corpus(700_000);
    for args in [["-B4", "-BX"], ["-B5", "-BX"], ["-B6", "-BX"], ["-B7", "-BX"]] {
        let frame = system_compress(&bin, &args, &data);
        assert_eq!(decode_strict(&frame), data, "{args:?}");
    }
}
