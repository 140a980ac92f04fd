//! Error-handling end-to-end tests.
//!
//! Feeds damaged frames through the public API and checks that every failure
//! is reported as the right `FrameError`, never as a panic or silently wrong
//! output.

use std::io::{ErrorKind, Read, Write};

use lz4_flex::frame::{BlockMode, BlockSize, FrameEncoder, FrameInfo};
use unlz4r::{decompress_frame_to_vec, DecoderConfig, FrameDecoder, FrameError};

fn encode(data: &[u8], block_checksums: bool) -> Vec<u8> {
    let info = FrameInfo::new()
        .block_size(BlockSize::Max64KB)
        .block_mode(BlockMode::Independent)
        .block_checksums(block_checksums)
        .content_checksum(true);
    let mut enc = FrameEncoder::with_frame_info(info, Vec::new());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

fn text(len: usize) -> Vec<u8> {
    (0..len).map(|i| b"abcdefghij\n"[i % 11]).collect()
}

fn decode_with(frame: &[u8], config: DecoderConfig) -> Result<Vec<u8>, FrameError> {
    let mut out = Vec::new();
    FrameDecoder::with_config(frame, config).read_to_end(&mut out)?;
    Ok(out)
}

#[test]
fn every_truncation_point_fails_cleanly() {
    let frame = encode(&text(5000), true);
    for cut in 0..frame.len() {
        let err = decompress_frame_to_vec(&frame[..cut]).unwrap_err();
        assert!(
            matches!(err, FrameError::TruncatedStream),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn every_single_bit_flip_is_caught_when_verifying() {
    let data = text(2000);
    let frame = encode(&data, true);
    let strict = DecoderConfig::new().verify_checksums(true);
    for pos in 0..frame.len() {
        let mut damaged = frame.clone();
        damaged[pos] ^= 0x04;
        match decode_with(&damaged, strict) {
            Ok(out) => panic!("flip at {pos} went unnoticed ({} bytes decoded)", out.len()),
            Err(FrameError::Io(e)) => panic!("flip at {pos} surfaced as plain I/O error: {e}"),
            Err(_) => {}
        }
    }
}

#[test]
fn bit_flips_never_panic_in_permissive_mode() {
    let frame = encode(&text(3000), false);
    for pos in 0..frame.len() {
        for mask in [0x01u8, 0x80] {
            let mut damaged = frame.clone();
            damaged[pos] ^= mask;
            let _ = decode_with(&damaged, DecoderConfig::default());
        }
    }
}

#[test]
fn source_errors_pass_through() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::PermissionDenied, "denied"))
        }
    }
    let err = FrameDecoder::new(Broken)
        .read_to_end(&mut Vec::new())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
}

#[test]
fn source_errors_end_the_frame() {
    // After a failed refill the decoder cannot know where the source stands,
    // so it serves nothing more even if the source recovers.
    struct FailOnce<'a> {
        failed: bool,
        data: &'a [u8],
    }
    impl Read for FailOnce<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(std::io::Error::new(ErrorKind::TimedOut, "slow"));
            }
            self.data.read(buf)
        }
    }
    let data = text(100);
    let frame = encode(&data, false);
    let mut decoder = FrameDecoder::new(FailOnce {
        failed: false,
        data: &frame,
    });
    assert_eq!(
        decoder.read(&mut [0u8; 16]).unwrap_err().kind(),
        ErrorKind::TimedOut
    );
    assert!(decoder.is_ended());
    let mut out = Vec::new();
    assert_eq!(decoder.read_to_end(&mut out).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn truncated_frame_stays_ended() {
    let data = text(5000);
    let frame = encode(&data, false);
    let mut decoder = FrameDecoder::new(&frame[..frame.len() / 2]);
    let mut out = Vec::new();
    assert_eq!(
        decoder.read_to_end(&mut out).unwrap_err().kind(),
        ErrorKind::UnexpectedEof
    );
    assert!(data.starts_with(&out));
    assert_eq!(decoder.read(&mut [0u8; 16]).unwrap(), 0);
}
