// Integration tests for src/frame/header.rs: header parsing helpers

use std::io::Read;

use unlz4r::frame::{decode_prefix, header_checksum, read_frame_header, read_fully};
use unlz4r::{BlockMaxSize, FrameError};

use super::support::{header, FrameOpts, SCENARIO_A};

#[test]
fn scenario_a_header_checksum_byte() {
    assert_eq!(header_checksum(&[0x64, 0x40]), 0xA7);
}

#[test]
fn prefix_flags_are_decoded() {
    let prefix = [0x04, 0x22, 0x4D, 0x18, 0x7C, 0x50];
    let d = decode_prefix(&prefix).unwrap();
    assert!(d.block_independent);
    assert!(d.block_checksum);
    assert!(d.content_checksum);
    assert!(d.has_content_size());
    assert_eq!(d.block_max_size, BlockMaxSize::Max256Kb);
    assert_eq!(d.trailing_header_len(), 9);
}

#[test]
fn header_reads_exactly_its_own_bytes() {
    let mut src = &SCENARIO_A[..];
    let d = read_frame_header(&mut src, true).unwrap();
    assert_eq!(d.header_checksum, 0xA7);
    assert_eq!(d.content_size, None);
    assert_eq!(src.len(), SCENARIO_A.len() - 7);
}

#[test]
fn content_size_field_is_parsed() {
    let opts = FrameOpts {
        content_size: Some(0x0102_0304_0506),
        ..FrameOpts::default()
    };
    let bytes = header(opts);
    assert_eq!(bytes.len(), 15);
    let d = read_frame_header(&mut &bytes[..], true).unwrap();
    assert_eq!(d.content_size, Some(0x0102_0304_0506));
    assert_eq!(d.header_len(), 15);
}

#[test]
fn wrong_header_checksum_only_matters_when_verifying() {
    let mut bytes = SCENARIO_A[..7].to_vec();
    bytes[6] ^= 0xFF;
    assert!(read_frame_header(&mut &bytes[..], false).is_ok());
    let err = read_frame_header(&mut &bytes[..], true).unwrap_err();
    assert!(matches!(
        err,
        FrameError::HeaderChecksumMismatch { expected: 0x58, actual: 0xA7 }
    ));
}

#[test]
fn read_fully_loops_over_short_reads() {
    struct Chunked<'a>(&'a [u8]);
    impl Read for Chunked<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(self.0.len()).min(3);
            buf[..n].copy_from_slice(&self.0[..n]);
            self.0 = &self.0[n..];
            Ok(n)
        }
    }
    let mut dst = [0u8; 10];
    read_fully(&mut Chunked(b"0123456789"), &mut dst).unwrap();
    assert_eq!(&dst, b"0123456789");
}

#[test]
fn read_fully_reports_truncation() {
    let mut dst = [0u8; 8];
    let err = read_fully(&mut &b"short"[..], &mut dst).unwrap_err();
    assert!(matches!(err, FrameError::TruncatedStream));
}

#[test]
fn read_fully_retries_interrupted_reads() {
    struct Flaky {
        interrupted: bool,
        data: &'static [u8],
    }
    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::ErrorKind::Interrupted.into());
            }
            self.data.read(buf)
        }
    }
    let mut src = Flaky {
        interrupted: false,
        data: b"abcd",
    };
    let mut dst = [0u8; 4];
    read_fully(&mut src, &mut dst).unwrap();
    assert_eq!(&dst, b"abcd");
}
