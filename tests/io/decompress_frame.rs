// Integration tests for src/io/decompress_frame.rs: stream decoding

use std::io::{BufReader, ErrorKind};

use unlz4r::io::{decompress_stream, decompress_stream_default, DecodeStats};
use unlz4r::{DecoderConfig, FrameError};

use super::support::{compress, compress_with, frame_info, sample};

#[test]
fn single_frame_stream() {
    let data = sample(150_000);
    let frame = compress(&data);
    let mut out = Vec::new();
    let stats = decompress_stream_default(&mut &frame[..], &mut out).unwrap();
    assert_eq!(out, data);
    assert_eq!(
        stats,
        DecodeStats {
            frames: 1,
            decoded_bytes: data.len() as u64
        }
    );
}

#[test]
fn concatenated_frames_decode_in_order() {
    let parts = [sample(10), sample(70_000), Vec::new(), sample(3)];
    let mut stream = Vec::new();
    let mut expected = Vec::new();
    for part in &parts {
        stream.extend_from_slice(&compress(part));
        expected.extend_from_slice(part);
    }
    let mut out = Vec::new();
    let stats = decompress_stream_default(&mut &stream[..], &mut out).unwrap();
    assert_eq!(out, expected);
    assert_eq!(stats.frames, 4);
}

#[test]
fn small_source_buffer_does_not_matter() {
    let data = sample(90_000);
    let mut stream = compress(&data);
    stream.extend_from_slice(&compress(&data));
    let mut src = BufReader::with_capacity(7, &stream[..]);
    let mut out = Vec::new();
    decompress_stream_default(&mut src, &mut out).unwrap();
    assert_eq!(out.len(), 2 * data.len());
}

#[test]
fn verification_passes_on_encoder_output() {
    let data = sample(200_000);
    let info = frame_info()
        .block_checksums(true)
        .content_size(Some(data.len() as u64));
    let frame = compress_with(info, &data);
    let mut out = Vec::new();
    let config = DecoderConfig::new().verify_checksums(true);
    decompress_stream(&mut &frame[..], &mut out, config).unwrap();
    assert_eq!(out, data);
}

#[test]
fn garbage_after_a_frame_is_bad_magic() {
    let mut stream = compress(b"payload");
    stream.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x11, 0x22, 0x33]);
    let mut out = Vec::new();
    let err = decompress_stream_default(&mut &stream[..], &mut out).unwrap_err();
    assert_eq!(out, b"payload");
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(matches!(FrameError::from(err), FrameError::BadMagic(0xEFBE_ADDE)));
}

#[test]
fn empty_input_is_truncated() {
    let mut out = Vec::new();
    let err = decompress_stream_default(&mut &b""[..], &mut out).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
}

#[test]
fn truncated_second_frame_is_an_error() {
    let mut stream = compress(b"first");
    let second = compress(b"second");
    stream.extend_from_slice(&second[..second.len() - 3]);
    let mut out = Vec::new();
    let err = decompress_stream_default(&mut &stream[..], &mut out).unwrap_err();
    assert!(matches!(FrameError::from(err), FrameError::TruncatedStream));
}

#[test]
fn writer_failures_propagate() {
    struct Full;
    impl std::io::Write for Full {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
    let frame = compress(b"data");
    let err = decompress_stream_default(&mut &frame[..], &mut Full).unwrap_err();
    assert_eq!(err.to_string(), "disk full");
}
