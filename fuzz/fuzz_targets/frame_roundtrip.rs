#![no_main]
use std::io::Write;

use libfuzzer_sys::fuzz_target;
use lz4_flex::frame::{BlockMode, BlockSize, FrameEncoder, FrameInfo};
use unlz4r::io::decompress_stream;
use unlz4r::DecoderConfig;

fuzz_target!(|data: &[u8]| {
    let info = FrameInfo::new()
        .block_size(BlockSize::Max64KB)
        .block_mode(BlockMode::Independent)
        .block_checksums(true)
        .content_checksum(true)
        .content_size(Some(data.len() as u64));
    let mut enc = FrameEncoder::with_frame_info(info, Vec::new());
    enc.write_all(data).unwrap();
    let frame = enc.finish().unwrap();

    let mut out = Vec::new();
    decompress_stream(&mut &frame[..], &mut out, DecoderConfig::new().verify_checksums(true))
        .expect("valid frame must decode");
    assert_eq!(out, data);
});
