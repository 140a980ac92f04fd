#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;
use unlz4r::{DecoderConfig, FrameDecoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors, never panics.
    let _ = unlz4r::decompress_frame_to_vec(data);

    // Verifying decoder, driven through the mixed byte-source surface.
    let mut decoder = FrameDecoder::with_config(data, DecoderConfig::new().verify_checksums(true));
    let mut buf = [0u8; 97];
    loop {
        let step = match decoder.read_byte() {
            Ok(Some(b)) => usize::from(b),
            Ok(None) | Err(_) => break,
        };
        let ok = if step % 3 == 0 {
            decoder.skip(step as u64).is_ok()
        } else {
            decoder.read(&mut buf[..step % buf.len()]).is_ok()
        };
        assert!(decoder.available() <= 4 << 20);
        if !ok {
            break;
        }
    }
});
