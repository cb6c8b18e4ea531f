#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let mut decoded = Bitmap24::new()
        .with_permissiveness(Permissiveness::Permissive)
        .with_limits(Limits {
            max_memory_bytes: Some(64 << 20),
            ..Limits::default()
        });
    if decoded.decode(data).is_err() {
        return;
    }

    let Ok(reencoded) = decoded.encode() else {
        return;
    };
    assert_eq!(reencoded.len() % 4, 0, "unaligned output length");

    let mut decoded2 = Bitmap24::new();
    if decoded2.decode(&reencoded).is_err() {
        panic!("re-encoded data failed to decode");
    }

    assert_eq!(decoded.pixels().unwrap(), decoded2.pixels().unwrap(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width().unwrap(), decoded2.width().unwrap());
    assert_eq!(decoded.height().unwrap(), decoded2.height().unwrap());
    assert_eq!(decoded.read_reserved().unwrap(), decoded2.read_reserved().unwrap());
});
