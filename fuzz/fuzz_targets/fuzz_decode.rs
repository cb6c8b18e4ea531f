#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{Bitmap24, Bitmap32, Limits, Permissiveness};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Limits::default()
    };

    // Every validation level and pixel type must reject or accept without panicking
    for level in [
        Permissiveness::Strict,
        Permissiveness::Standard,
        Permissiveness::Permissive,
    ] {
        let _ = Bitmap24::new()
            .with_limits(limits.clone())
            .with_permissiveness(level)
            .decode(data);
        let _ = Bitmap32::new()
            .with_limits(limits.clone())
            .with_permissiveness(level)
            .decode(data);
    }
});
