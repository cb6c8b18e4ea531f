#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, raw: u32) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + raw).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp[34..38].copy_from_slice(&raw.to_le_bytes());
    bmp[38..42].copy_from_slice(&2835i32.to_le_bytes()); // 72 DPI
    bmp[42..46].copy_from_slice(&2835i32.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1, padded to 60 bytes
    let mut bmp = header(1, 1, 24, 3);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0, 0, 0]);
    fs::write(format!("{dir}/bgr24_1x1.bmp"), bmp).unwrap();

    // 24-bit 3x2
    let mut bmp = header(3, 2, 24, 18);
    bmp.extend((0..18u8).map(|i| i * 13));
    bmp.extend_from_slice(&[0, 0]);
    fs::write(format!("{dir}/bgr24_3x2.bmp"), bmp).unwrap();

    // 32-bit 2x2
    let mut bmp = header(2, 2, 32, 16);
    bmp.extend((0..16u8).map(|i| i * 17));
    fs::write(format!("{dir}/bgr32_2x2.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(4, 4, 24, 48)).unwrap();
    fs::write(format!("{dir}/top_down.bin"), header(2, -2, 24, 12)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
