#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, fill: u8) -> Vec<u8> {
    let pad = (4 - (3 * width as usize) % 4) % 4;
    let size = 54 + height as usize * (3 * width as usize + pad);
    let mut bmp = vec![0u8; size];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes());
    bmp[22..26].copy_from_slice(&(height as i32).to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    let stride = 3 * width as usize + pad;
    for row in 0..height as usize {
        let start = 54 + row * stride;
        for b in &mut bmp[start..start + 3 * width as usize] {
            *b = fill.wrapping_add(row as u8);
        }
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 0xff)).unwrap();
    fs::write(format!("{dir}/bmp_2x2.bmp"), bmp(2, 2, 0)).unwrap();
    fs::write(format!("{dir}/bmp_3x5.bmp"), bmp(3, 5, 0x40)).unwrap();
    fs::write(format!("{dir}/bmp_4x1.bmp"), bmp(4, 1, 0x80)).unwrap();

    // Truncated/malformed seeds for edge coverage
    let mut truncated = bmp(3, 3, 0x10);
    truncated.pop();
    fs::write(format!("{dir}/truncated.bin"), truncated).unwrap();
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
