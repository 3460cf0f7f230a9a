#![no_main]
use libfuzzer_sys::fuzz_target;
use bimpie::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding must reproduce the input exactly
    let Ok(mut image) = decode(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = encode(&image, enough::Unstoppable).expect("decoded image must encode");
    assert_eq!(reencoded, data, "roundtrip byte mismatch");

    // Transforms must keep the image encodable and decodable
    let (w, h) = (image.width(), image.height());
    let op = match data.len() % 3 {
        0 => Operation::FlipHorizontal,
        1 => Operation::FlipVertical,
        _ => Operation::RotateRight(data[data.len() - 1] as i32 - 128),
    };
    image.apply(op);
    image.rotate_right(4);
    let dims = (image.width(), image.height());
    assert!(dims == (w, h) || dims == (h, w));

    let encoded = encode(&image, enough::Unstoppable).expect("transformed image must encode");
    let decoded = decode(&encoded, enough::Unstoppable).expect("re-encoded data must decode");
    assert_eq!(decoded, image, "transformed roundtrip mismatch");
});
