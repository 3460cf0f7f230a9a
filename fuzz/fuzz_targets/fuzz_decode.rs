#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    let _ = bimpie::probe(data);
    let _ = bimpie::decode(data, enough::Unstoppable);
    let _ = bimpie::DecodeRequest::new(data)
        .with_permissiveness(bimpie::BmpPermissiveness::Strict)
        .decode(enough::Unstoppable);
});
