#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::snbt::{decode_text, encode_text};

fuzz_target!(|data: &[u8]| {
    let text = match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(_) => return,
    };

    if let Ok(tag) = decode_text(text) {
        for &pretty in &[false, true] {
            let out = encode_text(tag.value(), pretty);
            let again = decode_text(&out).unwrap();
            assert_eq!(encode_text(again.value(), pretty), out);
        }
    }
});
