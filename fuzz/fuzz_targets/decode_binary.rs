#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::binary::{decode_binary, encode_binary};

fuzz_target!(|data: &[u8]| {
    if let Ok((tag, consumed)) = decode_binary(data, 0) {
        assert!(consumed <= data.len());

        // Duplicate keys collapse, so only the length is comparable.
        let bs = encode_binary(&tag).unwrap();
        assert_eq!(bs.len(), tag.byte_len());

        let (again, _) = decode_binary(&bs, 0).unwrap();
        assert_eq!(again.byte_len(), tag.byte_len());
    }
});
