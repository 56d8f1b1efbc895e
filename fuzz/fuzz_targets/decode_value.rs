#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes_with_opts, to_bytes, DecodeOpts, Flavor};

fuzz_target!(|data: &[u8]| {
    for flavor in [Flavor::BigEndian, Flavor::LittleEndian, Flavor::Network] {
        let opts = DecodeOpts::new().max_seq_len(100);
        if let Ok(Some(tag)) = from_bytes_with_opts(data, flavor, opts) {
            // Anything decoded holds homogeneous lists, so it must encode.
            let _bs = to_bytes(&tag, flavor).unwrap();
        }
    }
});
