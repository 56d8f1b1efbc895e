#![no_main]
use libfuzzer_sys::fuzz_target;

use nbtree::{from_bytes, to_bytes, Flavor, NamedTag, Value};

fuzz_target!(|v: Value| {
    let tag = NamedTag::new("", v);

    if let Ok(bs) = to_bytes(&tag, Flavor::Network) {
        // The encoder enforces the default decode limits.
        let back = from_bytes(&bs, Flavor::Network).unwrap();
        assert_eq!(back.map(|t| t.value().is_valid()), Some(true));
    }
});
