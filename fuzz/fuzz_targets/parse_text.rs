#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|text: &str| {
    if let Some(value) = nbtree_snbt::parse(text) {
        assert!(value.is_valid());
    }
});
