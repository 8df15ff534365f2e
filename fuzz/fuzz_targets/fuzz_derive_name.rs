#![no_main]

use inch_rs::derive_name;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    if let Ok(name) = derive_name(input) {
        assert!(!name.is_empty());
        assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
});
