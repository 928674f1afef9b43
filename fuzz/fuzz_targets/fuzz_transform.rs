#![no_main]

use libfuzzer_sys::fuzz_target;

// Accepts arbitrary bytes, treats valid UTF-8 as introspection JSON and feeds
// it through the whole pipeline. Goal: no panics, even on malformed input.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = introspection_codegen_core::transform_json(text, &Default::default());
    }
});
