#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Fuzz NDJSON event record parsing - this should never panic
        let _ = serde_json::from_str::<logplate::LogEvent>(text);
    }
});
