#![no_main]

use libfuzzer_sys::fuzz_target;
use logplate::{Ambient, Level, LogEvent, RenderOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Any template that compiles must render without panicking
        if let Ok(plan) = logplate::compile(text) {
            let mut event = LogEvent::new(Level::Info, "fuzz");
            event.timestamp_ms = Some(1_700_000_000_000);
            let mut out = Vec::new();
            let _ = logplate::render(
                &plan,
                &event,
                &Ambient::new(),
                &RenderOptions::default(),
                &mut out,
            );
        }
    }
});
