#![no_main]

use libfuzzer_sys::fuzz_target;

use countup_core::CounterStrip;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // Arbitrary documents either parse into a non-empty strip or error out.
    if let Ok(strip) = CounterStrip::from_json(json) {
        assert!(!strip.is_empty());
        let _ = strip.validate();
    }
});
