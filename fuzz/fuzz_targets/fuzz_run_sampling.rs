#![no_main]

use libfuzzer_sys::fuzz_target;

use countup_core::{AnimationRun, Rounding};

fn f64_at(data: &[u8], at: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[at..at + 8]);
    f64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 25 {
        return;
    }
    let start = f64_at(data, 0);
    let end = f64_at(data, 8);
    let duration = f64_at(data, 16);
    let rounding = Rounding::ALL[usize::from(data[24]) % Rounding::ALL.len()];

    // Invalid bounds or durations must be rejected, never panic.
    let Ok(mut run) = AnimationRun::new(start, end, duration, rounding) else {
        return;
    };

    let lo = start.min(end);
    let hi = start.max(end);
    let mut previous: Option<f64> = None;
    let mut now = 0.0f64;

    // Remaining bytes are signed frame steps; negative ones move the clock back.
    for &step in &data[25..] {
        now += f64::from(step as i8) * duration.max(1.0) / 64.0;
        let Some(sample) = run.sample(now) else {
            break;
        };
        assert!(sample.value >= lo && sample.value <= hi, "{} outside [{lo}, {hi}]", sample.value);
        if let Some(prev) = previous {
            if end >= start {
                assert!(sample.value >= prev, "went down: {prev} -> {}", sample.value);
            } else {
                assert!(sample.value <= prev, "went up: {prev} -> {}", sample.value);
            }
        }
        previous = Some(sample.value);
        if sample.done {
            assert_eq!(sample.value, end);
            assert!(run.sample(now + 1.0).is_none());
            break;
        }
    }
});
