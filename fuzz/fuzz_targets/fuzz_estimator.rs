#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;

use tickbar_core::etc::EtcEstimator;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let total = u64::from(u16::from_le_bytes([data[0], data[1]]));
    let mut est = EtcEstimator::new(total);

    // Each byte is the time spent on the next unit; progress may stall.
    let mut progress = 0u64;
    let mut elapsed = Duration::ZERO;
    for &b in &data[2..] {
        elapsed += Duration::from_millis(u64::from(b));
        if b % 3 != 0 {
            progress = (progress + 1).min(total);
        }
        // Should not panic
        let etc = est.estimate(progress, elapsed);
        if progress == total && total > 0 {
            assert_eq!(etc, Some(Duration::ZERO));
        }
    }
});
