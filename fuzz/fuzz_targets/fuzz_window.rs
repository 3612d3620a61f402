#![no_main]

use libfuzzer_sys::fuzz_target;

use tickbar_core::window::{RollingStats, RollingWindow};

fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 64) + 1;
    let mut window = RollingWindow::new(capacity).unwrap();

    // Even bytes push, odd bytes pop.
    for chunk in rest.chunks(3) {
        match chunk {
            [op, hi, lo] if op % 2 == 0 => window.push(i16::from_le_bytes([*lo, *hi])),
            _ => {
                window.pop();
            }
        }
        assert!(window.len() <= window.capacity());
    }

    if let (Some(min), Some(max), Some(median)) =
        (window.minimum(), window.maximum(), window.median())
    {
        assert!(f64::from(min) <= median && median <= f64::from(max));
        assert!(window.variance().unwrap() >= 0.0);
    }
});
