//! Events a host environment delivers to a progress bar.

/// Notification applied to a bar between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarEvent {
    /// Advance progress by one unit.
    Tick,
    /// The terminal changed size; only the layout is recomputed.
    Resize { width: u16, height: u16 },
}
