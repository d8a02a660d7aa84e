/// Converts absolute pointer positions into look offsets.
///
/// The first sample after creation or [`rearm`](Self::rearm) only records the
/// position, so grabbing the pointer never produces a jump. Later samples
/// yield `(x - last_x, last_y - y)`: screen Y grows downward, so moving the
/// pointer up gives a positive vertical offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh gesture: the next sample is treated as the first.
    pub fn rearm(&mut self) {
        self.last = None;
    }

    /// Record a pointer sample, returning the look offset since the last one.
    pub fn track(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let offset = self
            .last
            .map(|(last_x, last_y)| (x - last_x, last_y - y));
        self.last = Some((x, y));
        offset
    }
}
