use serde::{Deserialize, Serialize};

/// Fixed-cadence frame counter: fires once every `interval` frames.
///
/// Mirrors the classic "count frames, act when the counter reaches the
/// threshold, then reset" loop. `advance` lets callers skip ahead (a
/// speed-up key) without changing what happens when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameCadence {
    counter: u32,
    interval: u32,
}

impl FrameCadence {
    pub fn new(interval: u32) -> Self {
        Self {
            counter: 0,
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn frames_until_fire(&self) -> u32 {
        self.interval.saturating_sub(self.counter)
    }

    /// Call once per frame. Returns true on frames where the tick fires.
    ///
    /// The threshold is checked before the frame is counted, so the first
    /// fire happens on frame `interval + 1` and every `interval + 1` frames
    /// after that.
    pub fn on_frame(&mut self) -> bool {
        let fired = self.counter >= self.interval;
        if fired {
            self.counter = 0;
        }
        self.counter = self.counter.saturating_add(1);
        fired
    }

    pub fn advance(&mut self, frames: u32) {
        self.counter = self.counter.saturating_add(frames);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_interval_frames_and_resets() {
        let mut c = FrameCadence::new(3);
        let fired: Vec<bool> = (0..8).map(|_| c.on_frame()).collect();
        assert_eq!(
            fired,
            vec![false, false, false, true, false, false, true, false]
        );
    }

    #[test]
    fn advance_shortens_the_wait() {
        let mut c = FrameCadence::new(60);
        c.on_frame();
        assert_eq!(c.frames_until_fire(), 59);
        c.advance(10);
        assert_eq!(c.frames_until_fire(), 49);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut c = FrameCadence::new(0);
        assert_eq!(c.interval(), 1);
        assert!(!c.on_frame());
        assert!(c.on_frame());
    }
}
