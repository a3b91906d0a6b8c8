use crate::constants::{REVEAL_RISE_PX, REVEAL_START_RATIO};
use crate::ease::Ease;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTiming {
    pub section: &'static str,
    pub duration_sec: f32,
    pub stagger_sec: f32,
}

pub const REVEALS: [RevealTiming; 6] = [
    RevealTiming { section: "destinations-intro", duration_sec: 0.8, stagger_sec: 0.1 },
    RevealTiming { section: "packages", duration_sec: 0.8, stagger_sec: 0.1 },
    RevealTiming { section: "services", duration_sec: 0.6, stagger_sec: 0.08 },
    RevealTiming { section: "gallery", duration_sec: 0.6, stagger_sec: 0.1 },
    RevealTiming { section: "testimonials", duration_sec: 0.8, stagger_sec: 0.1 },
    RevealTiming { section: "contact", duration_sec: 0.8, stagger_sec: 0.1 },
];

pub fn timing_for(section: &str) -> Option<&'static RevealTiming> {
    REVEALS.iter().find(|r| r.section == section)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug)]
pub struct RevealTrigger {
    timing: RevealTiming,
    items: usize,
    entered: bool,
    head_sec: f32,
    direction: Direction,
}

impl RevealTrigger {
    pub fn new(timing: RevealTiming, items: usize) -> Self {
        Self {
            timing,
            items,
            entered: false,
            head_sec: 0.0,
            direction: Direction::Backward,
        }
    }

    fn total_sec(&self) -> f32 {
        self.timing.duration_sec + self.timing.stagger_sec * self.items.saturating_sub(1) as f32
    }

    /// Feed the section's top edge relative to the viewport. Returns the new
    /// direction when the start line was crossed.
    pub fn on_scroll(&mut self, top_in_viewport: f64, viewport_height: f64) -> Option<Direction> {
        let inside = top_in_viewport <= viewport_height * REVEAL_START_RATIO;
        if inside == self.entered {
            return None;
        }
        self.entered = inside;
        self.direction = if inside {
            Direction::Forward
        } else {
            Direction::Backward
        };
        log::debug!("[reveal] '{}' {:?}", self.timing.section, self.direction);
        Some(self.direction)
    }

    /// True while the playhead still has somewhere to go.
    pub fn is_moving(&self) -> bool {
        match self.direction {
            Direction::Forward => self.head_sec < self.total_sec(),
            Direction::Backward => self.head_sec > 0.0,
        }
    }

    pub fn step(&mut self, dt_sec: f32) {
        let dt = dt_sec.max(0.0);
        self.head_sec = match self.direction {
            Direction::Forward => (self.head_sec + dt).min(self.total_sec()),
            Direction::Backward => (self.head_sec - dt).max(0.0),
        };
    }

    /// `(opacity, y_px)` of item `index` at the current playhead.
    pub fn sample(&self, index: usize) -> (f32, f32) {
        let start = self.timing.stagger_sec * index as f32;
        let t = if self.timing.duration_sec <= 0.0 {
            if self.head_sec >= start { 1.0 } else { 0.0 }
        } else {
            (self.head_sec - start) / self.timing.duration_sec
        };
        let k = Ease::Power2Out.apply(t);
        (k, REVEAL_RISE_PX * (1.0 - k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger() -> RevealTrigger {
        RevealTrigger::new(*timing_for("packages").expect("packages"), 3)
    }

    #[test]
    fn starts_hidden_below_the_line() {
        let mut r = trigger();
        assert_eq!(r.on_scroll(900.0, 900.0), None);
        assert_eq!(r.sample(0), (0.0, 30.0));
        assert!(!r.is_moving());
    }

    #[test]
    fn plays_on_enter_and_reverses_on_leave_back() {
        let mut r = trigger();
        assert_eq!(r.on_scroll(720.0, 900.0), Some(Direction::Forward));
        r.step(0.4);
        let (first, _) = r.sample(0);
        let (last, _) = r.sample(2);
        assert!(first > last && last > 0.0);
        r.step(5.0);
        assert!(!r.is_moving());
        let (opacity, y) = r.sample(2);
        assert!(opacity > 0.999 && y < 1e-3);

        // scrolling further down keeps it shown
        assert_eq!(r.on_scroll(-400.0, 900.0), None);
        assert_eq!(r.on_scroll(721.0, 900.0), Some(Direction::Backward));
        assert!(r.is_moving());
        r.step(5.0);
        assert_eq!(r.sample(0), (0.0, 30.0));
    }

    #[test]
    fn every_flowing_section_has_timing() {
        for id in ["packages", "services", "gallery", "testimonials", "contact"] {
            assert!(timing_for(id).is_some(), "{id}");
        }
        assert_eq!(timing_for("services").map(|s| s.stagger_sec), Some(0.08));
    }
}
