//! Scroll-linked values
//!
//! A [`ScrollMapping`] turns the page's vertical scroll offset into another
//! value, clamped to the output range. [`ScrollProgress`] feeds one mapping
//! through a [`Spring`] so an indicator trails the scroll position smoothly.

use crate::spring::{Spring, SpringConfig};

/// Linear map from a scroll range onto an output range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMapping {
    pub scroll_start: f32,
    pub scroll_end: f32,
    pub output_start: f32,
    pub output_end: f32,
}

impl ScrollMapping {
    pub const fn new(scroll_start: f32, scroll_end: f32, output_start: f32, output_end: f32) -> Self {
        Self {
            scroll_start,
            scroll_end,
            output_start,
            output_end,
        }
    }

    /// Reading progress: the first 1000px of scroll fill the bar
    pub const fn reading_progress() -> Self {
        Self::new(0.0, 1000.0, 0.0, 1.0)
    }

    /// Hero drift: the hero rises 60px over the first 600px of scroll
    pub const fn hero_parallax() -> Self {
        Self::new(0.0, 600.0, 0.0, -60.0)
    }

    /// Output for a scroll offset; offsets outside the range clamp
    pub fn map(&self, scroll_y: f32) -> f32 {
        let span = self.scroll_end - self.scroll_start;
        if !scroll_y.is_finite() || span == 0.0 {
            return self.output_start;
        }
        let t = ((scroll_y - self.scroll_start) / span).clamp(0.0, 1.0);
        self.output_start + (self.output_end - self.output_start) * t
    }
}

/// A scroll mapping smoothed by a spring
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    mapping: ScrollMapping,
    spring: Spring,
    reduced_motion: bool,
}

impl Default for ScrollProgress {
    fn default() -> Self {
        Self::new(ScrollMapping::reading_progress(), SpringConfig::progress())
    }
}

impl ScrollProgress {
    pub fn new(mapping: ScrollMapping, config: SpringConfig) -> Self {
        Self {
            mapping,
            spring: Spring::new(config, mapping.output_start),
            reduced_motion: false,
        }
    }

    /// Jump straight to the mapped value instead of springing
    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn mapping(&self) -> ScrollMapping {
        self.mapping
    }

    /// Record a new scroll offset
    pub fn set_scroll(&mut self, scroll_y: f32) {
        let target = self.mapping.map(scroll_y);
        if self.reduced_motion {
            self.spring.snap_to(target);
        } else {
            self.spring.set_target(target);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.spring.step(dt);
    }

    /// Displayed value
    pub fn value(&self) -> f32 {
        self.spring.value()
    }

    /// Value the indicator is heading for
    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    pub fn is_animating(&self) -> bool {
        !self.spring.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_mapping_clamps() {
        let progress = ScrollMapping::reading_progress();
        assert_eq!(progress.map(-50.0), 0.0);
        assert_eq!(progress.map(250.0), 0.25);
        assert_eq!(progress.map(4000.0), 1.0);
        assert_eq!(progress.map(f32::NAN), 0.0);

        let hero = ScrollMapping::hero_parallax();
        assert_eq!(hero.map(0.0), 0.0);
        assert_eq!(hero.map(300.0), -30.0);
        assert_eq!(hero.map(900.0), -60.0);
    }

    #[test]
    fn test_degenerate_range_holds_start() {
        let mapping = ScrollMapping::new(100.0, 100.0, 2.0, 8.0);
        assert_eq!(mapping.map(500.0), 2.0);
    }

    #[test]
    fn test_progress_trails_then_settles() {
        let mut progress = ScrollProgress::default();
        assert_eq!(progress.value(), 0.0);
        assert!(!progress.is_animating());

        progress.set_scroll(500.0);
        assert_eq!(progress.target(), 0.5);
        assert_eq!(progress.value(), 0.0);
        assert!(progress.is_animating());

        progress.tick(FRAME);
        let first = progress.value();
        assert!(first > 0.0 && first < 0.5);

        for _ in 0..120 {
            progress.tick(FRAME);
        }
        assert_eq!(progress.value(), 0.5);
        assert!(!progress.is_animating());
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let mut progress = ScrollProgress::default().with_reduced_motion(true);
        progress.set_scroll(2000.0);
        assert_eq!(progress.value(), 1.0);
        assert!(!progress.is_animating());
    }
}
