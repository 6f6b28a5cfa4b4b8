//! Scroll-triggered reveal animations
//!
//! Sections fade and slide into place the first time they scroll into view.
//! Lists stagger their items so each entry starts a little after the
//! previous one.
//!
//! ```rust
//! use folio_animation::reveal::{RevealConfig, RevealGroup};
//! use folio_core::Rect;
//!
//! let mut group = RevealGroup::new(RevealConfig::default(), 3);
//! let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
//!
//! // Below the fold: nothing happens
//! assert!(!group.update(viewport, Some(Rect::new(0.0, 900.0, 400.0, 200.0))));
//!
//! // Scrolled into view: the group fires once
//! assert!(group.update(viewport, Some(Rect::new(0.0, 300.0, 400.0, 200.0))));
//! for _ in 0..120 {
//!     group.tick(1.0 / 60.0);
//! }
//! assert!(group.is_complete());
//! ```

use crate::easing::Easing;
use crate::scheduler::{AnimationScheduler, SpringId};
use crate::spring::{Spring, SpringConfig};
use folio_core::Rect;

/// Fires when an element's bounds enter the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTrigger {
    /// Inset applied to the viewport before testing; positive values
    /// require the element to be further inside
    margin: f32,
    /// Only fire on the first entry
    once: bool,
    inside: bool,
    fired: bool,
}

impl ViewportTrigger {
    pub fn new(margin: f32, once: bool) -> Self {
        Self {
            margin,
            once,
            inside: false,
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Feed the latest viewport and element bounds; returns true on entry
    ///
    /// Unresolved bounds leave the trigger untouched.
    pub fn update(&mut self, viewport: Rect, element: Option<Rect>) -> bool {
        let Some(element) = element else {
            return false;
        };
        if self.once && self.fired {
            return false;
        }

        let visible = viewport.inset(self.margin, self.margin).intersects(&element);
        let entered = visible && !self.inside;
        self.inside = visible;
        if entered {
            self.fired = true;
        }
        entered
    }
}

/// Reveal animation parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealConfig {
    /// Starting vertical offset in pixels
    pub distance: f32,
    pub fade_seconds: f32,
    pub fade_easing: Easing,
    pub spring: SpringConfig,
    /// Delay between consecutive items
    pub stagger_seconds: f32,
    /// Viewport inset used by the trigger
    pub margin: f32,
    /// Skip the animation and show content immediately
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            distance: 12.0,
            fade_seconds: 0.4,
            fade_easing: Easing::EaseOut,
            spring: SpringConfig::reveal(),
            stagger_seconds: 0.08,
            margin: 100.0,
            reduced_motion: false,
        }
    }
}

/// Visual state of one revealed item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    pub translate_y: f32,
}

impl RevealFrame {
    pub const VISIBLE: RevealFrame = RevealFrame {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

#[derive(Debug)]
struct RevealItem {
    spring: SpringId,
    delay: f32,
    started: bool,
}

/// A list of items revealed together with a stagger
#[derive(Debug)]
pub struct RevealGroup {
    config: RevealConfig,
    trigger: ViewportTrigger,
    scheduler: AnimationScheduler,
    items: Vec<RevealItem>,
    /// Seconds since the trigger fired
    elapsed: Option<f32>,
}

impl RevealGroup {
    pub fn new(config: RevealConfig, count: usize) -> Self {
        let mut scheduler = AnimationScheduler::new();
        let items = (0..count)
            .map(|i| RevealItem {
                spring: scheduler.add_spring(Spring::new(config.spring, config.distance)),
                delay: i as f32 * config.stagger_seconds,
                started: false,
            })
            .collect();

        Self {
            config,
            trigger: ViewportTrigger::new(config.margin, true),
            scheduler,
            items,
            elapsed: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_fired(&self) -> bool {
        self.trigger.has_fired()
    }

    /// Check visibility; starts the reveal on first entry
    pub fn update(&mut self, viewport: Rect, bounds: Option<Rect>) -> bool {
        if !self.trigger.update(viewport, bounds) {
            return false;
        }

        tracing::debug!(items = self.items.len(), "reveal triggered");
        self.elapsed = Some(0.0);
        if self.config.reduced_motion {
            for item in &mut self.items {
                item.started = true;
                if let Some(spring) = self.scheduler.get_spring_mut(item.spring) {
                    spring.snap_to(0.0);
                }
            }
        }
        self.start_due_items();
        true
    }

    fn start_due_items(&mut self) {
        let Some(elapsed) = self.elapsed else {
            return;
        };
        for item in self.items.iter_mut().filter(|i| !i.started && i.delay <= elapsed) {
            item.started = true;
            if let Some(spring) = self.scheduler.get_spring_mut(item.spring) {
                spring.set_target(0.0);
            }
        }
    }

    /// Advance by one frame
    pub fn tick(&mut self, dt: f32) {
        let Some(elapsed) = self.elapsed.as_mut() else {
            return;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        *elapsed += dt;
        self.start_due_items();
        self.scheduler.tick(dt);
    }

    /// Current visual state of item `index`
    pub fn frame(&self, index: usize) -> Option<RevealFrame> {
        let item = self.items.get(index)?;
        let translate_y = self
            .scheduler
            .get_spring(item.spring)
            .map_or(0.0, Spring::value);

        let opacity = match self.elapsed {
            None => 0.0,
            Some(_) if self.config.reduced_motion => 1.0,
            Some(elapsed) => {
                let local = elapsed - item.delay;
                if local <= 0.0 {
                    0.0
                } else if self.config.fade_seconds <= 0.0 {
                    1.0
                } else {
                    self.config
                        .fade_easing
                        .apply(local / self.config.fade_seconds)
                }
            }
        };

        Some(RevealFrame {
            opacity,
            translate_y,
        })
    }

    /// All items fully visible and at rest
    pub fn is_complete(&self) -> bool {
        self.elapsed.is_some()
            && self.items.iter().all(|i| i.started)
            && !self.scheduler.has_active_animations()
            && (0..self.items.len()).all(|i| self.frame(i) == Some(RevealFrame::VISIBLE))
    }
}
