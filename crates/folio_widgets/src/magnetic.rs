//! Magnetic affordance
//!
//! Wraps an interactive control so that, while hovered, it leans toward the
//! pointer and tilts slightly, then springs back to rest when the pointer
//! leaves.
//!
//! Each instance subscribes a tracker to the page's shared
//! [`PointerDispatcher`]. The tracker turns every pointer-move sample into a
//! pending offset: the vector from the control's center to the pointer,
//! scaled by the damping factor. Samples are tracked whether or not the
//! control is hovered; hover only decides whether the displayed transform
//! follows them.
//!
//! Two animation phases drive the displayed transform:
//! - **Following** (hovered): a [`Spring`] per axis chases the pending offset.
//! - **Releasing** (after hover ends or the control is detached): a
//!   [`SpringRelease`] per axis, a pure function of the time since exit.
//!   Its magnitude never increases and it lands on exactly zero.
//!
//! Hover is a small state machine:
//!
//! ```text
//! IDLE --POINTER_ENTER--> HOVERED --POINTER_LEAVE--> IDLE
//!   \                        |
//!    +------UNMOUNT------> DETACHED
//! ```

use folio_animation::{Spring, SpringConfig, SpringRelease};
use folio_core::events::{event_types, EventType, ListenerId, PointerDispatcher, PointerEvent};
use folio_core::fsm::{StateMachine, Transition};
use folio_core::{PointerListener, Rect, Vec2};
use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::{Rc, Weak};

/// Affordance states
pub mod states {
    pub const IDLE: u32 = 0;
    pub const HOVERED: u32 = 1;
    pub const DETACHED: u32 = 2;
}

/// Tuning for one affordance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticConfig {
    /// Scale applied to the pointer-to-center vector
    pub damping_factor: f32,
    /// Degrees of tilt per pixel of displacement
    pub tilt_factor: f32,
    /// Spring used while following and for the release curve
    pub spring: SpringConfig,
    /// Displacement below which the release reads as exactly zero
    pub rest_epsilon: f32,
    /// Keep the control still
    pub reduced_motion: bool,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.25,
            tilt_factor: 0.05,
            spring: SpringConfig::magnetic(),
            rest_epsilon: 0.01,
            reduced_motion: false,
        }
    }
}

impl MagneticConfig {
    /// Set the damping factor
    pub fn damping_factor(mut self, factor: f32) -> Self {
        self.damping_factor = factor;
        self
    }

    /// Set the tilt factor
    pub fn tilt_factor(mut self, factor: f32) -> Self {
        self.tilt_factor = factor;
        self
    }

    /// Set the spring
    pub fn spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Set the rest epsilon
    pub fn rest_epsilon(mut self, epsilon: f32) -> Self {
        self.rest_epsilon = epsilon;
        self
    }

    /// Set whether motion is reduced
    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}

/// Latest pointer-derived offset and hover flag
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerOffset {
    pub dx: f32,
    pub dy: f32,
    pub active: bool,
}

/// Displacement handed to the renderer
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagneticTransform {
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotate_x: f32,
    /// Degrees
    pub rotate_y: f32,
}

impl MagneticTransform {
    pub const REST: MagneticTransform = MagneticTransform {
        x: 0.0,
        y: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Transform for a displacement, tilting toward it
    pub fn from_displacement(x: f32, y: f32, tilt_factor: f32) -> Self {
        Self {
            x,
            y,
            rotate_x: -y * tilt_factor,
            rotate_y: x * tilt_factor,
        }
    }

    pub fn magnitude(&self) -> f32 {
        Vec2::new(self.x, self.y).length()
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }

    /// CSS `transform` value
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        let _ = write!(
            css,
            "translate({:.2}px, {:.2}px) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.x, self.y, self.rotate_x, self.rotate_y
        );
        css
    }
}

/// Dispatcher-facing half of an affordance
struct PointerTracker {
    bounds: Box<dyn Fn() -> Option<Rect>>,
    damping_factor: f32,
    pending: Cell<Vec2>,
    attached: Cell<bool>,
}

impl PointerListener for PointerTracker {
    fn on_pointer_move(&self, event: &PointerEvent) {
        if !self.attached.get() {
            return;
        }
        // Layout may not be resolved yet; keep the previous offset
        let Some(bounds) = (self.bounds)() else {
            tracing::trace!(timestamp = event.timestamp, "bounds unresolved, sample skipped");
            return;
        };
        let pending = (event.position - bounds.center()) * self.damping_factor;
        self.pending.set(pending);
    }
}

/// Return-to-rest in progress
#[derive(Clone, Copy, Debug)]
struct Release {
    x: SpringRelease,
    y: SpringRelease,
    elapsed: f32,
}

impl Release {
    fn displacement(&self) -> (f32, f32) {
        (self.x.value_at(self.elapsed), self.y.value_at(self.elapsed))
    }
}

/// A pointer-proximity affordance bound to one control
pub struct MagneticAffordance {
    config: MagneticConfig,
    tracker: Rc<PointerTracker>,
    dispatcher: Weak<PointerDispatcher>,
    listener: Option<ListenerId>,
    fsm: StateMachine,
    follow_x: Spring,
    follow_y: Spring,
    release: Option<Release>,
    transform: MagneticTransform,
}

impl MagneticAffordance {
    /// Subscribe to `dispatcher`; `bounds` is resolved on every sample
    pub fn attach<F>(dispatcher: &Rc<PointerDispatcher>, bounds: F, config: MagneticConfig) -> Self
    where
        F: Fn() -> Option<Rect> + 'static,
    {
        let tracker = Rc::new(PointerTracker {
            bounds: Box::new(bounds),
            damping_factor: config.damping_factor,
            pending: Cell::new(Vec2::ZERO),
            attached: Cell::new(true),
        });
        let listener: Rc<dyn PointerListener> = tracker.clone();
        let id = dispatcher.subscribe(&listener);
        tracing::debug!(listeners = dispatcher.listener_count(), "magnetic affordance attached");

        Self {
            config,
            tracker,
            dispatcher: Rc::downgrade(dispatcher),
            listener: Some(id),
            fsm: Self::create_fsm(&config),
            follow_x: Spring::new(config.spring, 0.0),
            follow_y: Spring::new(config.spring, 0.0),
            release: None,
            transform: MagneticTransform::REST,
        }
    }

    fn create_fsm(config: &MagneticConfig) -> StateMachine {
        let reduced_motion = config.reduced_motion;
        StateMachine::builder(states::IDLE)
            .transition(
                Transition::new(states::IDLE, event_types::POINTER_ENTER, states::HOVERED)
                    .with_guard(move || !reduced_motion),
            )
            .on(states::HOVERED, event_types::POINTER_LEAVE, states::IDLE)
            .on(states::IDLE, event_types::UNMOUNT, states::DETACHED)
            .on(states::HOVERED, event_types::UNMOUNT, states::DETACHED)
            .build()
    }

    pub fn config(&self) -> &MagneticConfig {
        &self.config
    }

    /// Current state id (see [`states`])
    pub fn state(&self) -> u32 {
        self.fsm.current_state()
    }

    pub fn is_hovered(&self) -> bool {
        self.fsm.is_in(states::HOVERED)
    }

    pub fn is_attached(&self) -> bool {
        !self.fsm.is_in(states::DETACHED)
    }

    pub fn is_releasing(&self) -> bool {
        self.release.is_some()
    }

    /// Pending pointer offset and hover flag
    pub fn offset(&self) -> PointerOffset {
        let pending = self.tracker.pending.get();
        PointerOffset {
            dx: pending.x,
            dy: pending.y,
            active: self.is_hovered(),
        }
    }

    /// Last transform produced by [`tick`](Self::tick)
    pub fn transform(&self) -> MagneticTransform {
        self.transform
    }

    /// Route a lifecycle or hover event
    pub fn handle_event(&mut self, event_type: EventType) {
        match event_type {
            event_types::POINTER_ENTER => self.enter_hover(),
            event_types::POINTER_LEAVE => self.exit_hover(),
            event_types::UNMOUNT => self.detach(),
            _ => {}
        }
    }

    /// Start following the pointer
    ///
    /// The pending offset is not recomputed here; the next frames spring
    /// toward whatever the last sample produced.
    pub fn enter_hover(&mut self) {
        if self.fsm.send(event_types::POINTER_ENTER).is_none() {
            return;
        }
        // Resume from wherever a release left the control
        self.release = None;
        self.follow_x.snap_to(self.transform.x);
        self.follow_y.snap_to(self.transform.y);
        tracing::debug!("magnetic hover started");
    }

    /// Stop following and spring back to rest
    pub fn exit_hover(&mut self) {
        if self.fsm.send(event_types::POINTER_LEAVE).is_none() {
            return;
        }
        self.start_release();
        tracing::debug!(
            x = self.transform.x,
            y = self.transform.y,
            "magnetic hover ended, releasing"
        );
    }

    /// Spring back from the displayed transform, if displaced
    fn start_release(&mut self) {
        let (x, y) = (self.transform.x, self.transform.y);
        self.release = (x != 0.0 || y != 0.0).then(|| Release {
            x: SpringRelease::new(x, self.config.spring, self.config.rest_epsilon),
            y: SpringRelease::new(y, self.config.spring, self.config.rest_epsilon),
            elapsed: 0.0,
        });
    }

    /// Advance one frame of `dt` seconds
    ///
    /// Once detached, only a pending release keeps advancing.
    pub fn tick(&mut self, dt: f32) -> MagneticTransform {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if self.config.reduced_motion {
            self.transform = MagneticTransform::REST;
            return self.transform;
        }

        let (x, y) = if self.is_hovered() {
            let pending = self.tracker.pending.get();
            self.follow_x.set_target(pending.x);
            self.follow_y.set_target(pending.y);
            self.follow_x.step(dt);
            self.follow_y.step(dt);
            (self.follow_x.value(), self.follow_y.value())
        } else if let Some(release) = self.release.as_mut() {
            release.elapsed += dt;
            let (x, y) = release.displacement();
            if x == 0.0 && y == 0.0 {
                self.release = None;
                self.follow_x.snap_to(0.0);
                self.follow_y.snap_to(0.0);
                tracing::trace!("magnetic release settled");
            }
            (x, y)
        } else {
            (0.0, 0.0)
        };

        self.transform = MagneticTransform::from_displacement(x, y, self.config.tilt_factor);
        self.transform
    }

    /// Unsubscribe from the dispatcher
    ///
    /// Takes effect immediately: samples dispatched afterwards change
    /// nothing and hover can no longer start. A displaced control keeps
    /// springing back to rest on later ticks. Calling it again is a no-op.
    pub fn detach(&mut self) {
        let Some(id) = self.listener.take() else {
            return;
        };
        self.tracker.attached.set(false);
        if let Some(dispatcher) = self.dispatcher.upgrade() {
            dispatcher.unsubscribe(id);
        }
        let was_hovered = self.is_hovered();
        self.fsm.send(event_types::UNMOUNT);
        if was_hovered {
            self.start_release();
        }
        tracing::debug!(releasing = self.release.is_some(), "magnetic affordance detached");
    }
}

impl Drop for MagneticAffordance {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for MagneticAffordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagneticAffordance")
            .field("state", &self.fsm.current_state())
            .field("offset", &self.offset())
            .field("transform", &self.transform)
            .field("releasing", &self.release.is_some())
            .finish()
    }
}
