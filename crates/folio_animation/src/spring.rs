//! Spring physics
//!
//! Two flavours of spring live here:
//!
//! - [`Spring`] is a stateful damped oscillator integrated with RK4. It is
//!   used while a target keeps moving (e.g. following the pointer).
//! - [`SpringRelease`] is a closed-form, critically damped return to zero.
//!   Its position is a pure function of elapsed time, so it can be sampled
//!   at any instant and never overshoots.

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Snappy, barely oscillating
    pub const fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Soft and slow, used for color transitions
    pub const fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// Visible bounce
    pub const fn wobbly() -> Self {
        Self::new(180.0, 12.0, 1.0)
    }

    /// Light, fast spring for pointer-following controls
    pub const fn magnetic() -> Self {
        Self::new(300.0, 20.0, 0.4)
    }

    /// Entrance animation for content revealed on scroll
    pub const fn reveal() -> Self {
        Self::new(120.0, 16.0, 1.0)
    }

    /// Light, quick follower for scroll-linked indicators
    pub const fn progress() -> Self {
        Self::new(120.0, 20.0, 0.4)
    }

    /// Undamped angular frequency `sqrt(k / m)` in rad/s
    pub fn angular_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// `c / (2 * sqrt(k * m))`; 1.0 is critically damped
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// Distance and speed below which a spring counts as at rest
const REST_THRESHOLD: f32 = 0.01;

/// Largest integration step; longer frames are subdivided
const MAX_STEP: f32 = 1.0 / 120.0;

/// Longest frame simulated in one call; a stalled host resumes from here
const MAX_FRAME: f32 = 0.1;

/// A damped spring driven toward a movable target
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring, keeping its current velocity
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to a value and stop
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_THRESHOLD && self.velocity.abs() < REST_THRESHOLD
    }

    fn acceleration(&self, value: f32, velocity: f32) -> f32 {
        let SpringConfig {
            stiffness,
            damping,
            mass,
        } = self.config;
        (-stiffness * (value - self.target) - damping * velocity) / mass
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_FRAME);

        let steps = (dt / MAX_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            self.rk4(h);
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn rk4(&mut self, h: f32) {
        let (x, v) = (self.value, self.velocity);

        let k1x = v;
        let k1v = self.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = self.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = self.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = self.acceleration(x + h * k3x, k4x);

        self.value = x + h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity = v + h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

/// Critically damped return from `from` to zero
///
/// `x(t) = from * (1 + wt) * e^(-wt)` with `w = sqrt(k / m)` of the
/// supplied config; the config's damping is ignored so the curve never
/// crosses zero. Values within `epsilon` of rest read as exactly `0.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringRelease {
    from: f32,
    omega: f64,
    epsilon: f32,
}

impl SpringRelease {
    pub fn new(from: f32, config: SpringConfig, epsilon: f32) -> Self {
        Self {
            from,
            omega: config.angular_frequency() as f64,
            epsilon: epsilon.abs(),
        }
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    /// Decay envelope `(1 + wt) e^(-wt)`, monotonically falling from 1 to 0
    fn envelope(&self, t: f64) -> f64 {
        let wt = self.omega * t;
        (1.0 + wt) * (-wt).exp()
    }

    /// Position `t` seconds after release
    pub fn value_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return self.from;
        }
        let value = (self.from as f64 * self.envelope(t as f64)) as f32;
        if value.abs() < self.epsilon {
            0.0
        } else {
            value
        }
    }

    pub fn is_settled_at(&self, t: f32) -> bool {
        self.value_at(t) == 0.0
    }

    /// Time in seconds until the position reads as exactly zero
    pub fn settle_time(&self) -> f32 {
        let from = self.from.abs() as f64;
        if from < self.epsilon as f64 || self.omega <= 0.0 {
            return 0.0;
        }
        let ratio = self.epsilon as f64 / from;

        let mut hi = 1.0 / self.omega;
        while self.envelope(hi) >= ratio {
            hi *= 2.0;
        }
        let mut lo = 0.0;
        for _ in 0..48 {
            let mid = 0.5 * (lo + hi);
            if self.envelope(mid) >= ratio {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        hi as f32
    }
}
