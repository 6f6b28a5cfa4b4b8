//! Folio Animation System
//!
//! Spring physics, easing, and scroll-triggered reveals.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Release Curves**: closed-form critically damped return to rest
//! - **Reveals**: once-only viewport triggers with staggered entrances
//! - **Scroll-linked values**: clamped range mappings and a sprung progress bar

pub mod easing;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod spring;

pub use easing::Easing;
pub use reveal::{RevealConfig, RevealFrame, RevealGroup, ViewportTrigger};
pub use scheduler::{AnimationScheduler, SpringId};
pub use scroll::{ScrollMapping, ScrollProgress};
pub use spring::{Spring, SpringConfig, SpringRelease};
