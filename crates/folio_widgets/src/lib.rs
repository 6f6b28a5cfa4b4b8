//! Folio Widget Library
//!
//! Interactive affordances with FSM-driven hover.

pub mod magnetic;

pub use magnetic::{MagneticAffordance, MagneticConfig, MagneticTransform, PointerOffset};
