//! Folio Core Runtime
//!
//! Foundational primitives shared by the theming and interaction crates:
//!
//! - **Geometry**: viewport points, rects, and vectors
//! - **Colors**: hex parsing, CSS serialization, linear gradients
//! - **Event Dispatch**: a shared pointer-move stream with weak subscriptions
//! - **State Machines**: flat transition tables for interaction states
//!
//! # Example
//!
//! ```rust
//! use folio_core::events::{PointerDispatcher, PointerEvent, PointerListener};
//! use std::rc::Rc;
//!
//! struct Logger;
//!
//! impl PointerListener for Logger {
//!     fn on_pointer_move(&self, event: &PointerEvent) {
//!         println!("pointer at {:?}", event.position);
//!     }
//! }
//!
//! let dispatcher = PointerDispatcher::new();
//! let listener: Rc<dyn PointerListener> = Rc::new(Logger);
//! let id = dispatcher.subscribe(&listener);
//!
//! assert_eq!(dispatcher.dispatch(&PointerEvent::new(10.0, 20.0, 0)), 1);
//! dispatcher.unsubscribe(id);
//! ```

pub mod color;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::{Color, ColorParseError, GradientStop, LinearGradient};
pub use events::{EventType, ListenerId, PointerDispatcher, PointerEvent, PointerListener};
pub use fsm::{EventId, StateChange, StateId, StateMachine, Transition};
pub use geometry::{Point, Rect, Size, Vec2};
