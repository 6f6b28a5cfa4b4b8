//! Folio Theme System
//!
//! Accent theming for the portfolio page.
//!
//! # Overview
//!
//! - **Accents**: a closed palette of four accents, each with a primary color
//!   and a three-stop gradient
//! - **Theme context**: an explicit, shareable handle holding the page's two
//!   style variables (`--primary` and `--gradient`)
//! - **Controller**: restores the persisted accent at startup, applies
//!   selections, and persists them
//!
//! # Quick Start
//!
//! ```rust
//! use folio_theme::{AccentController, AccentId, MemoryStore, ThemeConfig, ThemeContext};
//!
//! let context = ThemeContext::new();
//! let mut controller = AccentController::initialize(
//!     Box::new(MemoryStore::new()),
//!     context.clone(),
//!     &ThemeConfig::default(),
//! );
//! controller.apply();
//! assert_eq!(context.variables().primary, "#f24d1b");
//!
//! controller.select("violet");
//! assert_eq!(context.accent(), Some(AccentId::Violet));
//!
//! // Unknown ids change nothing
//! controller.select("lime");
//! assert_eq!(controller.selected(), AccentId::Violet);
//! ```
//!
//! # Persistence
//!
//! Storage failures never surface to callers. A missing, unreadable, or
//! unrecognized stored value falls back to the configured default, and a
//! failed write leaves the in-memory selection in effect.

pub mod accent;
pub mod config;
pub mod context;
pub mod state;
pub mod store;

pub use accent::{accent_tokens, AccentId, AccentToken, UnknownAccent};
pub use config::ThemeConfig;
pub use context::{ObserverId, StyleVariables, ThemeContext, GRADIENT_VAR, PRIMARY_VAR};
pub use state::AccentController;
pub use store::{AccentStore, FileStore, MemoryStore, NullStore, StoreError};
