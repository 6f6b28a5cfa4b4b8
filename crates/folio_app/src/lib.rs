//! Folio Application
//!
//! Configuration, content feed and the composition root tying the accent
//! controller to magnetic controls and reveal sections.
//!
//! # Example
//!
//! ```
//! use folio_app::prelude::*;
//!
//! let mut page = Portfolio::new(FolioConfig::default(), Box::new(MemoryStore::new()));
//! assert_eq!(page.theme().variables().primary, "#f24d1b");
//!
//! let button = page.add_control(|| Some(Rect::new(0.0, 0.0, 120.0, 40.0)));
//! page.control_mut(button).unwrap().enter_hover();
//! page.pointer_moved(160.0, 20.0, 0);
//! page.tick(1.0 / 60.0);
//! assert!(page.control(button).unwrap().transform().x > 0.0);
//!
//! page.select_accent("cyan");
//! assert_eq!(page.theme().accent(), Some(AccentId::Cyan));
//! ```

mod config;
mod content;
mod error;
pub mod logging;
mod portfolio;

pub use config::{ContentConfig, FolioConfig, MotionConfig, CONFIG_FILE_NAME};
pub use content::{
    sanitize_text, ContentFeed, ContentIssue, Education, Experience, IssueKind, NavEntry, Project,
};
pub use error::{ConfigError, ContentError, Result};
pub use portfolio::{ControlId, Portfolio, SectionId};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::FolioConfig;
    pub use crate::content::{sanitize_text, ContentFeed};
    pub use crate::portfolio::{ControlId, Portfolio, SectionId};

    pub use folio_core::{Point, Rect};
    pub use folio_theme::{AccentId, FileStore, MemoryStore, ThemeContext};
    pub use folio_widgets::{MagneticConfig, MagneticTransform};
}
