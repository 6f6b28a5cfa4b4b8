//! Accent controller
//!
//! Owns the selected accent, persists it, and writes the matching token into
//! a [`ThemeContext`]. Storage is cosmetic state: every read or write failure
//! is logged and swallowed, and the in-memory selection stays authoritative
//! for the session.
//!
//! A constructed controller is always ready; `initialize` is the only way to
//! build one.

use crate::accent::{AccentId, AccentToken};
use crate::config::ThemeConfig;
use crate::context::ThemeContext;
use crate::store::{self, AccentStore};

/// Process-wide accent selection
pub struct AccentController {
    store: Box<dyn AccentStore>,
    context: ThemeContext,
    storage_key: String,
    selected: AccentId,
}

/// Pick the initial accent from a storage read, falling back to `default`
pub fn resolve_initial(stored: store::Result<Option<String>>, default: AccentId) -> AccentId {
    match stored {
        Ok(Some(value)) => AccentId::parse(&value).unwrap_or_else(|| {
            tracing::debug!(%value, "persisted accent not recognized, using default");
            default
        }),
        Ok(None) => default,
        Err(error) => {
            tracing::warn!(%error, "could not read persisted accent, using default");
            default
        }
    }
}

impl AccentController {
    /// Read the persisted accent and build a ready controller
    ///
    /// Nothing is written to `context` until [`apply`](Self::apply) or a
    /// selection.
    pub fn initialize(
        store: Box<dyn AccentStore>,
        context: ThemeContext,
        config: &ThemeConfig,
    ) -> Self {
        let selected = resolve_initial(store.load(&config.storage_key), config.default_accent);
        tracing::debug!(accent = %selected, key = %config.storage_key, "accent controller ready");

        Self {
            store,
            context,
            storage_key: config.storage_key.clone(),
            selected,
        }
    }

    pub fn selected(&self) -> AccentId {
        self.selected
    }

    /// Token of the selected accent; always resolves
    pub fn current_token(&self) -> &'static AccentToken {
        self.selected.token()
    }

    /// Read-only access for presentation code
    pub fn context(&self) -> &ThemeContext {
        &self.context
    }

    /// Write the selected token into the context
    pub fn apply(&self) {
        self.context.apply_token(self.current_token());
    }

    /// Select an accent by id; unknown ids are ignored
    ///
    /// Returns whether the selection was accepted.
    pub fn select(&mut self, id: &str) -> bool {
        match AccentId::parse(id) {
            Some(accent) => {
                self.select_accent(accent);
                true
            }
            None => {
                tracing::debug!(id, "ignoring unknown accent selection");
                false
            }
        }
    }

    /// Select a known accent, persist it, and broadcast it
    pub fn select_accent(&mut self, accent: AccentId) {
        self.selected = accent;
        if let Err(error) = self.store.save(&self.storage_key, accent.id()) {
            tracing::warn!(%error, accent = %accent, "could not persist accent selection");
        }
        self.apply();
        tracing::debug!(accent = %accent, "accent selected");
    }
}

impl std::fmt::Debug for AccentController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccentController")
            .field("selected", &self.selected)
            .field("storage_key", &self.storage_key)
            .finish()
    }
}
