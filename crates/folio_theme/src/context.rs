//! Theme context
//!
//! The page-wide styling channel: two style variables (primary color and
//! gradient) that any presentation code may read. The context is an explicit
//! handle passed to consumers rather than ambient global state; clones share
//! the same variables. Only the accent controller writes to it.

use crate::accent::{AccentId, AccentToken};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::rc::Rc;

/// Name of the primary color variable
pub const PRIMARY_VAR: &str = "--primary";

/// Name of the gradient variable
pub const GRADIENT_VAR: &str = "--gradient";

new_key_type! {
    /// Handle for a change observer
    pub struct ObserverId;
}

/// Current values of the style variables
#[derive(Clone, Debug, PartialEq)]
pub struct StyleVariables {
    /// Accent the values came from; `None` for the neutral placeholder
    pub accent: Option<AccentId>,
    pub primary: String,
    pub gradient: String,
}

impl StyleVariables {
    /// Neutral grey shown before any accent is applied
    pub fn placeholder() -> Self {
        Self {
            accent: None,
            primary: "#888888".to_string(),
            gradient: "linear-gradient(135deg, #666666 0%, #777777 50%, #888888 100%)".to_string(),
        }
    }

    pub fn from_token(token: &AccentToken) -> Self {
        Self {
            accent: Some(token.id),
            primary: token.primary.to_css(),
            gradient: token.gradient.to_css(),
        }
    }

    /// Variable map keyed by name without the `--` prefix
    pub fn to_css_variable_map(&self) -> HashMap<String, String> {
        let mut vars = HashMap::with_capacity(2);
        vars.insert("primary".into(), self.primary.clone());
        vars.insert("gradient".into(), self.gradient.clone());
        vars
    }

    /// Render a `:root` rule declaring both variables
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        let _ = writeln!(css, "  {PRIMARY_VAR}: {};", self.primary);
        let _ = writeln!(css, "  {GRADIENT_VAR}: {};", self.gradient);
        css.push_str("}\n");
        css
    }
}

impl Default for StyleVariables {
    fn default() -> Self {
        Self::placeholder()
    }
}

type Observer = Rc<dyn Fn(&StyleVariables)>;

/// Shared handle to the page's style variables
#[derive(Clone, Default)]
pub struct ThemeContext {
    variables: Rc<RefCell<StyleVariables>>,
    revision: Rc<Cell<u64>>,
    observers: Rc<RefCell<SlotMap<ObserverId, Observer>>>,
}

impl ThemeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current variables
    pub fn variables(&self) -> StyleVariables {
        self.variables.borrow().clone()
    }

    /// Accent currently applied, if any
    pub fn accent(&self) -> Option<AccentId> {
        self.variables.borrow().accent
    }

    /// Number of writes so far
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn to_css(&self) -> String {
        self.variables.borrow().to_css()
    }

    /// Observe every subsequent write
    pub fn subscribe(&self, observer: impl Fn(&StyleVariables) + 'static) -> ObserverId {
        self.observers.borrow_mut().insert(Rc::new(observer))
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.borrow_mut().remove(id).is_some()
    }

    /// Write a token's values and notify observers
    pub(crate) fn apply_token(&self, token: &AccentToken) {
        let variables = StyleVariables::from_token(token);
        *self.variables.borrow_mut() = variables.clone();
        self.revision.set(self.revision.get() + 1);

        tracing::debug!(
            accent = %token.id,
            revision = self.revision.get(),
            "applied accent to theme context"
        );

        // Observers may read the context or unsubscribe while being notified
        let observers: SmallVec<[Observer; 4]> =
            self.observers.borrow().values().cloned().collect();
        for observer in observers {
            observer(&variables);
        }
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("variables", &*self.variables.borrow())
            .field("revision", &self.revision.get())
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}
