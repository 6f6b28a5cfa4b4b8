//! Flat state machines for interaction states
//!
//! Controls model their interaction state (idle, hovered, ...) as a small
//! table of `(state, event) -> state` transitions. Unknown events are
//! ignored, which is what pointer handling wants: a stray `POINTER_LEAVE`
//! while already idle is not an error.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Most recent transitions kept in [`StateMachine::history`]
const HISTORY_LIMIT: usize = 32;

/// A guard function that determines if a transition may occur
pub type Guard = Box<dyn Fn() -> bool>;

/// A transition in the state machine
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
    pub guard: Option<Guard>,
}

impl Transition {
    /// Create a transition without a guard
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
        }
    }

    /// Add a guard condition
    pub fn with_guard<F: Fn() -> bool + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    fn allowed(&self) -> bool {
        self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// Result of a [`StateMachine::send`] that changed state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: StateId,
    pub event: EventId,
    pub to: StateId,
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition
    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add an unguarded transition (from, event, to)
    pub fn on(self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transition(Transition::new(from, event, to))
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// A state machine instance
pub struct StateMachine {
    current_state: StateId,
    transitions: Vec<Transition>,
    /// Transition indices per (state, event), in declaration order
    index: FxHashMap<(StateId, EventId), SmallVec<[usize; 2]>>,
    history: Vec<StateChange>,
}

impl StateMachine {
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        let mut index: FxHashMap<(StateId, EventId), SmallVec<[usize; 2]>> =
            FxHashMap::default();
        for (i, t) in transitions.iter().enumerate() {
            index.entry((t.from_state, t.event)).or_default().push(i);
        }
        Self {
            current_state: initial_state,
            transitions,
            index,
            history: Vec::new(),
        }
    }

    /// Create a builder for a state machine
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Recent transitions, oldest first
    pub fn history(&self) -> &[StateChange] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn find(&self, event: EventId) -> Option<&Transition> {
        self.index
            .get(&(self.current_state, event))?
            .iter()
            .map(|&i| &self.transitions[i])
            .find(|t| t.allowed())
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.find(event).is_some()
    }

    /// Send an event, returning the change if a transition fired
    pub fn send(&mut self, event: EventId) -> Option<StateChange> {
        let to = self.find(event)?.to_state;
        let change = StateChange {
            from: self.current_state,
            event,
            to,
        };
        self.current_state = to;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push(change);
        tracing::trace!(from = change.from, event, to, "state transition");
        Some(change)
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
