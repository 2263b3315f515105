//! Immutable state bags attached to Subjects.
//!
//! A [`State`] is a persistent collection of named slots stored
//! most-recent-first: [`State::with`] returns a new state sharing the tail of
//! the old one, and [`State::get`] sees the most recent value for a name.
//! States are immutable after construction and require no synchronization to
//! read.

use crate::identity::Name;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Value held by one state slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Name(Name),
    /// Opaque structured payload.
    Json(serde_json::Value),
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        StateValue::Int(v)
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        StateValue::Float(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Str(v.to_string())
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Str(v)
    }
}

impl From<Name> for StateValue {
    fn from(v: Name) -> Self {
        StateValue::Name(v)
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(v: serde_json::Value) -> Self {
        StateValue::Json(v)
    }
}

/// One named slot in a state chain.
struct Slot {
    name: Name,
    value: StateValue,
    prev: Option<Arc<Slot>>,
}

/// Immutable bag of named slots, most-recent-first.
#[derive(Clone, Default)]
pub struct State {
    head: Option<Arc<Slot>>,
    len: usize,
}

impl State {
    /// The empty state.
    pub fn empty() -> State {
        State::default()
    }

    /// Return a new state with `value` bound to `name`, shadowing any
    /// earlier slot for the same name.
    ///
    /// Idempotent against the head slot: re-binding the current name to an
    /// equal value returns a state sharing the same chain.
    pub fn with(&self, name: Name, value: impl Into<StateValue>) -> State {
        let value = value.into();
        if let Some(head) = &self.head {
            if head.name == name && head.value == value {
                return self.clone();
            }
        }
        State {
            head: Some(Arc::new(Slot {
                name,
                value,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// The most recent value bound to `name`, if any.
    pub fn get(&self, name: &Name) -> Option<&StateValue> {
        self.slots().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Number of slots, shadowed slots included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate slots most-recent-first.
    pub fn slots(&self) -> Slots<'_> {
        Slots {
            next: self.head.as_deref(),
        }
    }

    /// Drop shadowed slots, keeping the most recent value per name.
    pub fn compact(&self) -> State {
        let mut kept: Vec<(&Name, &StateValue)> = Vec::with_capacity(self.len);
        for (name, value) in self.slots() {
            if !kept.iter().any(|(n, _)| *n == name) {
                kept.push((name, value));
            }
        }
        if kept.len() == self.len {
            return self.clone();
        }
        let mut state = State::empty();
        for (name, value) in kept.into_iter().rev() {
            state = state.with(name.clone(), value.clone());
        }
        state
    }
}

/// Iterator over state slots, most-recent-first.
pub struct Slots<'a> {
    next: Option<&'a Slot>,
}

impl<'a> Iterator for Slots<'a> {
    type Item = (&'a Name, &'a StateValue);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        self.next = slot.prev.as_deref();
        Some((&slot.name, &slot.value))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots().map(|(n, v)| (n.path(), v)))
            .finish()
    }
}
