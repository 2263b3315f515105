//! Memoizing percept cache.

use crate::flow::Substrate;
use crate::identity::{Name, Subject};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// Memoizes one percept instance per [`Name`].
///
/// A percept is an arbitrary typed instance associated 1:1 with a name.
/// Instances are created on demand by the factory supplied at construction
/// and reused for every later access to the same name. `P` must be `Clone`;
/// percepts with shared identity are expressed as `Arc<T>`.
///
/// The factory runs while the table's write lock is held, which is what
/// guarantees at most one invocation per name under concurrent first access.
/// It must not re-enter the same `Lookup`. A panicking factory unwinds
/// through [`percept`](Lookup::percept) leaving no entry cached, so the next
/// access retries.
pub struct Lookup<P> {
    percepts: RwLock<HashMap<Name, P>>,
    factory: Box<dyn Fn(&Name) -> P + Send + Sync>,
}

impl<P: Clone> Lookup<P> {
    /// Create a lookup backed by `factory`.
    pub fn new(factory: impl Fn(&Name) -> P + Send + Sync + 'static) -> Lookup<P> {
        Lookup {
            percepts: RwLock::new(HashMap::new()),
            factory: Box::new(factory),
        }
    }

    /// The percept for `name`, invoking the factory and caching the result
    /// if absent.
    ///
    /// Under concurrent first access exactly one factory invocation
    /// survives; later concurrent callers observe the winning instance, not
    /// their own.
    pub fn percept(&self, name: &Name) -> P {
        if let Some(percept) = self.percepts.read().get(name) {
            return percept.clone();
        }

        let mut percepts = self.percepts.write();
        if let Some(percept) = percepts.get(name) {
            return percept.clone();
        }
        tracing::debug!(percept = %name, "filling percept cache");
        let percept = (self.factory)(name);
        percepts.insert(name.clone(), percept.clone());
        percept
    }

    /// Convenience overload: the percept for a subject's name.
    pub fn percept_for(&self, subject: &Subject) -> P {
        self.percept(subject.name())
    }

    /// Convenience overload: the percept for an entity's subject name.
    pub fn percept_of(&self, substrate: &impl Substrate) -> P {
        self.percept(substrate.subject().name())
    }

    /// The cached percept for `name`, without creating one.
    pub fn find(&self, name: &Name) -> Option<P> {
        self.percepts.read().get(name).cloned()
    }

    /// Number of cached percepts.
    pub fn len(&self) -> usize {
        self.percepts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.percepts.read().is_empty()
    }

    /// Evict all entries. Cached instances are not disposed; the lookup
    /// manages the name-to-instance mapping, not instance lifecycle.
    pub fn clear(&self) {
        self.percepts.write().clear();
    }
}

impl<P> fmt::Debug for Lookup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lookup[size={}]", self.percepts.read().len())
    }
}
