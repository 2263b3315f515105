//! Hierarchical identity records.

use crate::identity::{Identifier, Name, State};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime role an entity declares for its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Circuit,
    Conduit,
    Channel,
    Pipe,
    Source,
    Percept,
    Reservoir,
    Subscriber,
    Subscription,
}

struct SubjectInner {
    id: Identifier,
    name: Name,
    capability: Capability,
    state: State,
    parent: Option<Subject>,
}

/// The identity of a runtime entity.
///
/// Carries an [`Identifier`], a [`Name`], a declared [`Capability`], an
/// attached [`State`] bag, and an optional upward link to the parent subject.
/// Parent links only ever point upward, so the identity graph is a tree.
/// Immutable after construction; clones share the same record.
///
/// Two subjects with equal identifiers are the same logical entity: equality
/// and hashing go through the identifier.
#[derive(Clone)]
pub struct Subject {
    inner: Arc<SubjectInner>,
}

impl Subject {
    /// Pure constructor. No caching happens here; owning entities decide
    /// when to materialize their subject.
    pub fn new(
        id: Identifier,
        name: Name,
        capability: Capability,
        state: State,
        parent: Option<Subject>,
    ) -> Subject {
        Subject {
            inner: Arc::new(SubjectInner {
                id,
                name,
                capability,
                state,
                parent,
            }),
        }
    }

    /// Root subject with a fresh identifier and empty state.
    pub fn root(name: Name, capability: Capability) -> Subject {
        Subject::new(Identifier::next(), name, capability, State::empty(), None)
    }

    /// Child subject under `self`, with a fresh identifier and empty state.
    pub fn child(&self, name: Name, capability: Capability) -> Subject {
        Subject::new(
            Identifier::next(),
            name,
            capability,
            State::empty(),
            Some(self.clone()),
        )
    }

    pub fn id(&self) -> Identifier {
        self.inner.id
    }

    pub fn name(&self) -> &Name {
        &self.inner.name
    }

    pub fn capability(&self) -> Capability {
        self.inner.capability
    }

    pub fn state(&self) -> &State {
        &self.inner.state
    }

    /// The enclosing subject in the identity tree, if any.
    pub fn enclosure(&self) -> Option<&Subject> {
        self.inner.parent.as_ref()
    }

    /// Number of subjects on the path from the root to this one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut current = self;
        while let Some(parent) = current.enclosure() {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Render the ancestry root→leaf, names joined with `/`.
    pub fn path(&self) -> String {
        let mut names = Vec::with_capacity(self.depth());
        let mut current = Some(self);
        while let Some(subject) = current {
            names.push(subject.name().path());
            current = subject.enclosure();
        }
        names.reverse();
        names.join("/")
    }
}

impl PartialEq for Subject {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Subject {}

impl Hash for Subject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("capability", &self.inner.capability)
            .finish()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
