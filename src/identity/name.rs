//! Interned hierarchical names.
//!
//! A [`Name`] is a dotted path (`"circuit.conduit.channel"`) interned in a
//! process-wide table: equal paths always resolve to the same instance, so
//! equality and hashing work on pointer identity and a `Name` is safe to use
//! as a cache key. Names form a tree: each name links upward to the prefix
//! that encloses it, and interning a path also interns every prefix.

use crate::error::{Result, SubstrateError};
use parking_lot::RwLock;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Interned node: leaf segment plus the enclosing prefix.
struct NameNode {
    parent: Option<Name>,
    segment: Box<str>,
    path: Box<str>,
}

/// An interned, hierarchical dotted path.
///
/// Immutable; created once per distinct path and reused. Two `Name`s compare
/// equal if and only if they intern the same path.
#[derive(Clone)]
pub struct Name {
    node: Arc<NameNode>,
}

/// Process-wide intern table, keyed by full dotted path.
fn intern_table() -> &'static RwLock<HashMap<Box<str>, Name>> {
    static TABLE: OnceLock<RwLock<HashMap<Box<str>, Name>>> = OnceLock::new();
    TABLE.get_or_init(Default::default)
}

impl Name {
    /// Return the canonical interned `Name` for a dotted path, creating and
    /// caching it (and every prefix) on first use.
    ///
    /// Safe under concurrent calls with the same path: at most one interned
    /// instance survives. Rejects empty paths and empty segments
    /// (leading, trailing, or consecutive dots).
    pub fn intern(path: &str) -> Result<Name> {
        if path.is_empty() {
            return Err(SubstrateError::EmptyPath);
        }
        if path.split('.').any(str::is_empty) {
            return Err(SubstrateError::EmptySegment(path.to_string()));
        }

        if let Some(name) = intern_table().read().get(path) {
            return Ok(name.clone());
        }

        tracing::trace!(path, "interning name");
        let mut table = intern_table().write();
        let mut current: Option<Name> = None;
        let mut prefix = String::with_capacity(path.len());
        for segment in path.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            let entry = table.entry(prefix.as_str().into()).or_insert_with(|| Name {
                node: Arc::new(NameNode {
                    parent: current.clone(),
                    segment: segment.into(),
                    path: prefix.as_str().into(),
                }),
            });
            current = Some(entry.clone());
        }
        // Loop ran at least once: path is non-empty.
        Ok(current.expect("non-empty path"))
    }

    /// The leaf segment of this name.
    pub fn segment(&self) -> &str {
        &self.node.segment
    }

    /// The full dotted path.
    pub fn path(&self) -> &str {
        &self.node.path
    }

    /// The enclosing prefix, if this name is not a root.
    pub fn enclosure(&self) -> Option<&Name> {
        self.node.parent.as_ref()
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.node.path.split('.').count()
    }

    /// Extend this name by a single segment. Rejects empty segments and
    /// segments containing dots.
    pub fn child(&self, segment: &str) -> Result<Name> {
        if segment.is_empty() {
            return Err(SubstrateError::EmptySegment(segment.to_string()));
        }
        if segment.contains('.') {
            return Err(SubstrateError::DottedSegment(segment.to_string()));
        }
        Name::intern(&format!("{}.{}", self.node.path, segment))
    }

    /// Extend this name by a dotted suffix.
    pub fn extend(&self, suffix: &str) -> Result<Name> {
        if suffix.is_empty() {
            return Err(SubstrateError::EmptyPath);
        }
        Name::intern(&format!("{}.{}", self.node.path, suffix))
    }

    /// Iterate the segments root→leaf.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.node.path.split('.')
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.node) as usize).hash(state);
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.node.path)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.path)
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.node.path)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let path = String::deserialize(deserializer)?;
        Name::intern(&path).map_err(D::Error::custom)
    }
}
