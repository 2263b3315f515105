//! Subscription lifecycle handles.

use crate::flow::Substrate;
use crate::identity::{Capability, Identifier, Name, State, Subject};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Handle for one subscribe-call's lifetime.
///
/// Returned by [`Source::subscribe`](crate::Source::subscribe); holds the
/// parent subject (the source or reservoir it was created from) and the
/// engine's unsubscribe callback. Transitions open → closed exactly once:
/// the first [`close`](Subscription::close) runs the callback, every later
/// call is a no-op. Dropping an open subscription closes it.
///
/// Subscriptions carry no per-channel state: they govern only the
/// subscribe/unsubscribe lifecycle, not registrations made via a
/// [`Registrar`](crate::Registrar).
pub struct Subscription {
    parent: Subject,
    closed: AtomicBool,
    on_close: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    subject: OnceLock<Subject>,
}

impl Subscription {
    /// Create a subscription under `parent` whose teardown runs `on_close`.
    pub fn new(parent: Subject, on_close: impl FnOnce() + Send + 'static) -> Subscription {
        Subscription {
            parent,
            closed: AtomicBool::new(false),
            on_close: Mutex::new(Some(Box::new(on_close))),
            subject: OnceLock::new(),
        }
    }

    /// Close the subscription, firing the unsubscribe callback on the first
    /// call only. Idempotent; the closed flag flips before return.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(parent = %self.parent.name(), "closing subscription");
            if let Some(on_close) = self.on_close.lock().take() {
                on_close();
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Substrate for Subscription {
    /// Lazily built child subject under the parent, cached on first access.
    fn subject(&self) -> Subject {
        self.subject
            .get_or_init(|| {
                let id = Identifier::next();
                let name = Name::intern("subscription")
                    .and_then(|n| n.child(&id.to_string()))
                    .expect("subscription names are valid");
                Subject::new(
                    id,
                    name,
                    Capability::Subscription,
                    State::empty(),
                    Some(self.parent.clone()),
                )
            })
            .clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("parent", &self.parent)
            .field("closed", &self.is_closed())
            .finish()
    }
}
