//! Capture buffer over a subscribed source.

use crate::flow::{Source, Substrate};
use crate::identity::{Capability, Name, Subject};
use crate::subscribe::{Subscriber, Subscription};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// An observed emission, tagged with the emitting channel's identity.
///
/// Created once per emission; ownership transfers into the reservoir's
/// buffer and the pair is never mutated afterwards.
pub struct Capture<E> {
    subject: Subject,
    emission: E,
}

impl<E> Capture<E> {
    pub fn new(subject: Subject, emission: E) -> Capture<E> {
        Capture { subject, emission }
    }

    /// The emitting channel's subject.
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn emission(&self) -> &E {
        &self.emission
    }

    pub fn into_emission(self) -> E {
        self.emission
    }
}

impl<E: Clone> Clone for Capture<E> {
    fn clone(&self) -> Self {
        Capture {
            subject: self.subject.clone(),
            emission: self.emission.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Capture<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("subject", &self.subject)
            .field("emission", &self.emission)
            .finish()
    }
}

/// Passively accumulates every emission observed under a source, for later
/// retrieval via [`drain`](Reservoir::drain).
///
/// Construction subscribes an internal [`Subscriber`] to the source; for
/// every channel the engine discovers, the subscriber registers a pipe that
/// appends a [`Capture`] to a shared buffer while the reservoir is open.
/// The buffer takes concurrent writers and one drainer at a time.
///
/// Closing is one-way and idempotent: the first [`close`](Reservoir::close)
/// unsubscribes from the source and discards undrained captures; emissions
/// still in flight through the engine at that moment may or may not be
/// observed, and are ignored either way. Dropping the reservoir closes it.
pub struct Reservoir<E> {
    subject: OnceLock<Subject>,
    buffer: Arc<Mutex<Vec<Capture<E>>>>,
    closed: Arc<AtomicBool>,
    subscriber: Arc<Subscriber<E>>,
    subscription: Subscription,
}

impl<E: Send + 'static> Reservoir<E> {
    /// Subscribe a new reservoir to `source`.
    pub fn new(source: &impl Source<E>) -> Reservoir<E> {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));

        let subscriber = {
            let buffer = buffer.clone();
            let closed = closed.clone();
            Arc::new(Subscriber::new(
                Name::intern("reservoir.sink").expect("reservoir names are valid"),
                move |channel: &Subject, registrar| {
                    let buffer = buffer.clone();
                    let closed = closed.clone();
                    let channel = channel.clone();
                    registrar.register(Box::new(move |emission: E| {
                        if !closed.load(Ordering::Acquire) {
                            buffer.lock().push(Capture::new(channel.clone(), emission));
                        }
                    }));
                },
            ))
        };

        let subscription = source.subscribe(subscriber.clone());
        tracing::debug!(source = %source.subject().name(), "reservoir subscribed");

        Reservoir {
            subject: OnceLock::new(),
            buffer,
            closed,
            subscriber,
            subscription,
        }
    }
}

impl<E> Reservoir<E> {
    /// Atomically snapshot and clear the buffer, returning every capture
    /// accumulated since the previous drain.
    ///
    /// The whole backing vector is swapped out under a single exchange, so
    /// each capture is returned by exactly one drain: a concurrent append
    /// that takes the buffer lock before the exchange lands in this drain's
    /// result, one that takes it after lands in the next. Within the
    /// snapshot, captures from one channel keep their emission order. At
    /// most one drain should be in flight at a time.
    pub fn drain(&self) -> Vec<Capture<E>> {
        let drained = std::mem::take(&mut *self.buffer.lock());
        tracing::trace!(count = drained.len(), "reservoir drained");
        drained
    }

    /// Close the reservoir: unsubscribe from the source and discard any
    /// buffered, undrained captures. Idempotent; later emissions are
    /// silently ignored and later drains return empty.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!("closing reservoir");
            self.subscription.close();
            self.buffer.lock().clear();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// The internal subscriber registered with the source.
    pub fn subscriber(&self) -> &Arc<Subscriber<E>> {
        &self.subscriber
    }

    /// The subscription governing the source registration.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<E> Substrate for Reservoir<E> {
    /// The reservoir's own lazily materialized identity, independent of the
    /// source's.
    fn subject(&self) -> Subject {
        self.subject
            .get_or_init(|| {
                Subject::root(
                    Name::intern("reservoir").expect("reservoir names are valid"),
                    Capability::Reservoir,
                )
            })
            .clone()
    }
}

impl<E> Drop for Reservoir<E> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<E> fmt::Debug for Reservoir<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reservoir")
            .field("buffered", &self.buffer.lock().len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
