//! Collaborator contracts at the routing-engine boundary.
//!
//! The substrate never routes emissions itself: a routing engine implements
//! [`Source`] and [`Registrar`], and this crate supplies the
//! [`Subscriber`](crate::Subscriber)/[`Subscription`](crate::Subscription)
//! halves of the protocol plus sinks ([`Pipe`]) to register.

use crate::identity::Subject;
use crate::subscribe::{Subscriber, Subscription};
use std::sync::Arc;

/// Anything with a materialized identity.
pub trait Substrate {
    /// The identity of this entity. Implementations materialize it lazily
    /// on first call and return the same subject thereafter.
    fn subject(&self) -> Subject;
}

/// A sink for emissions on one channel.
///
/// Closures work directly: any `Fn(E) + Send + Sync` is a pipe.
pub trait Pipe<E>: Send + Sync {
    fn emit(&self, emission: E);
}

impl<E, F> Pipe<E> for F
where
    F: Fn(E) + Send + Sync,
{
    fn emit(&self, emission: E) {
        self(emission)
    }
}

/// Engine-side registration point handed to a subscriber's callback.
///
/// Calling [`register`](Registrar::register) binds a pipe to the channel the
/// callback is currently being notified about.
pub trait Registrar<E> {
    fn register(&self, pipe: Box<dyn Pipe<E>>);
}

/// A subscribable origin of emissions, owned by the routing engine.
///
/// The engine invokes the subscriber's callback (synchronously or
/// asynchronously, its choice) once per newly discovered channel and returns
/// a [`Subscription`] governing the registration's lifecycle.
pub trait Source<E>: Substrate {
    fn subscribe(&self, subscriber: Arc<Subscriber<E>>) -> Subscription;
}
