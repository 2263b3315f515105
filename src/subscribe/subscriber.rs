//! Named channel-discovery callbacks.

use crate::flow::{Pipe, Registrar, Substrate};
use crate::identity::{Capability, Name, Subject};
use crate::lookup::Lookup;
use std::fmt;
use std::sync::{Arc, OnceLock};

type Callback<E> = dyn Fn(&Subject, &dyn Registrar<E>) + Send + Sync;

/// A named callback invoked by the routing engine once per newly discovered
/// channel under a subscribed source.
///
/// Stateless with respect to individual channels. The callback may register
/// a [`Pipe`] through the supplied [`Registrar`] to receive future emissions
/// on that channel, or decline by registering nothing.
pub struct Subscriber<E> {
    name: Name,
    callback: Box<Callback<E>>,
    subject: OnceLock<Subject>,
}

impl<E: 'static> Subscriber<E> {
    /// Subscriber backed directly by a callback.
    pub fn new(
        name: Name,
        callback: impl Fn(&Subject, &dyn Registrar<E>) + Send + Sync + 'static,
    ) -> Subscriber<E> {
        Subscriber {
            name,
            callback: Box::new(callback),
            subject: OnceLock::new(),
        }
    }

    /// Subscriber backed by a lookup of pre-existing pipes keyed by channel
    /// name.
    ///
    /// On each discovered channel the lookup is consulted without creating:
    /// a cached pipe is registered, an absent name registers nothing. The
    /// absent case is not an error; it signals no interest in that channel.
    pub fn from_lookup<P>(name: Name, lookup: Arc<Lookup<P>>) -> Subscriber<E>
    where
        P: Pipe<E> + Clone + 'static,
    {
        Subscriber::new(name, move |channel: &Subject, registrar| {
            match lookup.find(channel.name()) {
                Some(pipe) => registrar.register(Box::new(move |emission: E| pipe.emit(emission))),
                None => {
                    tracing::trace!(channel = %channel.name(), "no pipe for channel, skipping")
                }
            }
        })
    }

    /// Engine-facing entry point: notify this subscriber of a newly
    /// discovered channel.
    pub fn notify(&self, channel: &Subject, registrar: &dyn Registrar<E>) {
        (self.callback)(channel, registrar)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }
}

impl<E> Substrate for Subscriber<E> {
    /// Lazily materialized identity, cached on first access.
    fn subject(&self) -> Subject {
        self.subject
            .get_or_init(|| Subject::root(self.name.clone(), Capability::Subscriber))
            .clone()
    }
}

impl<E> fmt::Debug for Subscriber<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").field("name", &self.name).finish()
    }
}
