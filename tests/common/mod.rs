//! Shared test fixture: a minimal synchronous routing conduit.

#![allow(dead_code)]

use filament::{
    Capability, Name, Pipe, Registrar, Source, Subject, Subscriber, Subscription, Substrate,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type PipeList<E> = Arc<Mutex<Vec<Box<dyn Pipe<E>>>>>;

struct Channel<E> {
    subject: Subject,
    pipes: PipeList<E>,
}

struct ConduitInner<E> {
    subject: Subject,
    channels: Mutex<HashMap<Name, Channel<E>>>,
    subscribers: Mutex<HashMap<u64, Arc<Subscriber<E>>>>,
    next_token: AtomicU64,
}

/// Stands in for the routing engine: discovers channels synchronously,
/// notifies every live subscriber, and fans emissions out to registered
/// pipes.
pub struct StubConduit<E> {
    inner: Arc<ConduitInner<E>>,
}

struct ListRegistrar<'a, E> {
    pipes: &'a Mutex<Vec<Box<dyn Pipe<E>>>>,
}

impl<E> Registrar<E> for ListRegistrar<'_, E> {
    fn register(&self, pipe: Box<dyn Pipe<E>>) {
        self.pipes.lock().push(pipe);
    }
}

impl<E: Clone + Send + 'static> StubConduit<E> {
    pub fn new(name: &str) -> StubConduit<E> {
        StubConduit {
            inner: Arc::new(ConduitInner {
                subject: Subject::root(Name::intern(name).unwrap(), Capability::Source),
                channels: Mutex::new(HashMap::new()),
                subscribers: Mutex::new(HashMap::new()),
                next_token: AtomicU64::new(1),
            }),
        }
    }

    /// Create (or fetch) a channel, notifying every live subscriber of a new
    /// one. Returns the channel's subject.
    pub fn channel(&self, path: &str) -> Subject {
        let name = Name::intern(path).unwrap();
        {
            let channels = self.inner.channels.lock();
            if let Some(channel) = channels.get(&name) {
                return channel.subject.clone();
            }
        }

        let subject = self
            .inner
            .subject
            .child(name.clone(), Capability::Channel);
        let pipes: PipeList<E> = Arc::new(Mutex::new(Vec::new()));
        self.inner.channels.lock().insert(
            name,
            Channel {
                subject: subject.clone(),
                pipes: pipes.clone(),
            },
        );

        let subscribers: Vec<_> = self.inner.subscribers.lock().values().cloned().collect();
        for subscriber in subscribers {
            subscriber.notify(&subject, &ListRegistrar { pipes: &*pipes });
        }
        subject
    }

    /// Route one emission to every pipe registered on the channel.
    pub fn emit(&self, path: &str, emission: E) {
        let pipes = {
            let channels = self.inner.channels.lock();
            let name = Name::intern(path).unwrap();
            channels
                .get(&name)
                .unwrap_or_else(|| panic!("unknown channel {path}"))
                .pipes
                .clone()
        };
        for pipe in pipes.lock().iter() {
            pipe.emit(emission.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }
}

impl<E> Substrate for StubConduit<E> {
    fn subject(&self) -> Subject {
        self.inner.subject.clone()
    }
}

impl<E: Clone + Send + 'static> Source<E> for StubConduit<E> {
    fn subscribe(&self, subscriber: Arc<Subscriber<E>>) -> Subscription {
        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);

        let existing: Vec<_> = {
            let channels = self.inner.channels.lock();
            channels
                .values()
                .map(|c| (c.subject.clone(), c.pipes.clone()))
                .collect()
        };
        for (subject, pipes) in existing {
            subscriber.notify(&subject, &ListRegistrar { pipes: &*pipes });
        }

        self.inner.subscribers.lock().insert(token, subscriber);

        let inner = self.inner.clone();
        Subscription::new(self.inner.subject.clone(), move || {
            inner.subscribers.lock().remove(&token);
        })
    }
}
