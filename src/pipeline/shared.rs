//! Shared replay - One upstream execution, many observers.
//!
//! The upstream is connected lazily when the first observer subscribes and
//! stays connected until [`SharedReplay::stop`], no matter how many observers
//! come and go. The latest value is retained (buffer size 1) and replayed to
//! every new observer before it sees anything else.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::types::{Cleanup, Sink};

type Observer<T> = Rc<dyn Fn(&T)>;
type Connect<T> = Box<dyn FnOnce(Sink<T>) -> Cleanup>;

struct Inner<T> {
    latest: RefCell<Option<T>>,
    observers: RefCell<Vec<(u64, Observer<T>)>>,
    next_id: Cell<u64>,
    connect: RefCell<Option<Connect<T>>>,
    disconnect: RefCell<Option<Cleanup>>,
}

impl<T: Clone + 'static> Inner<T> {
    fn publish(&self, value: T) {
        *self.latest.borrow_mut() = Some(value.clone());

        // Snapshot: observers may subscribe or unsubscribe while notified.
        let observers: Vec<Observer<T>> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(&value);
        }
    }
}

/// Multicast stream with a retained latest value.
pub struct SharedReplay<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> SharedReplay<T> {
    /// Create from an upstream connector.
    ///
    /// `connect` receives the sink to publish into and returns the cleanup
    /// that disconnects the upstream. It runs at most once.
    pub fn new(connect: impl FnOnce(Sink<T>) -> Cleanup + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                latest: RefCell::new(None),
                observers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                connect: RefCell::new(Some(Box::new(connect))),
                disconnect: RefCell::new(None),
            }),
        }
    }

    /// Register an observer.
    ///
    /// The observer first receives the latest value (if any), then every
    /// value published afterwards.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription<T> {
        let observer: Observer<T> = Rc::new(observer);

        let latest = self.inner.latest.borrow().clone();
        if let Some(value) = latest {
            observer(&value);
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.observers.borrow_mut().push((id, observer));

        let connect = self.inner.connect.borrow_mut().take();
        if let Some(connect) = connect {
            let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
            let sink: Sink<T> = Rc::new(move |value| {
                if let Some(inner) = weak.upgrade() {
                    inner.publish(value);
                }
            });
            tracing::trace!("Connecting shared upstream");
            let disconnect = connect(sink);
            *self.inner.disconnect.borrow_mut() = Some(disconnect);
        }

        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Latest published value.
    pub fn latest(&self) -> Option<T> {
        self.inner.latest.borrow().clone()
    }

    /// Upstream is currently connected.
    pub fn is_connected(&self) -> bool {
        self.inner.disconnect.borrow().is_some()
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Disconnect the upstream and drop every observer.
    ///
    /// The upstream is never reconnected; the latest value stays readable.
    pub fn stop(&self) {
        self.inner.connect.borrow_mut().take();
        let disconnect = self.inner.disconnect.borrow_mut().take();
        if let Some(disconnect) = disconnect {
            tracing::trace!("Disconnecting shared upstream");
            disconnect();
        }
        self.inner.observers.borrow_mut().clear();
    }
}

/// Handle to a registered observer.
///
/// Dropping the handle removes the observer. The shared upstream stays
/// connected either way.
#[must_use = "dropping a Subscription removes its observer"]
pub struct Subscription<T> {
    inner: Weak<Inner<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Remove the observer.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.observers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
