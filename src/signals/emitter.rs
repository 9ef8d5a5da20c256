use std::{
    fmt,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

/// Identifier of one live connection on a [`SignalSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// A callback invoked with the payload of an emitted signal.
///
/// Two handlers are equal only when they share the same allocation, which is
/// what lets a tracker find the binding that a given handler created.
pub struct Handler<P>(Arc<dyn Fn(&P) + Send + Sync>);

impl<P> Handler<P> {
    /// Wraps a closure as a handler.
    pub fn new(callback: impl Fn(&P) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    /// Invokes the handler with a payload.
    pub fn call(&self, payload: &P) {
        (self.0)(payload);
    }
}

impl<P> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<P> PartialEq for Handler<P> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<P> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Anything handlers can be connected to by signal name.
pub trait SignalSource<P>: Send + Sync {
    /// Connects a handler to the named signal.
    fn connect(&self, signal: &str, handler: Handler<P>) -> HandlerId;

    /// Removes a connection. Returns `false` if the id was not connected.
    fn disconnect(&self, id: HandlerId) -> bool;
}

struct Connection<P> {
    id: HandlerId,
    signal: String,
    handler: Handler<P>,
}

/// In-process signal source delivering payloads to connected handlers.
///
/// Handlers run on the emitting thread after the connection list lock has
/// been released, so a handler may connect or disconnect without deadlocking.
pub struct Emitter<P> {
    connections: Mutex<Vec<Connection<P>>>,
    next_id: AtomicU64,
}

impl<P> Emitter<P> {
    /// Creates an emitter with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Delivers `payload` to every handler connected to `signal`.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&self, signal: &str, payload: &P) -> usize {
        let handlers: Vec<Handler<P>> = self
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|connection| connection.signal == signal)
            .map(|connection| connection.handler.clone())
            .collect();

        for handler in &handlers {
            handler.call(payload);
        }

        handlers.len()
    }

    /// Number of handlers currently connected to `signal`.
    pub fn handler_count(&self, signal: &str) -> usize {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|connection| connection.signal == signal)
            .count()
    }

    /// Drops every connection.
    pub fn disconnect_all(&self) {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> SignalSource<P> for Emitter<P> {
    fn connect(&self, signal: &str, handler: Handler<P>) -> HandlerId {
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Connection {
                id,
                signal: signal.to_string(),
                handler,
            });

        id
    }

    fn disconnect(&self, id: HandlerId) -> bool {
        let mut connections = self
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = connections.len();
        connections.retain(|connection| connection.id != id);

        connections.len() != before
    }
}
