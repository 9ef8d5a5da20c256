use std::sync::Arc;

use tracing::{debug, trace};

use super::{Handler, HandlerId, SignalSource};

/// Errors raised by [`SignalTracker`].
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// The tracker was disposed and accepts no new bindings.
    #[error("signal tracker '{context}' is disposed")]
    Disposed {
        /// Context label of the rejected binding
        context: String,
    },
}

type Release = Box<dyn Fn(HandlerId) -> bool + Send + Sync>;

struct Binding<P> {
    source: usize,
    signal: String,
    handler: Handler<P>,
    context: String,
    id: HandlerId,
    release: Release,
}

impl<P> Binding<P> {
    fn matches(&self, source: usize, signal: &str, handler: &Handler<P>, context: &str) -> bool {
        self.source == source
            && self.signal == signal
            && self.handler == *handler
            && self.context == context
    }
}

/// Registry of live subscriptions keyed by source, signal, handler and context.
///
/// Every binding is released exactly once: by [`unsubscribe`](Self::unsubscribe),
/// by [`unsubscribe_all`](Self::unsubscribe_all), or when the tracker is dropped.
pub struct SignalTracker<P> {
    bindings: Vec<Binding<P>>,
    disposed: bool,
}

fn source_address<S: ?Sized>(source: &Arc<S>) -> usize {
    Arc::as_ptr(source).cast::<()>() as usize
}

impl<P: 'static> SignalTracker<P> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            disposed: false,
        }
    }

    /// Connects `handler` to `signal` on `source` and records the binding.
    ///
    /// # Errors
    /// Returns `SignalError::Disposed` once [`dispose`](Self::dispose) has run.
    pub fn subscribe<S>(
        &mut self,
        source: &Arc<S>,
        signal: &str,
        handler: Handler<P>,
        context: &str,
    ) -> Result<HandlerId, SignalError>
    where
        S: SignalSource<P> + ?Sized + 'static,
    {
        if self.disposed {
            return Err(SignalError::Disposed {
                context: context.to_string(),
            });
        }

        let id = source.connect(signal, handler.clone());
        let owner = Arc::clone(source);
        trace!(signal, context, "subscribed");

        self.bindings.push(Binding {
            source: source_address(source),
            signal: signal.to_string(),
            handler,
            context: context.to_string(),
            id,
            release: Box::new(move |id| owner.disconnect(id)),
        });

        Ok(id)
    }

    /// Releases the first binding equal to the given tuple.
    ///
    /// A tuple that matches nothing is ignored, so teardown paths may call
    /// this more than once. Returns whether a binding was released.
    pub fn unsubscribe<S>(
        &mut self,
        source: &Arc<S>,
        signal: &str,
        handler: &Handler<P>,
        context: &str,
    ) -> bool
    where
        S: SignalSource<P> + ?Sized,
    {
        let address = source_address(source);
        let Some(index) = self
            .bindings
            .iter()
            .position(|binding| binding.matches(address, signal, handler, context))
        else {
            trace!(signal, context, "no matching binding");
            return false;
        };

        let binding = self.bindings.remove(index);
        (binding.release)(binding.id);

        true
    }

    /// Releases every tracked binding.
    pub fn unsubscribe_all(&mut self) {
        if !self.bindings.is_empty() {
            debug!(count = self.bindings.len(), "releasing signal bindings");
        }

        for binding in self.bindings.drain(..) {
            (binding.release)(binding.id);
        }
    }

    /// Releases every binding and refuses new ones.
    pub fn dispose(&mut self) {
        self.unsubscribe_all();
        self.disposed = true;
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings are live.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<P: 'static> Default for SignalTracker<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Drop for SignalTracker<P> {
    fn drop(&mut self) {
        for binding in self.bindings.drain(..) {
            (binding.release)(binding.id);
        }
    }
}
