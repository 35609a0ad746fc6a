use std::sync::Arc;
use parking_lot::Mutex;
use ahash::AHashMap;

/// Editor-wide event bus
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<std::any::TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn std::any::Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the editor
pub mod events {
    use super::Event;
    use crate::model::RowId;
    use crate::store::MutationKind;

    /// The layout was replaced by a changed one
    #[derive(Debug, Clone)]
    pub struct LayoutChanged {
        pub kind: MutationKind,
        pub rows: usize,
        pub blocks: usize,
    }

    /// A block was opened for editing
    #[derive(Debug, Clone)]
    pub struct SessionOpened {
        pub row: RowId,
        pub index: usize,
    }

    /// The configuration session ended
    #[derive(Debug, Clone)]
    pub struct SessionClosed {
        pub committed: bool,
    }

    /// The layout was written for the preview surface
    #[derive(Debug, Clone)]
    pub struct PreviewExported {
        pub rows: usize,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        LayoutChanged,
        SessionOpened,
        SessionClosed,
        PreviewExported
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = std::any::TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_default().push(handler);
    }

    /// Publish an event to every handler subscribed to its type
    ///
    /// Handlers run without the lock held, so they may subscribe or publish
    /// on the same bus. A handler is not re-entered: an event of the same
    /// type published from inside it skips the handlers currently running.
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = std::any::TypeId::of::<E>();
        let mut running = match self.handlers.lock().get_mut(&type_id) {
            Some(event_handlers) => std::mem::take(event_handlers),
            None => return,
        };

        for handler in running.iter_mut() {
            handler.handle(&event);
        }

        // Put them back ahead of anything subscribed meanwhile
        let mut handlers = self.handlers.lock();
        let slot = handlers.entry(type_id).or_default();
        running.append(slot);
        *slot = running;
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Event handler backed by a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::{SessionClosed, SessionOpened};
    use super::*;
    use crate::model::RowId;

    #[test]
    fn test_handlers_only_see_their_event_type() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<SessionClosed>(handler_from_fn(move |event| {
            if let Some(closed) = event.as_any().downcast_ref::<SessionClosed>() {
                sink.lock().push(closed.committed);
            }
        }));

        bus.publish(SessionOpened { row: RowId(1), index: 0 });
        bus.publish(SessionClosed { committed: true });
        bus.publish(SessionClosed { committed: false });

        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn test_handler_may_publish_and_subscribe() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner_bus = bus.clone();
        let sink = seen.clone();
        bus.subscribe::<SessionOpened>(handler_from_fn(move |_| {
            inner_bus.publish(SessionClosed { committed: false });
            let late = sink.clone();
            inner_bus.subscribe::<SessionClosed>(handler_from_fn(move |_| late.lock().push("late")));
        }));
        let sink = seen.clone();
        bus.subscribe::<SessionClosed>(handler_from_fn(move |_| sink.lock().push("closed")));

        bus.publish(SessionOpened { row: RowId(1), index: 0 });
        assert_eq!(*seen.lock(), vec!["closed"]);

        // The opener still runs and now adds a second late subscriber
        bus.publish(SessionOpened { row: RowId(1), index: 0 });
        assert_eq!(*seen.lock(), vec!["closed", "closed", "late"]);
    }
}
