use std::sync::{Arc, Mutex};

/// The two shared-state signals. No payload travels with them; subscribers
/// re-derive fresh state themselves (re-fetch, re-read the log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    PostsChanged,
    NotificationsChanged,
}

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Listener {
    id: u64,
    topic: Topic,
    callback: Callback,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// In-process cross-view broadcast. Delivery is synchronous, in
/// registration order, fire-and-forget; duplicate signals are harmless.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `topic`. The returned guard deregisters on
    /// drop; a view must keep it alive exactly as long as it is mounted so
    /// signals never reach torn-down state.
    pub fn subscribe(&self, topic: Topic, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut inner = self.inner.lock().expect("bus lock");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(Listener {
            id,
            topic,
            callback: Arc::new(callback),
        });
        Subscription {
            bus: self.clone(),
            id,
        }
    }

    pub fn emit(&self, topic: Topic) {
        // Clone the callbacks out of the lock so a listener may subscribe
        // or emit reentrantly without deadlocking.
        let callbacks: Vec<Callback> = {
            let inner = self.inner.lock().expect("bus lock");
            inner
                .listeners
                .iter()
                .filter(|listener| listener.topic == topic)
                .map(|listener| listener.callback.clone())
                .collect()
        };
        for callback in callbacks {
            callback();
        }
    }

    fn unsubscribe(&self, id: u64) {
        let mut inner = self.inner.lock().expect("bus lock");
        inner.listeners.retain(|listener| listener.id != id);
    }
}

/// RAII handle for a registered listener.
pub struct Subscription {
    bus: EventBus,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn delivers_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let order = order.clone();
            bus.subscribe(Topic::PostsChanged, move || {
                order.lock().unwrap().push("first")
            })
        };
        let second = {
            let order = order.clone();
            bus.subscribe(Topic::PostsChanged, move || {
                order.lock().unwrap().push("second")
            })
        };

        bus.emit(Topic::PostsChanged);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
        drop(first);
        drop(second);
    }

    #[test]
    fn topics_are_independent() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _sub = {
            let hits = hits.clone();
            bus.subscribe(Topic::NotificationsChanged, move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        bus.emit(Topic::PostsChanged);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        bus.emit(Topic::NotificationsChanged);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_subscription_stops_receiving() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let sub = {
            let hits = hits.clone();
            bus.subscribe(Topic::PostsChanged, move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };

        bus.emit(Topic::PostsChanged);
        drop(sub);
        bus.emit(Topic::PostsChanged);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn emit_without_listeners_is_a_noop() {
        let bus = EventBus::new();
        bus.emit(Topic::PostsChanged);
    }

    #[test]
    fn listener_may_emit_reentrantly() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _counter = {
            let hits = hits.clone();
            bus.subscribe(Topic::NotificationsChanged, move || {
                hits.fetch_add(1, Ordering::SeqCst);
            })
        };
        let _relay = {
            let relay_bus = bus.clone();
            bus.subscribe(Topic::PostsChanged, move || {
                relay_bus.emit(Topic::NotificationsChanged);
            })
        };

        bus.emit(Topic::PostsChanged);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
