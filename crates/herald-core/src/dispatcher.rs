use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::listener::ListenerRef;
use crate::subscriber::Subscriber;
use crate::{Event, ListenerId, PRIORITY_DEFAULT};

//--------------------------------------------------
// Registration
//--------------------------------------------------

/// A listener registered under an event name, with its priority and handle.
#[derive(Clone)]
pub struct Registration {
    id: ListenerId,
    priority: i32,
    listener: ListenerRef,
}

impl Registration {
    /// Handle assigned by [`EventDispatcher::add_listener`]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Priority this listener was registered with; higher runs earlier
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The registered listener
    pub fn listener(&self) -> &ListenerRef {
        &self.listener
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

//--------------------------------------------------
// EventDispatcher (single-owner registry)
//--------------------------------------------------

/// Event dispatcher owning the listener registry.
///
/// This is the single-owner form: operations take `&self`/`&mut self` and do
/// no locking. Concurrent callers share one through
/// [`SharedEventDispatcher`].
pub struct EventDispatcher {
    listeners: HashMap<String, Vec<Registration>>,
    next_listener_id: ListenerId,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registration_count: usize = self.listeners.values().map(|v| v.len()).sum();
        f.debug_struct("EventDispatcher")
            .field("event_names", &self.listeners.len())
            .field("registrations", &registration_count)
            .field("next_listener_id", &self.next_listener_id)
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_listener_id: 1,
        }
    }

    /// Register a listener under an event name and return its handle.
    ///
    /// Appends a new registration; there is no deduplication, so the same
    /// listener registered twice fires once per registration. Never fails.
    pub fn add_listener(
        &mut self,
        event_name: &str,
        listener: ListenerRef,
        priority: i32,
    ) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners
            .entry(event_name.to_string())
            .or_default()
            .push(Registration { id, priority, listener });
        log::trace!("registered listener {id} for '{event_name}' (priority {priority})");
        id
    }

    /// Remove the registration with the given handle from an event name.
    ///
    /// Other registrations keep their relative order. An unknown handle or
    /// name is a silent no-op; the return value reports whether anything was
    /// removed.
    pub fn remove_listener(&mut self, event_name: &str, id: ListenerId) -> bool {
        let Some(registrations) = self.listeners.get_mut(event_name) else {
            return false;
        };
        let Some(index) = registrations.iter().position(|r| r.id == id) else {
            return false;
        };
        registrations.remove(index);
        if registrations.is_empty() {
            self.listeners.remove(event_name);
        }
        log::trace!("removed listener {id} from '{event_name}'");
        true
    }

    /// Whether any listener is registered under the event name
    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listeners.get(event_name).is_some_and(|l| !l.is_empty())
    }

    /// Snapshot of the registrations for an event name, highest priority
    /// first.
    ///
    /// The sort is stable: registrations with equal priority keep their
    /// insertion order. The snapshot is detached from the registry, so later
    /// mutation never changes a sequence already handed out.
    pub fn sorted_listeners(&self, event_name: &str) -> Vec<Registration> {
        let mut registrations = self.listeners.get(event_name).cloned().unwrap_or_default();
        registrations.sort_by_key(|r| Reverse(r.priority));
        registrations
    }

    /// Dispatch an event to every listener registered under the name.
    ///
    /// Takes one sorted snapshot, then runs each listener sequentially on
    /// the calling task, passing the event and the name it was dispatched
    /// under. Returns once all listeners have run; a name without listeners
    /// returns immediately. Listener faults are not caught: a panicking
    /// listener unwinds into the caller and aborts the remaining listeners
    /// of this call.
    pub async fn dispatch(&self, event_name: &str, event: &dyn Event) {
        let snapshot = self.sorted_listeners(event_name);
        log::debug!("dispatching '{event_name}' to {} listeners", snapshot.len());
        for registration in &snapshot {
            registration.listener.handle(event, event_name).await;
        }
    }

    /// Register every listener a subscriber declares, at [`PRIORITY_DEFAULT`].
    pub fn add_subscriber(&mut self, subscriber: &dyn Subscriber) {
        for (event_name, listeners) in subscriber.subscribed_events() {
            for listener in listeners {
                self.add_listener(&event_name, listener, PRIORITY_DEFAULT);
            }
        }
    }

    /// Remove every listener a subscriber declares.
    ///
    /// Each declared listener removes the first registration under its name
    /// holding the same `Arc` (identity comparison). A subscriber must hand
    /// out the same [`ListenerRef`] values it was added with; declared
    /// listeners with no identical registration are silently skipped.
    pub fn remove_subscriber(&mut self, subscriber: &dyn Subscriber) {
        for (event_name, listeners) in subscriber.subscribed_events() {
            for listener in listeners {
                self.remove_matching(&event_name, &listener);
            }
        }
    }

    fn remove_matching(&mut self, event_name: &str, listener: &ListenerRef) -> bool {
        let Some(registrations) = self.listeners.get_mut(event_name) else {
            return false;
        };
        let Some(index) = registrations
            .iter()
            .position(|r| Arc::ptr_eq(&r.listener, listener))
        else {
            return false;
        };
        let id = registrations[index].id;
        registrations.remove(index);
        if registrations.is_empty() {
            self.listeners.remove(event_name);
        }
        log::trace!("removed listener {id} from '{event_name}'");
        true
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

//--------------------------------------------------
// SharedEventDispatcher (concurrent facade)
//--------------------------------------------------

/// Thread-safe shared event dispatcher.
///
/// Cheap to clone; clones share one registry behind a reader-writer lock.
/// Queries take the read lock, mutations the write lock.
#[derive(Clone)]
pub struct SharedEventDispatcher {
    dispatcher: Arc<RwLock<EventDispatcher>>,
}

impl fmt::Debug for SharedEventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedEventDispatcher").finish_non_exhaustive()
    }
}

impl SharedEventDispatcher {
    pub fn new() -> Self {
        Self {
            dispatcher: Arc::new(RwLock::new(EventDispatcher::new())),
        }
    }

    /// Register a listener under an event name and return its handle.
    pub async fn add_listener(
        &self,
        event_name: &str,
        listener: ListenerRef,
        priority: i32,
    ) -> ListenerId {
        self.dispatcher
            .write()
            .await
            .add_listener(event_name, listener, priority)
    }

    /// Remove the registration with the given handle from an event name.
    pub async fn remove_listener(&self, event_name: &str, id: ListenerId) -> bool {
        self.dispatcher.write().await.remove_listener(event_name, id)
    }

    /// Whether any listener is registered under the event name
    pub async fn has_listeners(&self, event_name: &str) -> bool {
        self.dispatcher.read().await.has_listeners(event_name)
    }

    /// Snapshot of the registrations for an event name, highest priority
    /// first (stable for equal priorities).
    pub async fn sorted_listeners(&self, event_name: &str) -> Vec<Registration> {
        self.dispatcher.read().await.sorted_listeners(event_name)
    }

    /// Dispatch an event to every listener registered under the name.
    ///
    /// The priority-sorted snapshot is taken once, under the read lock, and
    /// the lock is released before the first listener runs: listeners may
    /// register or remove listeners during a dispatch without deadlocking,
    /// and the in-flight snapshot is unaffected. Listeners run sequentially
    /// on the calling task; panics propagate to the caller.
    pub async fn dispatch(&self, event_name: &str, event: &dyn Event) {
        let snapshot = self.dispatcher.read().await.sorted_listeners(event_name);
        log::debug!("dispatching '{event_name}' to {} listeners", snapshot.len());
        for registration in &snapshot {
            registration.listener.handle(event, event_name).await;
        }
    }

    /// Register every listener a subscriber declares, at [`PRIORITY_DEFAULT`].
    pub async fn add_subscriber(&self, subscriber: &dyn Subscriber) {
        self.dispatcher.write().await.add_subscriber(subscriber)
    }

    /// Remove every listener a subscriber declares (identity comparison, see
    /// [`EventDispatcher::remove_subscriber`]).
    pub async fn remove_subscriber(&self, subscriber: &dyn Subscriber) {
        self.dispatcher.write().await.remove_subscriber(subscriber)
    }
}

impl Default for SharedEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new shared dispatcher instance
pub fn create_dispatcher() -> SharedEventDispatcher {
    SharedEventDispatcher::new()
}
