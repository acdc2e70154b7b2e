use std::collections::HashMap;

use crate::listener::ListenerRef;

/// Bulk-registration capability.
///
/// A subscriber declares the listeners it wants attached per event name;
/// [`add_subscriber`](crate::EventDispatcher::add_subscriber) registers
/// every declared pair at the default priority and
/// [`remove_subscriber`](crate::EventDispatcher::remove_subscriber) detaches
/// them again. The dispatcher never stores the subscriber itself.
pub trait Subscriber: Send + Sync {
    /// The event-name-to-listeners mapping this subscriber wants attached.
    ///
    /// Listener order within a name is registration order. Implementations
    /// must return the same [`ListenerRef`] values on every call (clone
    /// stored `Arc`s) so removal can identify them.
    fn subscribed_events(&self) -> HashMap<String, Vec<ListenerRef>>;
}
