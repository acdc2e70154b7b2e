use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Event;

// This type represents an owned future produced by one listener invocation
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// A callback invoked with an event and the name it was dispatched under.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn handle(&self, event: &dyn Event, event_name: &str);
}

/// Shared handle to a listener.
///
/// Registrations hold listeners through `Arc` so a subscriber can declare
/// one listener under several names, and so identity comparison
/// (`Arc::ptr_eq`) during subscriber removal stays meaningful.
pub type ListenerRef = Arc<dyn EventListener>;

/// Listener backed by a future-returning closure (internal helper)
struct FnListener {
    f: Box<dyn for<'a> Fn(&'a dyn Event, &'a str) -> BoxFuture<'a> + Send + Sync>,
}

impl fmt::Debug for FnListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").finish_non_exhaustive()
    }
}

#[async_trait]
impl EventListener for FnListener {
    async fn handle(&self, event: &dyn Event, event_name: &str) {
        (self.f)(event, event_name).await
    }
}

/// Wrap a future-returning closure as a listener
pub fn fn_listener<F>(f: F) -> ListenerRef
where
    F: for<'a> Fn(&'a dyn Event, &'a str) -> BoxFuture<'a> + Send + Sync + 'static,
{
    Arc::new(FnListener { f: Box::new(f) })
}

/// Wrap a synchronous closure as a listener
pub fn sync_listener<F>(f: F) -> ListenerRef
where
    F: Fn(&dyn Event, &str) + Send + Sync + 'static,
{
    Arc::new(FnListener {
        f: Box::new(move |event, event_name| {
            f(event, event_name);
            Box::pin(async {})
        }),
    })
}
