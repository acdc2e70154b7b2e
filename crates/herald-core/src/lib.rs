//! # herald-core
//!
//! In-process publish/subscribe event dispatching.
//!
//! Callers register listeners under string event names, each with an integer
//! priority, and later broadcast a payload by name. Listeners run
//! sequentially on the dispatching task, highest priority first. The
//! dispatcher never inspects payloads; listeners downcast them back to their
//! concrete types.

pub mod dispatcher;
pub mod listener;
pub mod subscriber;

use std::any::Any;
use std::fmt;

/// Type for listener registration handles
pub type ListenerId = u64;

/// Priority assigned when none is chosen explicitly.
pub const PRIORITY_DEFAULT: i32 = 0;
/// Conventional "run late" priority.
pub const PRIORITY_LOW: i32 = -1;
/// Conventional "run early" priority.
pub const PRIORITY_HIGH: i32 = 100;

/// Core event trait
///
/// Events are opaque payloads: the dispatcher never looks at them beyond
/// `Debug` logging. Any `'static + Send + Sync + Debug` value qualifies
/// through the blanket impl; listeners recover the concrete type with
/// [`Event::as_any`].
pub trait Event: Any + Send + Sync + fmt::Debug {
    /// Cast to `Any` for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + Send + Sync + fmt::Debug> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Re-export important types
pub use dispatcher::{EventDispatcher, Registration, SharedEventDispatcher, create_dispatcher};
pub use listener::{BoxFuture, EventListener, ListenerRef, fn_listener, sync_listener};
pub use subscriber::Subscriber;

// Test module declaration
#[cfg(test)]
mod tests;
