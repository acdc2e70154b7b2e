//! Demo caller for the herald-core dispatcher: wires a subscriber plus one
//! high-priority inline listener to `user.created` and broadcasts a single
//! event for a made-up user.

use std::collections::HashMap;
use std::sync::Arc;

use clap::Parser;
use log::info;

use herald_core::{
    Event, ListenerRef, PRIORITY_HIGH, Subscriber, create_dispatcher, sync_listener,
};

const USER_CREATED: &str = "user.created";

/// Herald demo: broadcast a user-created event through the dispatcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Login of the demo user
    #[arg(long, default_value = "twm")]
    login: String,

    /// Email of the demo user
    #[arg(long, default_value = "test@example.com")]
    email: String,
}

#[derive(Debug, Clone)]
struct User {
    id: u32,
    login: String,
    email: String,
}

#[derive(Debug, Clone)]
struct UserCreatedEvent {
    user: User,
}

/// Subscriber owning the user lifecycle listeners.
///
/// The listeners are built once and stored, so `subscribed_events` hands out
/// the same Arcs every call and the subscriber stays removable.
struct UserSubscriber {
    record_signup: ListenerRef,
    send_welcome_email: ListenerRef,
}

impl UserSubscriber {
    fn new() -> Self {
        Self {
            record_signup: sync_listener(|event: &dyn Event, event_name: &str| {
                if let Some(evt) = event.as_any().downcast_ref::<UserCreatedEvent>() {
                    println!("recording signup #{} from '{event_name}'", evt.user.id);
                }
            }),
            send_welcome_email: sync_listener(|event: &dyn Event, _event_name: &str| {
                if let Some(evt) = event.as_any().downcast_ref::<UserCreatedEvent>() {
                    println!("send welcome email to {}", evt.user.email);
                }
            }),
        }
    }
}

impl Subscriber for UserSubscriber {
    fn subscribed_events(&self) -> HashMap<String, Vec<ListenerRef>> {
        HashMap::from([(
            USER_CREATED.to_string(),
            vec![
                Arc::clone(&self.record_signup),
                Arc::clone(&self.send_welcome_email),
            ],
        )])
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = CliArgs::parse();

    let dispatcher = create_dispatcher();

    let subscriber = UserSubscriber::new();
    dispatcher.add_subscriber(&subscriber).await;

    // Fires before the subscriber's default-priority listeners
    dispatcher
        .add_listener(
            USER_CREATED,
            sync_listener(|event: &dyn Event, event_name: &str| {
                println!("event: {event:?}\tname: {event_name}");
            }),
            PRIORITY_HIGH,
        )
        .await;

    let user = User {
        id: 1,
        login: args.login,
        email: args.email,
    };
    info!("dispatching {USER_CREATED} for user '{}'", user.login);

    dispatcher
        .dispatch(USER_CREATED, &UserCreatedEvent { user })
        .await;
}
