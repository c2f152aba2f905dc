use std::{any::Any, collections::HashMap};

use dioxus::prelude::*;
use futures_util::stream::StreamExt;

/// Gives an event type the identifier subscribers are registered under.
///
/// Implementing this trait on a `Clone + Debug + 'static` type is enough to
/// make it publishable on the [EventBus].
pub trait EventId {
    /// Must be unique across all event types
    fn event_id() -> &'static str;
}

/// Type-erased event travelling through the bus.
pub trait Event: core::fmt::Debug + CloneEvent {
    fn event_id(&self) -> &'static str;
    fn into_box_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<E: EventId + Clone + 'static + core::fmt::Debug> Event for E {
    fn event_id(&self) -> &'static str {
        E::event_id()
    }
    fn into_box_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Lets every subscriber receive its own copy of a boxed event.
pub trait CloneEvent {
    fn clone_event(&self) -> Box<dyn Event>;
}

impl<E: Event + Clone + 'static> CloneEvent for E {
    fn clone_event(&self) -> Box<dyn Event> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Event> {
    fn clone(&self) -> Self {
        self.clone_event()
    }
}

type Handler = Box<dyn Fn(Box<dyn Event>)>;

enum EventBusCommandInner {
    Subscribe {
        event_id: &'static str,
        handler: Handler,
    },
    Publish {
        event: Box<dyn Event>,
    },
}

impl std::fmt::Debug for EventBusCommandInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subscribe { event_id, .. } => f
                .debug_struct("Subscribe")
                .field("event_id", event_id)
                .finish_non_exhaustive(),
            Self::Publish { event } => f.debug_struct("Publish").field("event", event).finish(),
        }
    }
}

pub struct EventBusCommand(EventBusCommandInner);
pub type EventBus = Coroutine<EventBusCommand>;

/// Event bus service coroutine
pub(super) fn use_event_bus_service() -> EventBus {
    use_coroutine(
        move |mut rx: UnboundedReceiver<EventBusCommand>| async move {
            log::info!("event_bus_service (coroutine) - start");

            let mut subscribers: HashMap<&str, Vec<Handler>> = HashMap::new();

            while let Some(EventBusCommand(cmd)) = rx.next().await {
                log::debug!("event_bus_service (coroutine) - Processing command {cmd:?}...");
                match cmd {
                    EventBusCommandInner::Subscribe { event_id, handler } => {
                        subscribers.entry(event_id).or_default().push(handler);
                        log::debug!("event_bus_service - Subscribed to {event_id} events");
                    }
                    EventBusCommandInner::Publish { event } => {
                        dispatch(&subscribers, event);
                    }
                }
                log::debug!("event_bus_service (coroutine) - Command processed");
            }
        },
    )
}

fn dispatch(subscribers: &HashMap<&str, Vec<Handler>>, event: Box<dyn Event>) {
    let event_id = event.event_id();
    let handlers = subscribers.get(event_id).map(Vec::as_slice).unwrap_or_default();
    log::debug!(
        "event_bus_service - Publishing {event_id} event to {} subscribers",
        handlers.len()
    );
    for handler in handlers {
        handler(event.clone());
    }
}

pub fn publish_event<E: Event + 'static>(event_bus_service: EventBus, event: E) {
    event_bus_service.send(EventBusCommand(EventBusCommandInner::Publish {
        event: Box::new(event),
    }));
}

pub fn subscribe_event<E: Event + EventId + 'static, F: Fn(E) + 'static>(
    event_bus_service: EventBus,
    handler: F,
) {
    let event_id = <E as EventId>::event_id();
    let handler: Handler = Box::new(move |boxed: Box<dyn Event>| {
        // Handlers are only ever registered under the id of their own event type
        match boxed.into_box_any().downcast::<E>() {
            Ok(event) => handler(*event),
            Err(_) => log::error!("event_bus_service - Mistyped {event_id} event dropped"),
        }
    });
    event_bus_service.send(EventBusCommand(EventBusCommandInner::Subscribe {
        event_id,
        handler,
    }));
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(u8);
    impl EventId for Ping {
        fn event_id() -> &'static str {
            "ping"
        }
    }

    #[derive(Debug, Clone)]
    struct Pong;
    impl EventId for Pong {
        fn event_id() -> &'static str {
            "pong"
        }
    }

    #[test]
    fn dispatch_reaches_only_matching_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers: HashMap<&str, Vec<Handler>> = HashMap::new();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            subscribers.entry("ping").or_default().push(Box::new(move |e| {
                let ping = e.into_box_any().downcast::<Ping>().unwrap();
                seen.borrow_mut().push((tag, ping.0));
            }));
        }

        dispatch(&subscribers, Box::new(Ping(3)));
        dispatch(&subscribers, Box::new(Pong));

        assert_eq!(*seen.borrow(), vec![("a", 3), ("b", 3)]);
    }
}
