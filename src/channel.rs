// SPDX-License-Identifier: MPL-2.0
//! Typed publish/subscribe bus.
//!
//! The bus is owned by the application root and handed to whoever needs to
//! publish or listen; cloning it yields another handle to the same registry.
//! Handlers are keyed by `(topic, id)`, so several presenters can listen on
//! one topic under distinct ids. Each subscription also returns a
//! [`Registration`] that removes exactly that handler, even after a later
//! subscriber has taken over the same id.
//!
//! Delivery is synchronous and unbuffered: a payload published while nobody
//! listens on its topic is dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

type Handler<P> = Rc<dyn Fn(&P)>;

struct Subscriber<P> {
    key: u64,
    handler: Handler<P>,
}

struct Registry<P> {
    topics: BTreeMap<String, BTreeMap<String, Subscriber<P>>>,
    next_key: u64,
}

/// Receipt for one `subscribe` call, used to undo that call alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    topic: String,
    id: String,
    key: u64,
}

impl Registration {
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Handle to a shared subscriber registry for payloads of type `P`.
pub struct EventBus<P> {
    registry: Rc<RefCell<Registry<P>>>,
}

impl<P: 'static> EventBus<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                topics: BTreeMap::new(),
                next_key: 0,
            })),
        }
    }

    /// Delivers `payload` to every handler registered on `topic`.
    ///
    /// Returns how many handlers received it. Handlers may publish,
    /// subscribe or unsubscribe themselves; such changes apply to later
    /// publishes, not to the one in progress.
    pub fn publish(&self, topic: &str, payload: &P) -> usize {
        let handlers: Vec<Handler<P>> = self
            .registry
            .borrow()
            .topics
            .get(topic)
            .map(|subscribers| {
                subscribers
                    .values()
                    .map(|subscriber| Rc::clone(&subscriber.handler))
                    .collect()
            })
            .unwrap_or_default();

        if handlers.is_empty() {
            tracing::debug!(topic, "publish with no subscribers; payload dropped");
        }

        for handler in &handlers {
            handler(payload);
        }
        handlers.len()
    }

    /// Registers `handler` for `(topic, id)`, replacing any previous one.
    pub fn subscribe(&self, topic: &str, id: &str, handler: impl Fn(&P) + 'static) -> Registration {
        let mut registry = self.registry.borrow_mut();
        let key = registry.next_key;
        registry.next_key += 1;

        let replaced = registry
            .topics
            .entry(topic.to_string())
            .or_default()
            .insert(
                id.to_string(),
                Subscriber {
                    key,
                    handler: Rc::new(handler),
                },
            )
            .is_some();

        if replaced {
            tracing::debug!(topic, id, "replaced existing subscriber");
        }
        Registration {
            topic: topic.to_string(),
            id: id.to_string(),
            key,
        }
    }

    /// Removes the handler installed by `registration`.
    ///
    /// Returns `false` when that handler is already gone, including when a
    /// later `subscribe` replaced it under the same id; the newer handler is
    /// left in place.
    pub fn cancel(&self, registration: &Registration) -> bool {
        let current = self
            .registry
            .borrow()
            .topics
            .get(&registration.topic)
            .and_then(|subscribers| subscribers.get(&registration.id))
            .map(|subscriber| subscriber.key);
        if current != Some(registration.key) {
            return false;
        }
        self.unsubscribe(&registration.topic, &registration.id)
    }

    /// Removes the handler for `(topic, id)`.
    ///
    /// Returns `false` when none was registered; that is not an error.
    pub fn unsubscribe(&self, topic: &str, id: &str) -> bool {
        let mut registry = self.registry.borrow_mut();
        let Some(subscribers) = registry.topics.get_mut(topic) else {
            return false;
        };
        let removed = subscribers.remove(id).is_some();
        if subscribers.is_empty() {
            registry.topics.remove(topic);
        }
        removed
    }

    /// Number of handlers currently registered on `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.registry
            .borrow()
            .topics
            .get(topic)
            .map_or(0, BTreeMap::len)
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        let mut map = f.debug_map();
        for (topic, subscribers) in &registry.topics {
            map.entry(topic, &subscribers.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}
