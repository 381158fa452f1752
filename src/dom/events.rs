// SPDX-License-Identifier: MPL-2.0
//! Listener attach/detach.
//!
//! The document only stores listener handles; what a handle does when its
//! event fires is owned by whoever registered it. A handle is either a plain
//! function or an object exposing a dispatch method. Hosts that refuse one
//! of the two styles get the object handler wrapped in a function instead.

use super::{Document, NodeId};
use crate::error::Result;

/// Opaque handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// How the host is asked to call the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStyle {
    /// A bare callable.
    Function,
    /// An object whose dispatch method receives the event.
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub id: ListenerId,
    pub style: ListenerStyle,
}

impl Listener {
    #[must_use]
    pub fn function(id: ListenerId) -> Self {
        Self {
            id,
            style: ListenerStyle::Function,
        }
    }

    #[must_use]
    pub fn object(id: ListenerId) -> Self {
        Self {
            id,
            style: ListenerStyle::Object,
        }
    }

    /// The same handler wrapped in a function forwarding to its dispatch method.
    #[must_use]
    pub fn wrapped(self) -> Self {
        Self::function(self.id)
    }
}

/// Attaches `listener` to `node` and returns the handle actually registered.
///
/// A rejected object handler is retried wrapped in a function. If that fails
/// too, or the rejected handler was already a function, the first error is
/// returned.
pub fn add_event(
    document: &mut Document,
    node: NodeId,
    event: &str,
    listener: Listener,
) -> Result<Listener> {
    match document.add_event_listener(node, event, listener) {
        Ok(()) => Ok(listener),
        Err(err) if listener.style == ListenerStyle::Object => {
            tracing::trace!(event, "object listener rejected, retrying wrapped");
            let wrapped = listener.wrapped();
            document
                .add_event_listener(node, event, wrapped)
                .map(|()| wrapped)
                .map_err(|_| err)
        }
        Err(err) => Err(err),
    }
}

/// Detaches a listener previously attached with [`add_event`].
pub fn remove_event(
    document: &mut Document,
    node: NodeId,
    event: &str,
    listener: Listener,
) -> Result<()> {
    match document.remove_event_listener(node, event, listener) {
        Ok(()) => Ok(()),
        Err(err) if listener.style == ListenerStyle::Object => document
            .remove_event_listener(node, event, listener.wrapped())
            .map_err(|_| err),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::HostProfile;

    #[test]
    fn object_listener_is_kept_when_supported() {
        let mut doc = Document::default();
        let node = doc.create_element("div");
        let listener = Listener::object(ListenerId::new(1));

        let registered = add_event(&mut doc, node, "click", listener).unwrap();
        assert_eq!(registered, listener);
    }

    #[test]
    fn rejected_object_listener_falls_back_to_function() {
        let mut doc = Document::new(HostProfile::legacy());
        let node = doc.create_element("div");
        let listener = Listener::object(ListenerId::new(2));

        let registered = add_event(&mut doc, node, "click", listener).unwrap();
        assert_eq!(registered.style, ListenerStyle::Function);
        assert_eq!(registered.id, listener.id);
        assert_eq!(doc.listeners(node, "click"), vec![registered]);

        remove_event(&mut doc, node, "click", listener).unwrap();
        assert!(doc.listeners(node, "click").is_empty());
    }

    #[test]
    fn rejected_function_listener_is_reported_unchanged() {
        let profile = HostProfile {
            function_listeners: false,
            object_listeners: false,
            ..HostProfile::default()
        };
        let mut doc = Document::new(profile);
        let node = doc.create_element("div");

        let result = add_event(&mut doc, node, "ended", Listener::function(ListenerId::new(3)));
        assert_eq!(
            result,
            Err(Error::ListenerRejected {
                event: "ended".into()
            })
        );
    }

    #[test]
    fn failed_fallback_returns_first_error() {
        let profile = HostProfile {
            function_listeners: false,
            object_listeners: false,
            ..HostProfile::default()
        };
        let mut doc = Document::new(profile);
        let node = doc.create_element("div");

        let result = add_event(&mut doc, node, "click", Listener::object(ListenerId::new(4)));
        assert!(matches!(result, Err(Error::ListenerRejected { .. })));
        assert!(doc.listeners(node, "click").is_empty());
    }
}
