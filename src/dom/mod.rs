// SPDX-License-Identifier: MPL-2.0
//! In-memory host document.
//!
//! The toast manager never talks to a real browser. It drives this small
//! element tree instead, which models the parts of a document the widget
//! relies on: element creation, the raw class attribute, plain attributes,
//! inner HTML, the inline `width` style, tree insertion and removal, class
//! selector queries and event listener registration.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removing a node
//! only detaches it; operations on detached nodes keep working on the
//! detached subtree and never touch the live tree. [`Document::release`]
//! frees a subtree for good and hands its slots back to the arena.
//!
//! # Components
//!
//! - [`class_list`] - class helpers with a token-list and a regex strategy
//! - [`events`] - listener attach/detach with the object-handler fallback
//! - [`html`] - markup serialization for snapshots and the demo binary

pub mod class_list;
pub mod events;
pub mod html;

use crate::error::{Error, Result};
use crate::host::HostProfile;
use events::{Listener, ListenerStyle};

/// Handle to an element allocated by a [`Document`].
///
/// Arena slots are recycled; the generation tells a stale handle apart from
/// the element now living in its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// A registered listener as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Registration {
    event: String,
    listener: Listener,
}

/// A single element of the document tree.
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    class_name: String,
    attributes: Vec<(String, String)>,
    inner_html: String,
    width: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Registration>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw value of the `class` attribute.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn set_class_name(&mut self, value: impl Into<String>) {
        self.class_name = value.into();
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Markup assigned through `innerHTML`. It is stored verbatim.
    #[must_use]
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    pub fn set_inner_html(&mut self, html: impl Into<String>) {
        self.inner_html = html.into();
    }

    /// Inline `style.width`, if any.
    #[must_use]
    pub fn width(&self) -> Option<&str> {
        self.width.as_deref()
    }

    pub fn set_width(&mut self, width: impl Into<String>) {
        self.width = Some(width.into());
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The host document: an `html` root holding a `body`.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    body: NodeId,
    profile: HostProfile,
}

impl Document {
    /// Creates an empty document for a host with the given capabilities.
    #[must_use]
    pub fn new(profile: HostProfile) -> Self {
        let root = NodeId {
            index: 0,
            generation: 0,
        };
        let body = NodeId {
            index: 1,
            generation: 0,
        };
        let mut html = Element::new("html");
        html.children.push(body);
        let mut body_element = Element::new("body");
        body_element.parent = Some(root);
        let slots = [html, body_element]
            .into_iter()
            .map(|element| Slot {
                generation: 0,
                element: Some(element),
            })
            .collect();
        Self {
            slots,
            free: Vec::new(),
            root,
            body,
            profile,
        }
    }

    #[must_use]
    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Allocates a detached element. An empty name creates a `div`.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let tag = if tag.is_empty() { "div" } else { tag };
        let element = Some(Element::new(tag));
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.element = element;
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    element,
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Frees `id` and its whole subtree, detaching it first. Returns the
    /// listeners still registered on the freed nodes.
    ///
    /// The root and the body are never released. Handles to freed nodes
    /// resolve to nothing afterwards, even once their slot is reused.
    pub fn release(&mut self, id: NodeId) -> Vec<Listener> {
        if id == self.root || id == self.body || self.element(id).is_none() {
            return Vec::new();
        }
        self.detach(id);

        let mut dropped = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(node.index)
                .filter(|slot| slot.generation == node.generation)
            else {
                continue;
            };
            let Some(element) = slot.element.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
            stack.extend(element.children);
            dropped.extend(element.listeners.into_iter().map(|r| r.listener));
        }
        dropped
    }

    /// Number of elements currently allocated, root and body included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    fn checked(&self, id: NodeId) -> Result<&Element> {
        self.element(id).ok_or(Error::UnknownNode(id.index))
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.element(id).and_then(Element::parent)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map_or(&[], Element::children)
    }

    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Whether the node is attached to the document root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Appends `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` into `parent` before `reference`, or last when the
    /// reference is `None`. The reference must be a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<()> {
        self.checked(parent)?;
        self.checked(child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(Error::NotAChild);
            }
        }
        if reference == Some(child) {
            return Ok(());
        }

        self.detach(child);
        if let Some(element) = self.element_mut(parent) {
            let siblings = &mut element.children;
            let position = reference
                .and_then(|r| siblings.iter().position(|&c| c == r))
                .unwrap_or(siblings.len());
            siblings.insert(position, child);
        }
        if let Some(element) = self.element_mut(child) {
            element.parent = Some(parent);
        }
        Ok(())
    }

    /// Detaches the node from its parent. Detached nodes are left alone.
    pub fn remove(&mut self, id: NodeId) {
        if self.element(id).is_some() {
            self.detach(id);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.element_mut(id).and_then(|e| e.parent.take());
        if let Some(element) = parent.and_then(|p| self.element_mut(p)) {
            element.children.retain(|&c| c != id);
        }
    }

    /// First descendant of `scope` (document order) matching `selector`.
    ///
    /// Only the two selector shapes the widget needs are understood: a
    /// single class (`.name`) and a tag name.
    #[must_use]
    pub fn query_selector_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.matches(node, selector) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        None
    }

    /// Document-wide [`Document::query_selector_in`].
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_in(self.root, selector)
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        match selector.strip_prefix('.') {
            Some(class) => element.class_name.split_whitespace().any(|c| c == class),
            None => element.tag == selector,
        }
    }

    /// Registers a listener, refusing the styles the host cannot call.
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<()> {
        self.accept_style(event, listener.style)?;
        let element = self.element_mut(id).ok_or(Error::UnknownNode(id.index))?;
        let registration = Registration {
            event: event.to_string(),
            listener,
        };
        if !element.listeners.contains(&registration) {
            element.listeners.push(registration);
        }
        Ok(())
    }

    /// Unregisters a listener. Unknown listeners are ignored.
    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<()> {
        self.accept_style(event, listener.style)?;
        if let Some(element) = self.element_mut(id) {
            element
                .listeners
                .retain(|r| !(r.event == event && r.listener.id == listener.id));
        }
        Ok(())
    }

    fn accept_style(&self, event: &str, style: ListenerStyle) -> Result<()> {
        let supported = match style {
            ListenerStyle::Function => self.profile.function_listeners,
            ListenerStyle::Object => self.profile.object_listeners,
        };
        if supported {
            Ok(())
        } else {
            Err(Error::ListenerRejected {
                event: event.to_string(),
            })
        }
    }

    /// Listeners registered on `id` for `event`, in registration order.
    #[must_use]
    pub fn listeners(&self, id: NodeId, event: &str) -> Vec<Listener> {
        self.element(id)
            .map(|element| {
                element
                    .listeners
                    .iter()
                    .filter(|r| r.event == event)
                    .map(|r| r.listener)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the node carries `class`, regardless of the class strategy.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|e| e.class_name.split_whitespace().any(|c| c == class))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(HostProfile::default())
    }
}
