// SPDX-License-Identifier: MPL-2.0
//! Markup serialization of the document tree.

use super::{Document, NodeId};
use std::fmt::Write;

impl Document {
    /// Serializes `id` and its subtree. Inner HTML is emitted verbatim
    /// before the element children.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(&mut out, id);
        out
    }

    /// Serialized children of the body.
    #[must_use]
    pub fn body_html(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.body()) {
            self.write_node(&mut out, child);
        }
        out
    }

    fn write_node(&self, out: &mut String, id: NodeId) {
        let Some(element) = self.element(id) else {
            return;
        };
        let _ = write!(out, "<{}", element.tag());
        if !element.class_name().is_empty() {
            let _ = write!(out, " class=\"{}\"", element.class_name());
        }
        for (name, value) in element.attributes() {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        if let Some(width) = element.width() {
            let _ = write!(out, " style=\"width: {width}\"");
        }
        out.push('>');
        out.push_str(element.inner_html());
        for &child in element.children() {
            self.write_node(out, child);
        }
        let _ = write!(out, "</{}>", element.tag());
    }
}
