// SPDX-License-Identifier: MPL-2.0
//! DOM construction for toasts.
//!
//! Toasts live in a two level structure: an outer container per transition,
//! inserted into the body, holding a wrapper that holds the toasts. The
//! helpers here build and tear down that structure; timing is the manager's
//! business.

use super::classmap::TransitionClassMap;
use super::kind::ToastKind;
use crate::dom::class_list::{add_class, ClassListMode};
use crate::dom::events::Listener;
use crate::dom::{Document, NodeId};
use crate::error::Result;

fn element_with_classes(
    document: &mut Document,
    mode: ClassListMode,
    tag: &str,
    classes: &[&str],
) -> NodeId {
    let node = document.create_element(tag);
    if let Some(element) = document.element_mut(node) {
        add_class(mode, element, classes);
    }
    node
}

/// Returns the wrapper of the outer container for `transition`, creating
/// and inserting the container when the document has none.
///
/// A new container goes into the body before `prepend_to`, or before the
/// body's first child when no reference is configured.
pub fn ensure_container(
    document: &mut Document,
    mode: ClassListMode,
    classes: &TransitionClassMap,
    transition: &str,
    prepend_to: Option<NodeId>,
) -> Result<NodeId> {
    let modifier = classes.container_modifier(transition);
    let wrapper_selector = format!(".{}", classes.main_wrapper);

    if let Some(outer) = document.query_selector(&format!(".{modifier}")) {
        if let Some(wrapper) = document.query_selector_in(outer, &wrapper_selector) {
            return Ok(wrapper);
        }
        tracing::debug!(transition, "container lost its wrapper, recreating it");
        let wrapper = element_with_classes(document, mode, "div", &[classes.main_wrapper.as_str()]);
        document.append_child(outer, wrapper)?;
        return Ok(wrapper);
    }

    let outer = element_with_classes(document, mode, "div", &[classes.container.as_str(), modifier.as_str()]);
    let wrapper = element_with_classes(document, mode, "div", &[classes.main_wrapper.as_str()]);
    document.append_child(outer, wrapper)?;

    let body = document.body();
    let reference = prepend_to.or_else(|| document.first_child(body));
    if let Err(err) = document.insert_before(body, outer, reference) {
        document.release(outer);
        return Err(err);
    }
    tracing::debug!(transition, "toast container created");
    Ok(wrapper)
}

/// Builds a detached toast element carrying `message` as raw markup.
pub fn build_toast(
    document: &mut Document,
    mode: ClassListMode,
    classname: &str,
    classes: &TransitionClassMap,
    kind: ToastKind,
    message: &str,
) -> NodeId {
    let node = element_with_classes(
        document,
        mode,
        "div",
        &[classname, classes.toasts.for_kind(kind), classes.animate.init.as_str()],
    );
    if let Some(element) = document.element_mut(node) {
        element.set_inner_html(message);
    }
    node
}

/// Builds a detached, autoplaying audio element for `sound`.
pub fn build_sound_player(
    document: &mut Document,
    mode: ClassListMode,
    classes: &TransitionClassMap,
    sound: &str,
) -> NodeId {
    let node = element_with_classes(document, mode, "audio", &[classes.sound_player.as_str()]);
    if let Some(element) = document.element_mut(node) {
        element.set_attribute("autoplay", "autoplay");
        element.set_inner_html(format!(
            "<source src=\"{sound}\" type=\"audio/mpeg\"/>\
             <embed hidden=\"true\" autoplay=\"false\" loop=\"false\" src=\"{sound}\" />"
        ));
    }
    node
}

/// Builds a detached progress bar for a toast of `kind`, carrying the
/// `base` class and its per-kind modifier.
pub fn build_progress_bar(
    document: &mut Document,
    mode: ClassListMode,
    base: &str,
    kind: ToastKind,
) -> NodeId {
    let modifier = format!("{base}--{kind}");
    element_with_classes(document, mode, "div", &[base, modifier.as_str()])
}

/// Removes and frees a toast. When its wrapper is left empty, the outer
/// container goes too, along with any sound player still inside it.
///
/// Returns the listeners that were still registered on the freed nodes.
pub fn remove_toast(document: &mut Document, toast: NodeId) -> Vec<Listener> {
    let Some(wrapper) = document.parent(toast) else {
        return Vec::new();
    };
    let mut dropped = document.release(toast);
    if document.child_count(wrapper) == 0 {
        if let Some(outer) = document.parent(wrapper) {
            dropped.extend(document.release(outer));
        }
    }
    dropped
}

/// Removes and frees a finished sound player, and its container when left
/// empty. Returns the listeners still registered on the freed nodes.
pub fn remove_sound_player(document: &mut Document, player: NodeId) -> Vec<Listener> {
    let parent = document.parent(player);
    let mut dropped = document.release(player);
    if let Some(parent) = parent {
        if document.child_count(parent) == 0 {
            dropped.extend(document.release(parent));
        }
    }
    dropped
}

/// Progress bar fill, in percent, after `elapsed` of `duration` milliseconds.
///
/// Rounds half up. A zero duration is complete immediately.
#[must_use]
pub fn progress_percent(elapsed: u64, duration: u64) -> u64 {
    if duration == 0 {
        return 100;
    }
    let (elapsed, duration) = (u128::from(elapsed), u128::from(duration));
    let percent = (elapsed * 200 + duration) / (duration * 2);
    u64::try_from(percent).unwrap_or(u64::MAX)
}
