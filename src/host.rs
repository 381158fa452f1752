// SPDX-License-Identifier: MPL-2.0
//! Host capabilities.
//!
//! A [`HostProfile`] describes what the simulated host exposes. The manager
//! probes it once at construction through [`Capabilities::detect`] and keeps
//! the result, so no toast re-probes the host.

use crate::dom::class_list::ClassListMode;
use crate::dom::Document;

/// Style properties probed, in order, with the completion event each implies.
const TRANSITION_PROBES: [(&str, &str); 4] = [
    ("WebkitTransition", "webkitTransitionEnd"),
    ("MozTransition", "transitionend"),
    ("OTransition", "oTransitionEnd otransitionend"),
    ("transition", "transitionend"),
];

/// What the host supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// Elements expose a class token list.
    pub class_list: bool,
    /// Property names present on an element's style object.
    pub style_properties: Vec<String>,
    /// Plain callables are accepted as listeners.
    pub function_listeners: bool,
    /// Objects with a dispatch method are accepted as listeners.
    pub object_listeners: bool,
}

impl HostProfile {
    /// A current browser: token lists, unprefixed transitions, both listener styles.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            class_list: true,
            style_properties: vec!["transition".to_string()],
            function_listeners: true,
            object_listeners: true,
        }
    }

    /// A WebKit host exposing only the prefixed transition property.
    #[must_use]
    pub fn webkit() -> Self {
        Self {
            style_properties: vec!["WebkitTransition".to_string()],
            ..Self::modern()
        }
    }

    /// A host without token lists, transitions or object listeners.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            class_list: false,
            style_properties: Vec::new(),
            function_listeners: true,
            object_listeners: false,
        }
    }
}

impl Default for HostProfile {
    fn default() -> Self {
        Self::modern()
    }
}

/// Read access to a scratch element's style surface.
pub trait StyleSurface {
    fn has_property(&self, name: &str) -> bool;
}

impl StyleSurface for HostProfile {
    fn has_property(&self, name: &str) -> bool {
        self.style_properties.iter().any(|p| p == name)
    }
}

/// Name of the event fired when a CSS transition completes.
///
/// Some hosts fire several spellings, so the name may hold more than one
/// whitespace separated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent(&'static str);

impl TransitionEvent {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.0
    }

    /// Every event name a listener must be attached to.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.0.split_whitespace()
    }
}

/// Returns the transition completion event the style surface supports.
#[must_use]
pub fn which_transition_event(style: &impl StyleSurface) -> Option<TransitionEvent> {
    TRANSITION_PROBES
        .iter()
        .find(|(property, _)| style.has_property(property))
        .map(|&(_, event)| TransitionEvent(event))
}

/// Capabilities resolved once per manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub class_list: ClassListMode,
    /// `None` when the host has no transition events; every transition
    /// step then completes synchronously.
    pub transition_end: Option<TransitionEvent>,
}

impl Capabilities {
    #[must_use]
    pub fn detect(document: &Document) -> Self {
        let profile = document.profile();
        let class_list = if profile.class_list {
            ClassListMode::Native
        } else {
            ClassListMode::Attribute
        };
        let capabilities = Self {
            class_list,
            transition_end: which_transition_event(profile),
        };
        tracing::debug!(?capabilities, "host capabilities detected");
        capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(properties: &[&str]) -> HostProfile {
        HostProfile {
            style_properties: properties.iter().map(|p| (*p).to_string()).collect(),
            ..HostProfile::modern()
        }
    }

    #[test]
    fn probes_follow_vendor_order() {
        let all = surface(&["transition", "OTransition", "WebkitTransition"]);
        assert_eq!(
            which_transition_event(&all).map(TransitionEvent::as_str),
            Some("webkitTransitionEnd")
        );
    }

    #[test]
    fn each_property_maps_to_its_event() {
        let cases = [
            ("WebkitTransition", "webkitTransitionEnd"),
            ("MozTransition", "transitionend"),
            ("OTransition", "oTransitionEnd otransitionend"),
            ("transition", "transitionend"),
        ];
        for (property, event) in cases {
            assert_eq!(
                which_transition_event(&surface(&[property])).map(TransitionEvent::as_str),
                Some(event),
                "{property}"
            );
        }
    }

    #[test]
    fn no_transition_support_yields_none() {
        assert_eq!(which_transition_event(&surface(&["color"])), None);
    }

    #[test]
    fn opera_event_splits_into_two_names() {
        let event = which_transition_event(&surface(&["OTransition"])).unwrap();
        assert_eq!(
            event.names().collect::<Vec<_>>(),
            vec!["oTransitionEnd", "otransitionend"]
        );
    }

    #[test]
    fn detect_reads_the_document_profile() {
        let modern = Capabilities::detect(&Document::new(HostProfile::modern()));
        assert_eq!(modern.class_list, ClassListMode::Native);
        assert_eq!(
            modern.transition_end.map(TransitionEvent::as_str),
            Some("transitionend")
        );

        let legacy = Capabilities::detect(&Document::new(HostProfile::legacy()));
        assert_eq!(legacy.class_list, ClassListMode::Attribute);
        assert!(legacy.transition_end.is_none());
    }
}
