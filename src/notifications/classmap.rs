// SPDX-License-Identifier: MPL-2.0
//! Per-transition CSS class names.
//!
//! Every class the widget applies is derived from one template by
//! substituting the class prefix and the transition name. Substitution is
//! deliberately shallow: a template leaf only gets the first token that
//! occurs in it replaced, once.

use super::kind::ToastKind;
use std::collections::HashMap;

pub const CLASS_NAME_TOKEN: &str = "{:class-name}";
pub const TRANSITION_TOKEN: &str = "{:transition}";

/// Class names per toast kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastClasses {
    pub info: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl ToastClasses {
    /// Modifier class of a toast of `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: ToastKind) -> &str {
        match kind {
            ToastKind::Info => &self.info,
            ToastKind::Success => &self.success,
            ToastKind::Warning => &self.warning,
            ToastKind::Error => &self.error,
        }
    }
}

/// Animation classes for the three visual phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimateClasses {
    pub init: String,
    pub show: String,
    pub hide: String,
}

/// Class names used to build and animate the toasts of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionClassMap {
    pub container: String,
    pub main_wrapper: String,
    pub toasts: ToastClasses,
    pub animate: AnimateClasses,
    pub progress_bar: String,
    pub sound_player: String,
}

impl TransitionClassMap {
    /// The placeholder template every entry is derived from.
    #[must_use]
    pub fn template() -> Self {
        Self {
            container: "{:class-name}-container".into(),
            main_wrapper: "{:class-name}-wrapper".into(),
            toasts: ToastClasses {
                info: "{:class-name}--info".into(),
                success: "{:class-name}--success".into(),
                warning: "{:class-name}--warning".into(),
                error: "{:class-name}--error".into(),
            },
            animate: AnimateClasses {
                init: "{:transition}-init".into(),
                show: "{:transition}-show".into(),
                hide: "{:transition}-hide".into(),
            },
            progress_bar: "{:class-name}-progressbar".into(),
            sound_player: "{:class-name}-soundplayer".into(),
        }
    }

    /// Derives the entry for `transition` under the `classname` prefix.
    #[must_use]
    pub fn derive(classname: &str, transition: &str) -> Self {
        let tokens = [(CLASS_NAME_TOKEN, classname), (TRANSITION_TOKEN, transition)];
        Self::template().map_leaves(|leaf| substitute(leaf, &tokens))
    }

    fn map_leaves(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            container: f(&self.container),
            main_wrapper: f(&self.main_wrapper),
            toasts: ToastClasses {
                info: f(&self.toasts.info),
                success: f(&self.toasts.success),
                warning: f(&self.toasts.warning),
                error: f(&self.toasts.error),
            },
            animate: AnimateClasses {
                init: f(&self.animate.init),
                show: f(&self.animate.show),
                hide: f(&self.animate.hide),
            },
            progress_bar: f(&self.progress_bar),
            sound_player: f(&self.sound_player),
        }
    }

    /// Modifier class tying an outer container to its transition.
    #[must_use]
    pub fn container_modifier(&self, transition: &str) -> String {
        format!("{}--{}", self.container, transition)
    }
}

/// Replaces the first occurrence of the first token (in `tokens` order)
/// found in `leaf`. Later tokens are left untouched.
#[must_use]
pub fn substitute(leaf: &str, tokens: &[(&str, &str)]) -> String {
    tokens
        .iter()
        .find(|(token, _)| leaf.contains(token))
        .map_or_else(
            || leaf.to_string(),
            |(token, value)| leaf.replacen(token, value, 1),
        )
}

/// Registry of derived class maps keyed by transition name.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    entries: HashMap<String, TransitionClassMap>,
}

impl ClassMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives and stores the entry for `name`, overwriting any cached one.
    pub fn register(&mut self, name: &str, classname: &str) -> &TransitionClassMap {
        tracing::trace!(transition = name, classname, "registering transition");
        let entry = TransitionClassMap::derive(classname, name);
        self.entries.insert(name.to_string(), entry);
        &self.entries[name]
    }

    /// Re-derives every registered entry under a new prefix.
    pub fn refresh(&mut self, classname: &str) {
        for (name, entry) in &mut self.entries {
            *entry = TransitionClassMap::derive(classname, name);
        }
    }

    /// Cached entry for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TransitionClassMap> {
        self.entries.get(name)
    }

    /// Whether `name` has been registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered transitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
