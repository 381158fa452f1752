// SPDX-License-Identifier: MPL-2.0
//! Class attribute helpers.
//!
//! Hosts exposing a class token list get [`ClassListMode::Native`]: tokens
//! are deduplicated and the attribute is re-serialized on every change.
//! Older hosts get [`ClassListMode::Attribute`], which edits the raw
//! attribute string through a word-boundary regex and leaves the rest of
//! the string untouched.

use super::Element;
use regex::Regex;

/// Strategy used to read and edit the class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassListMode {
    /// Token-list semantics (`classList`).
    #[default]
    Native,
    /// Raw attribute string matching.
    Attribute,
}

fn class_pattern(class: &str) -> Option<Regex> {
    Regex::new(&format!(r"(^|\s+){}(\s+|$)", regex::escape(class))).ok()
}

/// Whether the element carries `class`.
#[must_use]
pub fn contains_class(mode: ClassListMode, element: &Element, class: &str) -> bool {
    match mode {
        ClassListMode::Native => element.class_name().split_whitespace().any(|c| c == class),
        ClassListMode::Attribute => {
            if element.class_name().is_empty() {
                return false;
            }
            class_pattern(class).is_some_and(|re| re.is_match(element.class_name()))
        }
    }
}

/// Adds every name in `classes` that the element does not carry yet.
///
/// Returns `false` without touching the element when `classes` is empty.
pub fn add_class(mode: ClassListMode, element: &mut Element, classes: &[&str]) -> bool {
    if classes.is_empty() {
        return false;
    }
    for class in classes.iter().filter(|c| !c.is_empty()) {
        if contains_class(mode, element, class) {
            continue;
        }
        let updated = match mode {
            ClassListMode::Native => {
                let mut tokens: Vec<&str> = element.class_name().split_whitespace().collect();
                tokens.push(*class);
                tokens.join(" ")
            }
            ClassListMode::Attribute => {
                let current = element.class_name();
                if current.is_empty() {
                    (*class).to_string()
                } else {
                    format!("{current} {class}")
                }
            }
        };
        element.set_class_name(updated);
    }
    true
}

/// Removes every name in `classes`. Missing names are not an error.
///
/// Returns `false` without touching the element when `classes` is empty.
pub fn remove_class(mode: ClassListMode, element: &mut Element, classes: &[&str]) -> bool {
    if classes.is_empty() {
        return false;
    }
    for class in classes.iter().filter(|c| !c.is_empty()) {
        let updated = match mode {
            ClassListMode::Native => element
                .class_name()
                .split_whitespace()
                .filter(|c| c != class)
                .collect::<Vec<_>>()
                .join(" "),
            ClassListMode::Attribute => {
                if !contains_class(mode, element, class) {
                    continue;
                }
                match class_pattern(class) {
                    Some(re) => re.replace(element.class_name(), "$2").into_owned(),
                    None => continue,
                }
            }
        };
        element.set_class_name(updated);
    }
    true
}

/// Flips `class` and returns whether the element carries it afterwards.
pub fn toggle_class(mode: ClassListMode, element: &mut Element, class: &str) -> bool {
    if contains_class(mode, element, class) {
        remove_class(mode, element, &[class]);
        false
    } else {
        add_class(mode, element, &[class]);
        true
    }
}
