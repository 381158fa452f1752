// SPDX-License-Identifier: MPL-2.0
//! Toast kinds.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Kind of a toast; selects its CSS modifier class and its sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Informational message.
    #[default]
    Info,
    /// Operation completed successfully.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
    /// Operation failed.
    Error,
}

impl ToastKind {
    pub const ALL: [ToastKind; 4] = [
        ToastKind::Info,
        ToastKind::Success,
        ToastKind::Warning,
        ToastKind::Error,
    ];

    /// Lower-case name used in class names and callbacks.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Error => "error",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToastKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back_to_the_same_kind() {
        for kind in ToastKind::ALL {
            assert_eq!(kind.as_str().parse::<ToastKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "Info".parse::<ToastKind>(),
            Err(Error::UnknownKind("Info".to_string()))
        );
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ToastKind::Warning.to_string(), "warning");
    }
}
