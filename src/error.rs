// SPDX-License-Identifier: MPL-2.0
//! Error type shared by the document model, the event layer and the manager.
//!
//! Most failure modes of the widget are silent no-ops by construction
//! (removing a detached node, querying a missing container). The variants
//! below are the few conditions a host would report as an exception.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The host refused to register a listener for this event.
    #[error("Listener rejected for event '{event}'")]
    ListenerRejected { event: String },

    /// The reference node passed to an insertion is not a child of the parent.
    #[error("Reference node is not a child of the target parent")]
    NotAChild,

    /// A node id that was never allocated by this document.
    #[error("Unknown node id {0}")]
    UnknownNode(usize),

    /// A toast type name outside info/success/warning/error.
    #[error("Unknown toast kind '{0}'. Expected: info, success, warning, error")]
    UnknownKind(String),

    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_listener_rejection() {
        let err = Error::ListenerRejected {
            event: "click".to_string(),
        };
        assert_eq!(format!("{}", err), "Listener rejected for event 'click'");
    }

    #[test]
    fn display_formats_unknown_kind() {
        let err = Error::UnknownKind("fatal".into());
        assert!(format!("{}", err).contains("'fatal'"));
    }

    #[test]
    fn from_io_error_maps_to_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        match err {
            Error::Io(message) => assert!(message.contains("missing")),
            other => panic!("expected Io variant, got {other:?}"),
        }
    }

    #[test]
    fn from_toml_error_maps_to_config_variant() {
        let toml_err = toml::from_str::<toml::Value>("not = valid = toml").unwrap_err();
        let err: Error = toml_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
