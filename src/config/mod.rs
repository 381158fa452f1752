// SPDX-License-Identifier: MPL-2.0
//! Toast manager configuration.
//!
//! [`Settings`] is the fully resolved record a manager works with, while
//! [`Options`] is the partial record supplied by callers. Options are merged
//! field by field over the current settings, and the nested sound table is
//! merged key by key, so a caller overriding one sound keeps the others.
//!
//! Options can also be persisted as TOML:
//!
//! ```no_run
//! use toasty::config::{self, Options};
//! use std::path::Path;
//!
//! let options = Options {
//!     transition: Some("slideUpFade".to_string()),
//!     ..Options::default()
//! };
//! config::save_to_path(&options, Path::new("toasty.toml")).expect("Failed to save options");
//! let loaded = config::load_from_path(Path::new("toasty.toml")).expect("Failed to load options");
//! assert_eq!(loaded.transition.as_deref(), Some("slideUpFade"));
//! ```

mod defaults;

pub use defaults::*;

use crate::dom::NodeId;
use crate::error::Result;
use crate::notifications::ToastKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Callback fired with the kind of the toast that appeared or disappeared.
pub type ToastCallback = Rc<dyn Fn(ToastKind)>;

/// Sound asset path for each toast kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sounds {
    pub info: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Sounds {
    /// Returns the asset path played for `kind`.
    #[must_use]
    pub fn for_kind(&self, kind: ToastKind) -> &str {
        match kind {
            ToastKind::Info => &self.info,
            ToastKind::Success => &self.success,
            ToastKind::Warning => &self.warning,
            ToastKind::Error => &self.error,
        }
    }

    fn merge(&mut self, options: SoundOptions) {
        if let Some(info) = options.info {
            self.info = info;
        }
        if let Some(success) = options.success {
            self.success = success;
        }
        if let Some(warning) = options.warning {
            self.warning = warning;
        }
        if let Some(error) = options.error {
            self.error = error;
        }
    }
}

impl Default for Sounds {
    fn default() -> Self {
        Self {
            info: DEFAULT_INFO_SOUND.to_string(),
            success: DEFAULT_SUCCESS_SOUND.to_string(),
            warning: DEFAULT_WARNING_SOUND.to_string(),
            error: DEFAULT_ERROR_SOUND.to_string(),
        }
    }
}

/// Partial sound table; absent keys keep their current path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Caller supplied overrides. Every field is optional.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_before: Option<bool>,
    /// Display duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_sounds: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_close: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_bar: Option<bool>,
    /// Fallback delay, in milliseconds, for transitions that never report
    /// completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sounds: Option<SoundOptions>,
    #[serde(skip)]
    pub on_show: Option<ToastCallback>,
    #[serde(skip)]
    pub on_hide: Option<ToastCallback>,
    #[serde(skip)]
    pub prepend_to: Option<NodeId>,
}

impl Options {
    /// Sets the callback fired once a toast is fully shown.
    #[must_use]
    pub fn on_show(mut self, callback: impl Fn(ToastKind) + 'static) -> Self {
        self.on_show = Some(Rc::new(callback));
        self
    }

    /// Sets the callback fired once a toast has left the document.
    #[must_use]
    pub fn on_hide(mut self, callback: impl Fn(ToastKind) + 'static) -> Self {
        self.on_hide = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("classname", &self.classname)
            .field("transition", &self.transition)
            .field("insert_before", &self.insert_before)
            .field("duration", &self.duration)
            .field("enable_sounds", &self.enable_sounds)
            .field("auto_close", &self.auto_close)
            .field("progress_bar", &self.progress_bar)
            .field("sounds", &self.sounds)
            .field("transition_timeout", &self.transition_timeout)
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("prepend_to", &self.prepend_to)
            .finish()
    }
}

/// Resolved manager settings.
#[derive(Clone)]
pub struct Settings {
    pub classname: String,
    pub transition: String,
    /// Insert new toasts before the existing ones instead of after them.
    pub insert_before: bool,
    /// Display duration in milliseconds; zero derives it from the message.
    pub duration: u64,
    pub enable_sounds: bool,
    /// Hide toasts on a timer. When off, a click closes them.
    pub auto_close: bool,
    /// Only honoured together with `auto_close`.
    pub progress_bar: bool,
    pub sounds: Sounds,
    pub transition_timeout: u64,
    pub on_show: Option<ToastCallback>,
    pub on_hide: Option<ToastCallback>,
    /// Body child the outer container is inserted before. `None` means the
    /// body's first child at insertion time.
    pub prepend_to: Option<NodeId>,
}

impl Settings {
    /// Builds settings from the defaults with `options` applied on top.
    #[must_use]
    pub fn from_options(options: Options) -> Self {
        let mut settings = Self::default();
        settings.merge(options);
        settings
    }

    /// Applies every field present in `options`, keeping the rest.
    pub fn merge(&mut self, options: Options) {
        if let Some(classname) = options.classname {
            self.classname = classname;
        }
        if let Some(transition) = options.transition {
            self.transition = transition;
        }
        if let Some(insert_before) = options.insert_before {
            self.insert_before = insert_before;
        }
        if let Some(duration) = options.duration {
            self.duration = duration;
        }
        if let Some(enable_sounds) = options.enable_sounds {
            self.enable_sounds = enable_sounds;
        }
        if let Some(auto_close) = options.auto_close {
            self.auto_close = auto_close;
        }
        if let Some(progress_bar) = options.progress_bar {
            self.progress_bar = progress_bar;
        }
        if let Some(sounds) = options.sounds {
            self.sounds.merge(sounds);
        }
        if let Some(timeout) = options.transition_timeout {
            self.transition_timeout = timeout;
        }
        if options.on_show.is_some() {
            self.on_show = options.on_show;
        }
        if options.on_hide.is_some() {
            self.on_hide = options.on_hide;
        }
        if options.prepend_to.is_some() {
            self.prepend_to = options.prepend_to;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classname: DEFAULT_CLASSNAME.to_string(),
            transition: DEFAULT_TRANSITION.to_string(),
            insert_before: true,
            duration: DEFAULT_DURATION_MS,
            enable_sounds: false,
            auto_close: true,
            progress_bar: false,
            sounds: Sounds::default(),
            transition_timeout: DEFAULT_TRANSITION_TIMEOUT_MS,
            on_show: None,
            on_hide: None,
            prepend_to: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("classname", &self.classname)
            .field("transition", &self.transition)
            .field("insert_before", &self.insert_before)
            .field("duration", &self.duration)
            .field("enable_sounds", &self.enable_sounds)
            .field("auto_close", &self.auto_close)
            .field("progress_bar", &self.progress_bar)
            .field("sounds", &self.sounds)
            .field("transition_timeout", &self.transition_timeout)
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .field("prepend_to", &self.prepend_to)
            .finish()
    }
}

/// Reads options from a TOML file. Unparseable content yields empty options.
pub fn load_from_path(path: &Path) -> Result<Options> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(options) => Ok(options),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring invalid toast options");
            Ok(Options::default())
        }
    }
}

pub fn save_to_path(options: &Options, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}
