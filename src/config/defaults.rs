// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Naming**: CSS class prefix and transition names
//! - **Timing**: Display duration, scheduling offset, fallbacks
//! - **Sounds**: Asset paths played per toast kind

// ==========================================================================
// Naming Defaults
// ==========================================================================

/// Main class name used to style each toast.
///
/// Changing it means the stylesheet has been replaced; the bundled CSS
/// transitions only target this prefix.
pub const DEFAULT_CLASSNAME: &str = "toast";

/// Transition used to show and hide toasts unless configured otherwise.
pub const DEFAULT_TRANSITION: &str = "fade";

/// Transitions registered on every new manager.
pub const BUILTIN_TRANSITIONS: [&str; 11] = [
    "fade",
    "slideLeftFade",
    "slideLeftRightFade",
    "slideRightFade",
    "slideRightLeftFade",
    "slideUpFade",
    "slideUpDownFade",
    "slideDownFade",
    "slideDownUpFade",
    "pinItUp",
    "pinItDown",
];

/// Marker class carried by toasts waiting for a click to close.
pub const CLOSE_ON_CLICK_CLASS: &str = "close-on-click";

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default display duration in milliseconds. Zero means "derive from the
/// message length".
pub const DEFAULT_DURATION_MS: u64 = 4000;

/// Base scheduling offset in milliseconds.
///
/// The show class lands one offset after insertion, the hide sequence and
/// the progress bar start ten offsets later.
pub const TIME_OFFSET_MS: u64 = 100;

/// Interval between two progress bar updates.
pub const PROGRESS_TICK_MS: u64 = 10;

/// How long a transition phase waits for its completion event before
/// completing on its own.
pub const DEFAULT_TRANSITION_TIMEOUT_MS: u64 = 1000;

// ==========================================================================
// Sound Defaults
// ==========================================================================

pub const DEFAULT_INFO_SOUND: &str = "./dist/sounds/info/1.mp3";
pub const DEFAULT_SUCCESS_SOUND: &str = "./dist/sounds/success/1.mp3";
pub const DEFAULT_WARNING_SOUND: &str = "./dist/sounds/warning/1.mp3";
pub const DEFAULT_ERROR_SOUND: &str = "./dist/sounds/error/1.mp3";
