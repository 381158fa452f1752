// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! A toast is a short message shown in a per-transition container, animated
//! in and out through CSS classes. [`Toasty`] owns the document, the timer
//! queue and every live toast; the submodules hold the pieces it is built
//! from.
//!
//! # Example
//!
//! ```
//! use toasty::notifications::{ToastKind, Toasty};
//! use toasty::config::Options;
//!
//! let mut toasty = Toasty::new(Options::default());
//! toasty.toast(ToastKind::Success, "Saved", 2000).unwrap();
//! toasty.advance(10_000);
//! assert_eq!(toasty.live_toasts(), 0);
//! ```

mod classmap;
mod kind;
mod lifecycle;
mod manager;
mod toast;

pub use classmap::{
    substitute, AnimateClasses, ClassMap, ToastClasses, TransitionClassMap, CLASS_NAME_TOKEN,
    TRANSITION_TOKEN,
};
pub use kind::ToastKind;
pub use lifecycle::{Signal, ToastPhase};
pub use manager::{auto_close_duration, Job, Reaction, Toasty};
pub use toast::progress_percent;
