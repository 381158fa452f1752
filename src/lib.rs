// SPDX-License-Identifier: MPL-2.0
//! `toasty` is a toast notification widget driven against an in-memory
//! host document.
//!
//! It builds the toast markup, animates it through CSS transition classes,
//! optionally plays a per-kind sound and draws a progress bar, all scheduled
//! on a virtual host clock that tests and embedders can step at will.

#![doc(html_root_url = "https://docs.rs/toasty/0.3.0")]

pub mod config;
pub mod dom;
pub mod error;
pub mod host;
pub mod notifications;
pub mod scheduler;

pub use config::{Options, Settings};
pub use error::{Error, Result};
pub use notifications::{ToastKind, Toasty};
