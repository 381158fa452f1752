// SPDX-License-Identifier: MPL-2.0
//! Per-toast lifecycle state machine.
//!
//! ```text
//! Init --Reveal--> Showing --ShowEnded--> Shown
//!   \                 |                     |
//!    \------------- Dismiss ----------------/
//!                     v
//!                  Hiding --HideEnded--> Removed
//! ```
//!
//! `ShowEnded` and `HideEnded` come either from the host's transition
//! completion event or from the fallback timeout, whichever fires first.
//! The loser of that race arrives in a phase that no longer accepts it and
//! is dropped.

use super::classmap::AnimateClasses;
use super::kind::ToastKind;
use crate::config::ToastCallback;
use crate::dom::events::Listener;
use crate::scheduler::TimerId;
use std::fmt;

/// Visual phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted with the init class, waiting for the show delay.
    Init,
    /// Show class applied, transition running.
    Showing,
    /// Fully visible.
    Shown,
    /// Hide class applied, transition running.
    Hiding,
    /// Gone from the document.
    Removed,
}

/// Input driving a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Reveal,
    ShowEnded,
    Dismiss,
    HideEnded,
}

impl ToastPhase {
    /// Phase reached by applying `signal`, or `None` when this phase does
    /// not accept it.
    #[must_use]
    pub fn on(self, signal: Signal) -> Option<ToastPhase> {
        match (self, signal) {
            (ToastPhase::Init, Signal::Reveal) => Some(ToastPhase::Showing),
            (ToastPhase::Showing, Signal::ShowEnded) => Some(ToastPhase::Shown),
            (ToastPhase::Init | ToastPhase::Showing | ToastPhase::Shown, Signal::Dismiss) => {
                Some(ToastPhase::Hiding)
            }
            (ToastPhase::Hiding, Signal::HideEnded) => Some(ToastPhase::Removed),
            _ => None,
        }
    }
}

/// Everything a scheduled step needs to know about its toast.
pub(crate) struct Lifecycle {
    pub phase: ToastPhase,
    pub kind: ToastKind,
    pub animate: AnimateClasses,
    /// Base class of the progress bar, fixed at emission time.
    pub progress_bar: String,
    pub on_show: Option<ToastCallback>,
    pub on_hide: Option<ToastCallback>,
    pub transition_timeout: u64,
    /// Transition completion listeners of the running phase.
    pub pending: Vec<(&'static str, Listener)>,
    /// Fallback timeout of the running phase.
    pub fallback: Option<TimerId>,
    /// Click listener while the toast waits to be closed by hand.
    pub click: Option<Listener>,
}

impl Lifecycle {
    pub fn new(
        kind: ToastKind,
        animate: AnimateClasses,
        progress_bar: String,
        on_show: Option<ToastCallback>,
        on_hide: Option<ToastCallback>,
        transition_timeout: u64,
    ) -> Self {
        Self {
            phase: ToastPhase::Init,
            kind,
            animate,
            progress_bar,
            on_show,
            on_hide,
            transition_timeout,
            pending: Vec::new(),
            fallback: None,
            click: None,
        }
    }

    /// Applies `signal`, returning whether the phase changed.
    pub fn apply(&mut self, signal: Signal) -> bool {
        match self.phase.on(signal) {
            Some(next) => {
                tracing::trace!(kind = %self.kind, from = ?self.phase, to = ?next, "toast phase change");
                self.phase = next;
                true
            }
            None => {
                tracing::trace!(kind = %self.kind, phase = ?self.phase, ?signal, "signal ignored");
                false
            }
        }
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("phase", &self.phase)
            .field("kind", &self.kind)
            .field("pending", &self.pending)
            .field("fallback", &self.fallback)
            .field("click", &self.click)
            .finish_non_exhaustive()
    }
}
