// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! [`Toasty`] resolves settings, builds the toast structure in the document
//! and schedules every later step (show, hide, progress bar) on the host
//! timer queue. Scheduled steps are plain [`Job`] values and listeners map
//! to [`Reaction`] values, so the whole show/hide sequence can be stepped
//! and inspected without a real host.
//!
//! The manager does not expose a way to cancel a toast once emitted.

use super::classmap::{ClassMap, TransitionClassMap};
use super::kind::ToastKind;
use super::lifecycle::{Lifecycle, Signal, ToastPhase};
use super::toast;
use crate::config::{
    Options, Settings, BUILTIN_TRANSITIONS, CLOSE_ON_CLICK_CLASS, PROGRESS_TICK_MS, TIME_OFFSET_MS,
};
use crate::dom::class_list::{add_class, remove_class};
use crate::dom::events::{add_event, remove_event, Listener, ListenerId};
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::host::{Capabilities, HostProfile};
use crate::scheduler::{Scheduler, TimerId};
use std::collections::HashMap;
use std::time::Duration;

/// Delay between emission and the show class.
const SHOW_DELAY_MS: u64 = TIME_OFFSET_MS;

/// Base delay before a toast starts hiding and its progress bar appears.
const HIDE_DELAY_MS: u64 = TIME_OFFSET_MS * 10;

/// A scheduled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Apply the show class.
    Reveal(NodeId),
    /// Start hiding.
    Dismiss(NodeId),
    /// The show transition never reported completion.
    ShowFallback(NodeId),
    /// The hide transition never reported completion.
    HideFallback(NodeId),
    /// Attach the progress bar.
    StartProgress {
        toast: NodeId,
        kind: ToastKind,
        duration: u64,
    },
    /// Grow the progress bar.
    ProgressTick {
        bar: NodeId,
        started_at: u64,
        duration: u64,
    },
}

/// What a listener does when its event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    ShowEnded(NodeId),
    HideEnded(NodeId),
    CloseClicked(NodeId),
    SoundEnded(NodeId),
}

/// Effective display duration for a message.
///
/// A zero `duration` falls back to the configured one; if that is zero as
/// well, the duration grows with the message length (half the time offset
/// per character).
#[must_use]
pub fn auto_close_duration(message: &str, duration: u64, settings: &Settings) -> u64 {
    let duration = if duration == 0 {
        settings.duration
    } else {
        duration
    };
    if duration == 0 {
        message.chars().count() as u64 * (TIME_OFFSET_MS / 2)
    } else {
        duration
    }
}

/// The toast manager.
pub struct Toasty {
    settings: Settings,
    classmap: ClassMap,
    capabilities: Capabilities,
    document: Document,
    scheduler: Scheduler<Job>,
    toasts: HashMap<NodeId, Lifecycle>,
    reactions: HashMap<ListenerId, Reaction>,
    next_listener: u64,
}

impl Toasty {
    /// Creates a manager driving an empty document on a modern host.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self::with_document(options, Document::default())
    }

    /// Creates a manager driving an empty document on the given host.
    #[must_use]
    pub fn with_host(options: Options, profile: HostProfile) -> Self {
        Self::with_document(options, Document::new(profile))
    }

    /// Creates a manager driving an existing document.
    #[must_use]
    pub fn with_document(options: Options, document: Document) -> Self {
        let settings = Settings::from_options(options);
        let capabilities = Capabilities::detect(&document);
        let mut classmap = ClassMap::new();
        for name in BUILTIN_TRANSITIONS {
            classmap.register(name, &settings.classname);
        }
        Self {
            settings,
            classmap,
            capabilities,
            document,
            scheduler: Scheduler::new(),
            toasts: HashMap::new(),
            reactions: HashMap::new(),
            next_listener: 0,
        }
    }

    /// Merges `options` over the current settings.
    ///
    /// A new class prefix re-derives every registered transition.
    pub fn configure(&mut self, options: Options) -> &mut Self {
        let previous = self.settings.classname.clone();
        self.settings.merge(options);
        if self.settings.classname != previous {
            self.classmap.refresh(&self.settings.classname);
        }
        self
    }

    /// Registers `name` and makes it the active transition.
    pub fn transition(&mut self, name: &str) -> &mut Self {
        self.register_transition(name);
        self.settings.transition = name.to_string();
        self
    }

    /// Derives and caches the class map for `name`, replacing any cached one.
    pub fn register_transition(&mut self, name: &str) -> &TransitionClassMap {
        self.classmap.register(name, &self.settings.classname)
    }

    /// Emits a toast and schedules its whole lifecycle.
    ///
    /// `message` is inserted as markup without escaping. `duration` only
    /// matters when auto close is on.
    pub fn toast(&mut self, kind: ToastKind, message: &str, duration: u64) -> Result<&mut Self> {
        let transition = self.settings.transition.clone();
        let classes = match self.classmap.get(&transition) {
            Some(classes) => classes.clone(),
            None => self
                .classmap
                .register(&transition, &self.settings.classname)
                .clone(),
        };
        let mode = self.capabilities.class_list;

        let wrapper = toast::ensure_container(
            &mut self.document,
            mode,
            &classes,
            &transition,
            self.settings.prepend_to,
        )?;
        let node = toast::build_toast(
            &mut self.document,
            mode,
            &self.settings.classname,
            &classes,
            kind,
            message,
        );

        if self.settings.enable_sounds {
            self.play_sound(kind, wrapper, &classes)?;
        }

        let reference = if self.settings.insert_before {
            self.document.first_child(wrapper)
        } else {
            None
        };
        self.document.insert_before(wrapper, node, reference)?;
        self.toasts.insert(
            node,
            Lifecycle::new(
                kind,
                classes.animate.clone(),
                classes.progress_bar.clone(),
                self.settings.on_show.clone(),
                self.settings.on_hide.clone(),
                self.settings.transition_timeout,
            ),
        );
        self.scheduler.set_timeout(SHOW_DELAY_MS, Job::Reveal(node));

        if self.settings.auto_close {
            self.scheduler
                .set_timeout(HIDE_DELAY_MS.saturating_add(duration), Job::Dismiss(node));
        } else {
            self.close_on_click(node)?;
        }

        if self.settings.progress_bar && self.settings.auto_close {
            self.scheduler.set_timeout(
                HIDE_DELAY_MS,
                Job::StartProgress {
                    toast: node,
                    kind,
                    duration,
                },
            );
        }

        tracing::debug!(%kind, transition = %transition, duration, "toast emitted");
        Ok(self)
    }

    /// Emits an info toast. A zero `duration` uses [`auto_close_duration`].
    pub fn info(&mut self, message: &str, duration: u64) -> Result<()> {
        self.notify(ToastKind::Info, message, duration)
    }

    /// Emits a success toast.
    pub fn success(&mut self, message: &str, duration: u64) -> Result<()> {
        self.notify(ToastKind::Success, message, duration)
    }

    /// Emits a warning toast.
    pub fn warning(&mut self, message: &str, duration: u64) -> Result<()> {
        self.notify(ToastKind::Warning, message, duration)
    }

    /// Emits an error toast.
    pub fn error(&mut self, message: &str, duration: u64) -> Result<()> {
        self.notify(ToastKind::Error, message, duration)
    }

    fn notify(&mut self, kind: ToastKind, message: &str, duration: u64) -> Result<()> {
        let duration = auto_close_duration(message, duration, &self.settings);
        self.toast(kind, message, duration).map(|_| ())
    }

    // ----------------------------------------------------------------------
    // Host driving
    // ----------------------------------------------------------------------

    /// Runs every job due within the next `ms` milliseconds and returns how
    /// many ran.
    pub fn advance(&mut self, ms: u64) -> usize {
        let deadline = self.scheduler.now().saturating_add(ms);
        self.run_until(deadline)
    }

    fn run_until(&mut self, deadline: u64) -> usize {
        let mut ran = 0;
        while let Some((timer, job)) = self.scheduler.pop_due(deadline) {
            self.run_job(timer, job);
            ran += 1;
        }
        self.scheduler.advance_clock(deadline);
        ran
    }

    /// Sleeps in real time until the next timer is due, then runs every job
    /// due at that instant. Returns how many ran.
    pub async fn tick(&mut self) -> usize {
        let Some(due) = self.scheduler.next_due() else {
            return 0;
        };
        let wait = due.saturating_sub(self.scheduler.now());
        if wait > 0 {
            tokio::time::sleep(Duration::from_millis(wait)).await;
        }
        self.run_until(due)
    }

    /// Runs the timer queue in real time until nothing is pending.
    pub async fn run_until_idle(&mut self) {
        while !self.scheduler.is_idle() {
            self.tick().await;
        }
    }

    /// Delivers a host event to the listeners registered on `node` and
    /// returns how many handled it.
    pub fn dispatch(&mut self, node: NodeId, event: &str) -> usize {
        let mut handled = 0;
        for listener in self.document.listeners(node, event) {
            let Some(&reaction) = self.reactions.get(&listener.id) else {
                continue;
            };
            tracing::trace!(?reaction, event, "dispatching");
            self.react(reaction);
            handled += 1;
        }
        handled
    }

    /// Resolved settings currently in effect.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Cached class names for `transition`, if it has been registered.
    #[must_use]
    pub fn class_map(&self, transition: &str) -> Option<&TransitionClassMap> {
        self.classmap.get(transition)
    }

    /// Host capabilities detected at construction.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The document toasts are inserted into.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access, e.g. to lay out the page before emitting toasts.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Virtual time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Whether any timer is still pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// Phase of a live toast. `None` once it has been removed.
    #[must_use]
    pub fn phase(&self, toast: NodeId) -> Option<ToastPhase> {
        self.toasts.get(&toast).map(|lc| lc.phase)
    }

    /// Number of toasts not yet removed.
    #[must_use]
    pub fn live_toasts(&self) -> usize {
        self.toasts.len()
    }

    // ----------------------------------------------------------------------
    // Steps
    // ----------------------------------------------------------------------

    fn run_job(&mut self, timer: TimerId, job: Job) {
        match job {
            Job::Reveal(node) => self.reveal(node),
            Job::Dismiss(node) => self.dismiss(node),
            Job::ShowFallback(node) => {
                tracing::trace!(?node, "show transition timed out");
                self.finish_show(node);
            }
            Job::HideFallback(node) => {
                tracing::trace!(?node, "hide transition timed out");
                self.finish_hide(node);
            }
            Job::StartProgress {
                toast,
                kind,
                duration,
            } => self.start_progress(toast, kind, duration),
            Job::ProgressTick {
                bar,
                started_at,
                duration,
            } => self.tick_progress(timer, bar, started_at, duration),
        }
    }

    fn react(&mut self, reaction: Reaction) {
        match reaction {
            Reaction::ShowEnded(node) => self.finish_show(node),
            Reaction::HideEnded(node) => self.finish_hide(node),
            Reaction::CloseClicked(node) => self.close_clicked(node),
            Reaction::SoundEnded(player) => self.sound_ended(player),
        }
    }

    fn next_listener_id(&mut self) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        id
    }

    fn listen(&mut self, node: NodeId, event: &str, reaction: Reaction) -> Result<Listener> {
        let id = self.next_listener_id();
        let listener = add_event(&mut self.document, node, event, Listener::object(id))?;
        self.reactions.insert(id, reaction);
        Ok(listener)
    }

    /// Drops the reactions of listeners that went away with their nodes.
    fn forget(&mut self, listeners: Vec<Listener>) {
        for listener in listeners {
            self.reactions.remove(&listener.id);
        }
    }

    fn unlisten(&mut self, node: NodeId, event: &str, listener: Listener) {
        self.reactions.remove(&listener.id);
        if let Err(err) = remove_event(&mut self.document, node, event, listener) {
            tracing::warn!(%err, event, "failed to detach listener");
        }
    }

    /// Attaches one completion listener per transition event name plus the
    /// fallback timeout, and records them on the toast.
    fn await_transition(&mut self, node: NodeId, reaction: Reaction, fallback: Job) {
        let Some(event) = self.capabilities.transition_end else {
            return;
        };
        let mut pending = Vec::new();
        for name in event.names() {
            match self.listen(node, name, reaction) {
                Ok(listener) => pending.push((name, listener)),
                Err(err) => tracing::warn!(%err, "transition listener rejected"),
            }
        }
        let timeout = self
            .toasts
            .get(&node)
            .map_or(0, |lc| lc.transition_timeout);
        let timer = self.scheduler.set_timeout(timeout, fallback);
        if let Some(lc) = self.toasts.get_mut(&node) {
            lc.pending = pending;
            lc.fallback = Some(timer);
        }
    }

    /// Drops the completion listeners and fallback of the running phase.
    fn settle_transition(&mut self, node: NodeId) {
        let (pending, fallback) = match self.toasts.get_mut(&node) {
            Some(lc) => (std::mem::take(&mut lc.pending), lc.fallback.take()),
            None => return,
        };
        for (name, listener) in pending {
            self.unlisten(node, name, listener);
        }
        if let Some(timer) = fallback {
            self.scheduler.clear(timer);
        }
    }

    fn with_classes(&mut self, node: NodeId, add: &[&str], remove: &[&str]) {
        let mode = self.capabilities.class_list;
        if let Some(element) = self.document.element_mut(node) {
            if !remove.is_empty() {
                remove_class(mode, element, remove);
            }
            if !add.is_empty() {
                add_class(mode, element, add);
            }
        }
    }

    fn reveal(&mut self, node: NodeId) {
        let Some(lc) = self.toasts.get_mut(&node) else {
            return;
        };
        if !lc.apply(Signal::Reveal) {
            return;
        }
        let show = lc.animate.show.clone();

        if self.capabilities.transition_end.is_some() {
            self.await_transition(node, Reaction::ShowEnded(node), Job::ShowFallback(node));
            self.with_classes(node, &[show.as_str()], &[]);
        } else {
            self.with_classes(node, &[show.as_str()], &[]);
            self.finish_show(node);
        }
    }

    fn finish_show(&mut self, node: NodeId) {
        let Some(lc) = self.toasts.get_mut(&node) else {
            return;
        };
        if !lc.apply(Signal::ShowEnded) {
            return;
        }
        let (kind, on_show) = (lc.kind, lc.on_show.clone());
        self.settle_transition(node);
        if let Some(on_show) = on_show {
            on_show(kind);
        }
    }

    fn dismiss(&mut self, node: NodeId) {
        // Keep callbacks paired: a toast still fading in counts as shown.
        if self.phase(node) == Some(ToastPhase::Showing) {
            self.finish_show(node);
        }
        let Some(lc) = self.toasts.get_mut(&node) else {
            return;
        };
        if !lc.apply(Signal::Dismiss) {
            return;
        }
        let hide = lc.animate.hide.clone();

        if self.capabilities.transition_end.is_some() {
            self.await_transition(node, Reaction::HideEnded(node), Job::HideFallback(node));
            self.with_classes(node, &[hide.as_str()], &[]);
        } else {
            self.with_classes(node, &[hide.as_str()], &[]);
            self.finish_hide(node);
        }
    }

    fn finish_hide(&mut self, node: NodeId) {
        let Some(lc) = self.toasts.get_mut(&node) else {
            return;
        };
        if !lc.apply(Signal::HideEnded) {
            return;
        }
        self.settle_transition(node);
        let Some(lc) = self.toasts.remove(&node) else {
            return;
        };
        let dropped = toast::remove_toast(&mut self.document, node);
        self.forget(dropped);
        tracing::debug!(kind = %lc.kind, "toast removed");
        if let Some(on_hide) = lc.on_hide {
            on_hide(lc.kind);
        }
    }

    fn close_on_click(&mut self, node: NodeId) -> Result<()> {
        self.with_classes(node, &[CLOSE_ON_CLICK_CLASS], &[]);
        let listener = self.listen(node, "click", Reaction::CloseClicked(node))?;
        if let Some(lc) = self.toasts.get_mut(&node) {
            lc.click = Some(listener);
        }
        Ok(())
    }

    fn close_clicked(&mut self, node: NodeId) {
        let Some(listener) = self.toasts.get_mut(&node).and_then(|lc| lc.click.take()) else {
            return;
        };
        self.unlisten(node, "click", listener);
        self.with_classes(node, &[], &[CLOSE_ON_CLICK_CLASS]);
        self.scheduler.set_timeout(HIDE_DELAY_MS, Job::Dismiss(node));
    }

    fn play_sound(
        &mut self,
        kind: ToastKind,
        wrapper: NodeId,
        classes: &TransitionClassMap,
    ) -> Result<()> {
        let sound = self.settings.sounds.for_kind(kind).to_string();
        let player = toast::build_sound_player(
            &mut self.document,
            self.capabilities.class_list,
            classes,
            &sound,
        );
        self.listen(player, "ended", Reaction::SoundEnded(player))?;
        if let Some(outer) = self.document.parent(wrapper) {
            self.document.append_child(outer, player)?;
        }
        tracing::debug!(%kind, sound = %sound, "sound player attached");
        Ok(())
    }

    fn sound_ended(&mut self, player: NodeId) {
        for listener in self.document.listeners(player, "ended") {
            self.unlisten(player, "ended", listener);
        }
        let dropped = toast::remove_sound_player(&mut self.document, player);
        self.forget(dropped);
    }

    fn start_progress(&mut self, toast: NodeId, kind: ToastKind, duration: u64) {
        let Some(base) = self.toasts.get(&toast).map(|lc| lc.progress_bar.clone()) else {
            return;
        };
        let bar = toast::build_progress_bar(
            &mut self.document,
            self.capabilities.class_list,
            &base,
            kind,
        );
        if let Err(err) = self.document.append_child(toast, bar) {
            tracing::warn!(%err, "failed to attach progress bar");
            return;
        }
        self.scheduler.set_interval(
            PROGRESS_TICK_MS,
            Job::ProgressTick {
                bar,
                started_at: self.scheduler.now(),
                duration,
            },
        );
    }

    fn tick_progress(&mut self, timer: TimerId, bar: NodeId, started_at: u64, duration: u64) {
        if !self.document.is_connected(bar) {
            self.scheduler.clear(timer);
            return;
        }
        let elapsed = self.scheduler.now().saturating_sub(started_at);
        let percent = toast::progress_percent(elapsed, duration);
        if let Some(element) = self.document.element_mut(bar) {
            element.set_width(format!("{}%", percent.min(100)));
        }
        if percent >= 100 {
            self.scheduler.clear(timer);
        }
    }
}

impl Default for Toasty {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording(options: Options) -> (Options, Log) {
        let log: Log = Rc::default();
        let shown = Rc::clone(&log);
        let hidden = Rc::clone(&log);
        let options = options
            .on_show(move |kind| shown.borrow_mut().push(format!("show:{kind}")))
            .on_hide(move |kind| hidden.borrow_mut().push(format!("hide:{kind}")));
        (options, log)
    }

    fn only_toast(toasty: &Toasty) -> NodeId {
        let wrapper = toasty
            .document()
            .query_selector(".toast-wrapper")
            .expect("wrapper should exist");
        toasty.document().children(wrapper)[0]
    }

    #[test]
    fn auto_close_duration_derives_from_length_when_unset() {
        let settings = Settings::from_options(Options {
            duration: Some(0),
            ..Options::default()
        });
        assert_eq!(auto_close_duration("hello", 0, &settings), 250);
        assert_eq!(auto_close_duration("hello", 3000, &settings), 3000);
    }

    #[test]
    fn auto_close_duration_prefers_configured_default() {
        let settings = Settings::default();
        assert_eq!(auto_close_duration("hello", 0, &settings), 4000);
    }

    #[test]
    fn new_registers_builtin_transitions() {
        let toasty = Toasty::default();
        for name in BUILTIN_TRANSITIONS {
            assert!(toasty.class_map(name).is_some(), "{name}");
        }
    }

    #[test]
    fn transition_registers_and_activates_unknown_names() {
        let mut toasty = Toasty::default();
        toasty.transition("spin");

        assert_eq!(toasty.settings().transition, "spin");
        assert_eq!(toasty.class_map("spin").unwrap().animate.show, "spin-show");
    }

    #[test]
    fn configure_with_new_prefix_rederives_class_maps() {
        let mut toasty = Toasty::default();
        toasty.configure(Options {
            classname: Some("alert".into()),
            ..Options::default()
        });

        assert_eq!(toasty.class_map("fade").unwrap().main_wrapper, "alert-wrapper");
    }

    #[test]
    fn unknown_active_transition_is_registered_lazily() {
        let mut toasty = Toasty::new(Options {
            transition: Some("wobble".into()),
            ..Options::default()
        });
        assert!(toasty.class_map("wobble").is_none());

        toasty.toast(ToastKind::Info, "Hi", 1000).unwrap();
        assert!(toasty.class_map("wobble").is_some());
        assert!(toasty
            .document()
            .query_selector(".toast-container--wobble")
            .is_some());
    }

    #[test]
    fn show_waits_for_transition_end_event() {
        let (options, log) = recording(Options::default());
        let mut toasty = Toasty::new(options);
        toasty.toast(ToastKind::Success, "Saved", 1000).unwrap();
        let node = only_toast(&toasty);

        assert_eq!(toasty.phase(node), Some(ToastPhase::Init));
        toasty.advance(SHOW_DELAY_MS);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Showing));
        assert!(toasty.document().has_class(node, "fade-show"));
        assert!(log.borrow().is_empty());

        assert_eq!(toasty.dispatch(node, "transitionend"), 1);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Shown));
        assert_eq!(*log.borrow(), vec!["show:success"]);

        // Listener is detached after the first firing.
        assert_eq!(toasty.dispatch(node, "transitionend"), 0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn show_falls_back_to_timeout_without_event() {
        let (options, log) = recording(Options {
            transition_timeout: Some(300),
            ..Options::default()
        });
        let mut toasty = Toasty::new(options);
        toasty.toast(ToastKind::Info, "Hi", 5000).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(SHOW_DELAY_MS + 299);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Showing));
        toasty.advance(1);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Shown));
        assert_eq!(*log.borrow(), vec!["show:info"]);
    }

    #[test]
    fn legacy_host_completes_transitions_synchronously() {
        let (options, log) = recording(Options::default());
        let mut toasty = Toasty::with_host(options, HostProfile::legacy());
        toasty.toast(ToastKind::Warning, "Low disk", 500).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(SHOW_DELAY_MS);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Shown));

        toasty.advance(HIDE_DELAY_MS + 500 - SHOW_DELAY_MS);
        assert_eq!(toasty.phase(node), None);
        assert_eq!(toasty.document().child_count(toasty.document().body()), 0);
        assert_eq!(*log.borrow(), vec!["show:warning", "hide:warning"]);
    }

    #[test]
    fn hide_timer_applies_hide_class_then_waits_for_event() {
        let (options, log) = recording(Options::default());
        let mut toasty = Toasty::new(options);
        toasty.toast(ToastKind::Error, "Boom", 1000).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(SHOW_DELAY_MS);
        toasty.dispatch(node, "transitionend");
        toasty.advance(HIDE_DELAY_MS + 1000 - SHOW_DELAY_MS);

        assert_eq!(toasty.phase(node), Some(ToastPhase::Hiding));
        assert!(toasty.document().has_class(node, "fade-hide"));
        assert!(toasty.document().is_connected(node));

        toasty.dispatch(node, "transitionend");
        assert_eq!(toasty.phase(node), None);
        assert!(!toasty.document().is_connected(node));
        assert_eq!(*log.borrow(), vec!["show:error", "hide:error"]);
    }

    #[test]
    fn dismiss_while_showing_delivers_show_first() {
        let (options, log) = recording(Options {
            transition_timeout: Some(60_000),
            ..Options::default()
        });
        let mut toasty = Toasty::new(options);
        toasty.toast(ToastKind::Info, "quick", 0).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(HIDE_DELAY_MS);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Hiding));
        assert_eq!(*log.borrow(), vec!["show:info"]);
    }

    #[test]
    fn click_to_close_ignores_timers() {
        let (options, log) = recording(Options {
            auto_close: Some(false),
            ..Options::default()
        });
        let mut toasty = Toasty::with_host(options, HostProfile::legacy());
        toasty.toast(ToastKind::Info, "Click me", 100).unwrap();
        let node = only_toast(&toasty);
        assert!(toasty.document().has_class(node, CLOSE_ON_CLICK_CLASS));

        toasty.advance(60_000);
        assert_eq!(toasty.phase(node), Some(ToastPhase::Shown));
        assert!(toasty.is_idle());

        assert_eq!(toasty.dispatch(node, "click"), 1);
        assert!(!toasty.document().has_class(node, CLOSE_ON_CLICK_CLASS));
        assert_eq!(toasty.dispatch(node, "click"), 0);

        toasty.advance(HIDE_DELAY_MS);
        assert_eq!(toasty.phase(node), None);
        assert_eq!(*log.borrow(), vec!["show:info", "hide:info"]);
    }

    #[test]
    fn progress_bar_grows_until_full() {
        let mut toasty = Toasty::new(Options {
            progress_bar: Some(true),
            ..Options::default()
        });
        toasty.toast(ToastKind::Success, "Uploading", 1000).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(HIDE_DELAY_MS);
        let bar = toasty
            .document()
            .query_selector_in(node, ".toast-progressbar")
            .expect("progress bar should be attached");
        assert!(toasty.document().has_class(bar, "toast-progressbar--success"));

        toasty.advance(500);
        assert_eq!(toasty.document().element(bar).unwrap().width(), Some("50%"));

        toasty.advance(500);
        assert_eq!(toasty.document().element(bar).unwrap().width(), Some("100%"));
    }

    #[test]
    fn progress_bar_survives_the_longest_duration() {
        let mut toasty = Toasty::new(Options {
            progress_bar: Some(true),
            ..Options::default()
        });
        toasty.toast(ToastKind::Info, "x", u64::MAX).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(HIDE_DELAY_MS + PROGRESS_TICK_MS);
        let bar = toasty
            .document()
            .query_selector_in(node, ".toast-progressbar")
            .unwrap();
        assert_eq!(toasty.document().element(bar).unwrap().width(), Some("0%"));
    }

    #[test]
    fn progress_bar_needs_auto_close() {
        let mut toasty = Toasty::new(Options {
            progress_bar: Some(true),
            auto_close: Some(false),
            ..Options::default()
        });
        toasty.toast(ToastKind::Info, "Stay", 1000).unwrap();
        let node = only_toast(&toasty);

        toasty.advance(HIDE_DELAY_MS * 2);
        assert!(toasty
            .document()
            .query_selector_in(node, ".toast-progressbar")
            .is_none());
    }

    #[test]
    fn sound_player_attaches_to_container_and_cleans_up() {
        let mut toasty = Toasty::new(Options {
            enable_sounds: Some(true),
            ..Options::default()
        });
        toasty.success("Done", 1000).unwrap();

        let player = toasty
            .document()
            .query_selector(".toast-soundplayer")
            .expect("sound player should be attached");
        let outer = toasty.document().parent(player).unwrap();
        assert!(toasty.document().has_class(outer, "toast-container--fade"));
        assert!(toasty
            .document()
            .element(player)
            .unwrap()
            .inner_html()
            .contains("./dist/sounds/success/1.mp3"));

        assert_eq!(toasty.dispatch(player, "ended"), 1);
        assert!(!toasty.document().is_connected(player));
        assert!(toasty.document().is_connected(outer));
    }

    #[test]
    fn drained_toasts_release_their_nodes() {
        let mut toasty = Toasty::with_host(
            Options {
                enable_sounds: Some(true),
                progress_bar: Some(true),
                ..Options::default()
            },
            HostProfile::legacy(),
        );
        for round in 0..50 {
            toasty.info(&format!("toast {round}"), 500).unwrap();
            toasty.advance(10_000);
        }

        assert_eq!(toasty.live_toasts(), 0);
        assert_eq!(toasty.document().element_count(), 2);
        assert!(toasty.reactions.is_empty());
    }

    #[test]
    fn unplayed_sound_is_forgotten_with_its_container() {
        let mut toasty = Toasty::with_host(
            Options {
                enable_sounds: Some(true),
                ..Options::default()
            },
            HostProfile::legacy(),
        );
        toasty.warning("Careful", 500).unwrap();
        let player = toasty.document().query_selector(".toast-soundplayer").unwrap();
        assert_eq!(toasty.reactions.len(), 1);

        toasty.advance(HIDE_DELAY_MS + 500);
        assert!(toasty.document().element(player).is_none());
        assert!(toasty.reactions.is_empty());
        assert_eq!(toasty.dispatch(player, "ended"), 0);
    }

    #[test]
    fn prepend_target_outside_body_is_an_error() {
        let mut document = Document::default();
        let stray = document.create_element("div");
        let mut toasty = Toasty::with_document(
            Options {
                prepend_to: Some(stray),
                ..Options::default()
            },
            document,
        );

        assert!(toasty.toast(ToastKind::Info, "Hi", 100).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn run_until_idle_drains_the_queue() {
        let (options, log) = recording(Options {
            progress_bar: Some(true),
            ..Options::default()
        });
        let mut toasty = Toasty::new(options);
        toasty.info("Hello", 200).unwrap();

        toasty.run_until_idle().await;

        assert!(toasty.is_idle());
        assert_eq!(toasty.live_toasts(), 0);
        assert_eq!(*log.borrow(), vec!["show:info", "hide:info"]);
    }
}
