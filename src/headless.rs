//! In-memory backends for running the manager without a browser.
//!
//! Every backend is a cheap handle over shared state, so a clone can be
//! boxed into an [`EffectManager`] while the original stays behind for
//! inspection. Time only moves when [`HeadlessHost::advance`] is called.

use std::cell::{Cell, Ref, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::effect::{EffectId, EffectManager, Host};
use crate::error::EffectError;
use crate::schedule::{Clock, Scheduler, TimerHandle};
use crate::sound::{TonePlayer, ToneSpec};
use crate::surface::{EffectElement, Surface};

/// Observable state of a [`RecordingSurface`].
#[derive(Debug, Default)]
pub struct SurfaceState {
    /// Current stylesheet text, once installed.
    pub style: Option<String>,
    /// How many times a stylesheet was installed.
    pub style_installs: usize,
    /// Elements currently attached, keyed by id.
    pub attached: BTreeMap<EffectId, EffectElement>,
    /// Total appends seen.
    pub appended: usize,
    /// Removals that actually detached something.
    pub detached: usize,
    /// Whether the suppression class is set.
    pub suppressed: bool,
}

/// Surface that records mutations instead of drawing.
///
/// While failing, every mutation is rejected and nothing is recorded.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
    failing: Rc<Cell<bool>>,
}

impl RecordingSurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the recorded state.
    #[must_use]
    pub fn state(&self) -> Ref<'_, SurfaceState> {
        self.state.borrow()
    }

    /// Number of attached elements.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.state.borrow().attached.len()
    }

    /// Whether `id` is attached.
    #[must_use]
    pub fn is_attached(&self, id: EffectId) -> bool {
        self.state.borrow().attached.contains_key(&id)
    }

    /// Start or stop rejecting mutations. Affects every clone.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), EffectError> {
        if self.failing.get() {
            return Err(EffectError::Surface("surface detached".to_owned()));
        }
        Ok(())
    }
}

impl Surface for RecordingSurface {
    fn install_style(&mut self, css: &str) -> Result<(), EffectError> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        state.style = Some(css.to_owned());
        state.style_installs += 1;
        Ok(())
    }

    fn update_style(&mut self, css: &str) -> Result<(), EffectError> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        if state.style.is_none() {
            return Err(EffectError::Surface("no stylesheet installed".to_owned()));
        }
        state.style = Some(css.to_owned());
        Ok(())
    }

    fn append(&mut self, element: &EffectElement) -> Result<(), EffectError> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        state.appended += 1;
        let _ = state.attached.insert(element.id, element.clone());
        Ok(())
    }

    fn remove(&mut self, id: EffectId) -> Result<(), EffectError> {
        self.check()?;
        let mut state = self.state.borrow_mut();
        if state.attached.remove(&id).is_some() {
            state.detached += 1;
        }
        Ok(())
    }

    fn set_suppressed(&mut self, suppressed: bool) -> Result<(), EffectError> {
        self.check()?;
        self.state.borrow_mut().suppressed = suppressed;
        Ok(())
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Clock starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to `now`.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Default)]
struct TimerBook {
    next: u64,
    pending: BTreeMap<TimerHandle, (Duration, EffectId)>,
    cancelled: usize,
    failing: bool,
}

/// Scheduler that keeps deadlines in memory and fires them on demand.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    clock: ManualClock,
    book: Rc<RefCell<TimerBook>>,
}

impl ManualScheduler {
    /// Scheduler whose deadlines are measured against `clock`.
    #[must_use]
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            book: Rc::default(),
        }
    }

    /// Remove and return every task due at or before `now`, earliest
    /// deadline first.
    pub fn take_due(&self, now: Duration) -> Vec<EffectId> {
        let mut book = self.book.borrow_mut();
        let mut due: Vec<(Duration, TimerHandle, EffectId)> = book
            .pending
            .iter()
            .filter(|(_, (at, _))| *at <= now)
            .map(|(handle, (at, id))| (*at, *handle, *id))
            .collect();
        due.sort_unstable();
        for (_, handle, _) in &due {
            let _ = book.pending.remove(handle);
        }
        due.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Number of tasks still waiting.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.book.borrow().pending.len()
    }

    /// Whether `handle` is still waiting.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.book.borrow().pending.contains_key(&handle)
    }

    /// How many pending tasks were cancelled.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.book.borrow().cancelled
    }

    /// Start or stop refusing new tasks. Affects every clone.
    pub fn set_failing(&self, failing: bool) {
        self.book.borrow_mut().failing = failing;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(
        &mut self,
        delay: Duration,
        id: EffectId,
    ) -> Result<TimerHandle, EffectError> {
        let mut book = self.book.borrow_mut();
        if book.failing {
            return Err(EffectError::Schedule("timer queue closed".to_owned()));
        }
        let handle = TimerHandle(book.next);
        book.next += 1;
        let _ = book.pending.insert(handle, (self.clock.now() + delay, id));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let mut book = self.book.borrow_mut();
        if book.pending.remove(&handle).is_some() {
            book.cancelled += 1;
        }
    }
}

/// Tone player that records requests, optionally failing each one.
#[derive(Debug, Clone, Default)]
pub struct RecordingTonePlayer {
    played: Rc<RefCell<Vec<ToneSpec>>>,
    fail: bool,
}

impl RecordingTonePlayer {
    /// Player that accepts every tone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Player that records every tone and then reports failure, like a page
    /// without an audio API.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Tones requested so far.
    #[must_use]
    pub fn played(&self) -> Vec<ToneSpec> {
        self.played.borrow().clone()
    }
}

impl TonePlayer for RecordingTonePlayer {
    fn play(&mut self, tone: &ToneSpec) -> Result<(), EffectError> {
        self.played.borrow_mut().push(*tone);
        if self.fail {
            return Err(EffectError::Tone("AudioContext unavailable".to_owned()));
        }
        Ok(())
    }
}

/// A full set of headless backends sharing one manual clock.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    /// Recording surface.
    pub surface: RecordingSurface,
    /// Manual clock.
    pub clock: ManualClock,
    /// Manual scheduler driven by `clock`.
    pub scheduler: ManualScheduler,
    /// Recording tone player.
    pub tone: RecordingTonePlayer,
}

impl HeadlessHost {
    /// Fresh backends at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tone(RecordingTonePlayer::new())
    }

    /// Fresh backends with a specific tone player.
    #[must_use]
    pub fn with_tone(tone: RecordingTonePlayer) -> Self {
        let clock = ManualClock::new();
        Self {
            surface: RecordingSurface::new(),
            scheduler: ManualScheduler::new(clock.clone()),
            clock,
            tone,
        }
    }

    /// Boxed handles for [`EffectManager::new`].
    ///
    /// Every call returns handles onto the same shared state.
    #[must_use]
    pub fn host(&self) -> Host {
        Host {
            surface: Box::new(self.surface.clone()),
            clock: Box::new(self.clock.clone()),
            scheduler: Box::new(self.scheduler.clone()),
            tone: Box::new(self.tone.clone()),
        }
    }

    /// Move time forward by `by` and expire everything that came due.
    /// Returns how many expiries were delivered.
    pub fn advance(&self, manager: &mut EffectManager, by: Duration) -> usize {
        self.clock.advance(by);
        let due = self.scheduler.take_due(self.clock.now());
        for id in &due {
            let _ = manager.expire(*id);
        }
        due.len()
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}
