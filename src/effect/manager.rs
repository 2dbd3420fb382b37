//! The effect manager: owns both queues and reacts to pointer input.

use std::time::Duration;

use super::instance::{EffectId, EffectInstance, EffectKind, Position, RIPPLE_LIFETIME};
use super::queue::BoundedQueue;
use crate::input::{PointerEvent, TrailThrottle};
use crate::options::Options;
use crate::platform::MobileDetector;
use crate::schedule::{Clock, Scheduler};
use crate::sound::{TonePlayer, ToneSpec};
use crate::style::StyleSheet;
use crate::surface::{EffectElement, Surface};

/// Maximum number of trail dots on screen. Not configurable.
pub const TRAIL_CAPACITY: usize = 8;

/// Host collaborators injected into an [`EffectManager`].
pub struct Host {
    /// Where elements and the stylesheet go.
    pub surface: Box<dyn Surface>,
    /// Time source for the trail throttle and creation stamps.
    pub clock: Box<dyn Clock>,
    /// Deferred removal tasks.
    pub scheduler: Box<dyn Scheduler>,
    /// Click tone playback.
    pub tone: Box<dyn TonePlayer>,
}

/// Which input streams the host should forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subscriptions {
    /// Forward clicks.
    pub click: bool,
    /// Forward pointer movement.
    pub pointer_move: bool,
}

impl Subscriptions {
    /// Whether no stream is wanted at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.click && !self.pointer_move
    }
}

/// Manages the lifecycle of ripple and trail elements.
///
/// Each qualifying event evicts the oldest instance of its kind when the
/// queue is full, attaches a new element and schedules its removal. An
/// evicted instance has its removal task cancelled; [`expire`](Self::expire)
/// is still safe to call for it and does nothing.
///
/// A manager built on a mobile device with
/// [`disable_on_mobile`](crate::options::PlatformOptions::disable_on_mobile)
/// set is inert: it wants no subscriptions and ignores every call.
pub struct EffectManager {
    options: Options,
    stylesheet: StyleSheet,
    inert: bool,
    suppressed: bool,
    ripples: BoundedQueue,
    trails: BoundedQueue,
    throttle: TrailThrottle,
    next_id: u64,
    surface: Box<dyn Surface>,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    tone: Box<dyn TonePlayer>,
}

impl EffectManager {
    /// Build a manager and, unless inert, install the shared stylesheet.
    #[must_use]
    pub fn new(options: Options, host: Host, device: &dyn MobileDetector) -> Self {
        let inert = options.platform.disable_on_mobile && device.is_mobile();
        let mut manager = Self {
            stylesheet: StyleSheet::from_options(&options),
            ripples: BoundedQueue::new(options.ripple.max_count),
            trails: BoundedQueue::new(TRAIL_CAPACITY),
            throttle: TrailThrottle::default(),
            options,
            inert,
            suppressed: false,
            next_id: 0,
            surface: host.surface,
            clock: host.clock,
            scheduler: host.scheduler,
            tone: host.tone,
        };
        if inert {
            log::info!("mobile device detected, pointer effects disabled");
        } else {
            manager.activate();
        }
        manager
    }

    fn activate(&mut self) {
        if let Err(e) = self.surface.install_style(self.stylesheet.text()) {
            log::warn!("failed to install effect stylesheet: {e}");
        }
        log::info!(
            "pointer effects loaded (max ripples {}, trail {})",
            self.ripples.capacity(),
            if self.options.trail.enabled { "on" } else { "off" },
        );
    }

    /// Input streams the host should wire to this manager.
    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions {
        if self.inert {
            return Subscriptions::default();
        }
        Subscriptions {
            click: true,
            pointer_move: self.options.trail.enabled,
        }
    }

    /// Dispatch a pointer event to the matching handler.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Click { at } => self.handle_click(at),
            PointerEvent::Move { at } => self.handle_pointer_move(at),
        }
    }

    /// Spawn a ripple at `at`, evicting the oldest one if at capacity.
    pub fn handle_click(&mut self, at: Position) {
        if self.inert {
            return;
        }
        let id = self.allocate_id();
        let element = EffectElement::ripple(id, at, self.options.ripple.multi_color);
        self.spawn(&element, RIPPLE_LIFETIME);
        if self.options.sound.enabled {
            self.play_click_tone();
        }
    }

    /// Spawn a trail dot at `at` unless throttled or trails are off.
    pub fn handle_pointer_move(&mut self, at: Position) {
        if self.inert || !self.options.trail.enabled {
            return;
        }
        if !self.throttle.accept(self.clock.now()) {
            log::trace!("trail sample at ({}, {}) throttled", at.x, at.y);
            return;
        }
        let id = self.allocate_id();
        let element = EffectElement::trail(id, at, self.options.trail.size);
        let lifetime = Duration::from_millis(self.options.trail.duration_ms);
        self.spawn(&element, lifetime);
    }

    /// Natural removal of `id`. Detaches it from the surface and drops it
    /// from its queue if still present. Returns whether it was still queued;
    /// already evicted or expired ids are a no-op.
    pub fn expire(&mut self, id: EffectId) -> bool {
        let queued = self
            .ripples
            .remove(id)
            .or_else(|| self.trails.remove(id))
            .is_some();
        if let Err(e) = self.surface.remove(id) {
            log::warn!("failed to detach {id}: {e}");
        }
        log::trace!("expired {id} (queued: {queued})");
        queued
    }

    /// Hide all effects without touching queues or subscriptions.
    pub fn disable(&mut self) {
        if self.set_suppressed(true) {
            log::info!("pointer effects disabled");
        }
    }

    /// Undo [`disable`](Self::disable).
    pub fn enable(&mut self) {
        if self.set_suppressed(false) {
            log::info!("pointer effects enabled");
        }
    }

    /// Store `color` as the ripple color and rewrite every color token in the
    /// shared stylesheet. The value is not validated.
    pub fn change_color(&mut self, color: &str) {
        if self.inert {
            return;
        }
        color.clone_into(&mut self.options.ripple.color);
        self.stylesheet.recolor(color);
        if let Err(e) = self.surface.update_style(self.stylesheet.text()) {
            log::warn!("failed to update effect stylesheet: {e}");
        }
        log::info!("ripple color changed to {color}");
    }

    /// Remove every live effect and cancel its pending removal.
    pub fn clear(&mut self) {
        let live: Vec<EffectInstance> =
            self.ripples.drain().chain(self.trails.drain()).collect();
        for instance in &live {
            self.retire(instance);
        }
    }

    /// Current options, including any runtime color change.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the manager was disabled at construction.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Whether effects are currently hidden.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Current stylesheet text.
    #[must_use]
    pub fn style_text(&self) -> &str {
        self.stylesheet.text()
    }

    /// Live ripples, oldest first.
    pub fn ripples(&self) -> impl Iterator<Item = &EffectInstance> {
        self.ripples.iter()
    }

    /// Live trail dots, oldest first.
    pub fn trails(&self) -> impl Iterator<Item = &EffectInstance> {
        self.trails.iter()
    }

    fn set_suppressed(&mut self, suppressed: bool) -> bool {
        if self.inert {
            return false;
        }
        if let Err(e) = self.surface.set_suppressed(suppressed) {
            log::warn!("failed to toggle effect suppression: {e}");
            return false;
        }
        self.suppressed = suppressed;
        true
    }

    fn allocate_id(&mut self) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn queue_mut(&mut self, kind: EffectKind) -> &mut BoundedQueue {
        match kind {
            EffectKind::Ripple => &mut self.ripples,
            EffectKind::Trail => &mut self.trails,
        }
    }

    // Evicts before attaching, so the surface never holds more than the cap.
    fn spawn(&mut self, element: &EffectElement, lifetime: Duration) {
        if let Some(oldest) = self.queue_mut(element.kind).evict_if_full() {
            self.retire(&oldest);
        }
        if let Err(e) = self.surface.append(element) {
            log::warn!("failed to attach {}: {e}", element.id);
            return;
        }
        let timer = match self.scheduler.schedule(lifetime, element.id) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("{} will only leave by eviction: {e}", element.id);
                None
            }
        };
        let instance = EffectInstance {
            id: element.id,
            kind: element.kind,
            position: element.position,
            created_at: self.clock.now(),
            lifetime,
            timer,
        };
        self.queue_mut(element.kind).push_back(instance);
    }

    fn retire(&mut self, instance: &EffectInstance) {
        if let Some(handle) = instance.timer {
            self.scheduler.cancel(handle);
        }
        if let Err(e) = self.surface.remove(instance.id) {
            log::warn!("failed to detach {}: {e}", instance.id);
        }
        log::debug!("evicted {} ({:?}) before expiry", instance.id, instance.kind);
    }

    fn play_click_tone(&mut self) {
        let tone = ToneSpec::click(self.options.sound.volume);
        if let Err(e) = self.tone.play(&tone) {
            log::info!("click tone failed: {e}");
        }
    }
}

impl std::fmt::Debug for EffectManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectManager")
            .field("inert", &self.inert)
            .field("suppressed", &self.suppressed)
            .field("ripples", &self.ripples.len())
            .field("trails", &self.trails.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessHost, RecordingTonePlayer};
    use crate::platform::UserAgent;

    const DESKTOP: fn() -> bool = || false;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn manager(options: Options) -> (EffectManager, HeadlessHost) {
        let rig = HeadlessHost::new();
        let manager = EffectManager::new(options, rig.host(), &DESKTOP);
        (manager, rig)
    }

    fn ripple_ids(manager: &EffectManager) -> Vec<u64> {
        manager.ripples().map(|fx| fx.id.0).collect()
    }

    #[test]
    fn activation_installs_style_once() {
        let (manager, rig) = manager(Options::default());
        let state = rig.surface.state();
        assert_eq!(state.style_installs, 1);
        assert_eq!(state.style.as_deref(), Some(manager.style_text()));
        assert_eq!(
            manager.subscriptions(),
            Subscriptions {
                click: true,
                pointer_move: true
            }
        );
    }

    #[test]
    fn click_creates_ripple_at_viewport_position() {
        let (mut manager, rig) = manager(Options::default());
        rig.clock.set(ms(40));
        manager.handle_event(PointerEvent::click(10.0, 20.0));

        let fx = manager.ripples().next().unwrap();
        assert_eq!(fx.kind, EffectKind::Ripple);
        assert_eq!(fx.position, Position::new(10.0, 20.0));
        assert_eq!(fx.created_at, ms(40));
        assert_eq!(fx.expires_at(), ms(1240));
        let element = rig.surface.state().attached[&fx.id].clone();
        assert_eq!(element.class_name(), "click-ripple");
    }

    #[test]
    fn ripple_expires_after_lifetime() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(1.0, 1.0));
        assert_eq!(rig.advance(&mut manager, ms(1199)), 0);
        assert_eq!(manager.ripples().count(), 1);
        assert_eq!(rig.advance(&mut manager, ms(1)), 1);
        assert_eq!(manager.ripples().count(), 0);
        assert_eq!(rig.surface.attached_count(), 0);
    }

    #[test]
    fn six_rapid_clicks_keep_five_ripples() {
        let (mut manager, rig) = manager(Options::default());
        for i in 0..6 {
            manager.handle_click(Position::new(f64::from(i), 0.0));
            rig.clock.advance(ms(10));
        }
        assert_eq!(ripple_ids(&manager), vec![1, 2, 3, 4, 5]);
        assert_eq!(rig.surface.attached_count(), 5);
        assert!(!rig.surface.is_attached(EffectId(0)));
        // The first ripple's removal task was cancelled, not left to no-op
        assert_eq!(rig.scheduler.cancelled_count(), 1);
        assert_eq!(rig.scheduler.pending_count(), 5);
    }

    #[test]
    fn ripple_queue_never_exceeds_max() {
        let mut options = Options::default();
        options.ripple.max_count = 3;
        let (mut manager, rig) = manager(options);
        for i in 0..50_u32 {
            manager.handle_click(Position::new(f64::from(i), 0.0));
            let _ = rig.advance(&mut manager, ms(u64::from(i % 7) * 100));
            assert!(manager.ripples().count() <= 3);
            assert!(rig.surface.attached_count() <= 3 + TRAIL_CAPACITY);
        }
    }

    #[test]
    fn eviction_takes_oldest_survivor() {
        let mut options = Options::default();
        options.ripple.max_count = 2;
        let (mut manager, rig) = manager(options);
        manager.handle_click(Position::new(0.0, 0.0)); // id 0, due 1200
        rig.clock.advance(ms(600));
        manager.handle_click(Position::new(0.0, 0.0)); // id 1, due 1800
        let _ = rig.advance(&mut manager, ms(600)); // id 0 expires
        manager.handle_click(Position::new(0.0, 0.0)); // id 2
        assert_eq!(ripple_ids(&manager), vec![1, 2]);
        manager.handle_click(Position::new(0.0, 0.0)); // evicts 1
        assert_eq!(ripple_ids(&manager), vec![2, 3]);
    }

    #[test]
    fn stale_expiry_leaves_newer_ripple_at_same_spot() {
        let mut options = Options::default();
        options.ripple.max_count = 1;
        let (mut manager, rig) = manager(options);
        let spot = Position::new(50.0, 50.0);
        manager.handle_click(spot);
        manager.handle_click(spot);
        assert_eq!(ripple_ids(&manager), vec![1]);

        // Deliver the evicted instance's removal anyway
        assert!(!manager.expire(EffectId(0)));
        assert!(!manager.expire(EffectId(0)));
        assert_eq!(ripple_ids(&manager), vec![1]);
        assert!(rig.surface.is_attached(EffectId(1)));
    }

    #[test]
    fn trail_moves_are_throttled() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_pointer_move(Position::new(0.0, 0.0));
        let appended = rig.surface.state().appended;
        for t in [10, 20, 49] {
            rig.clock.set(ms(t));
            manager.handle_pointer_move(Position::new(1.0, 1.0));
        }
        assert_eq!(manager.trails().count(), 1);
        assert_eq!(rig.surface.state().appended, appended);
        assert_eq!(rig.scheduler.pending_count(), 1);

        rig.clock.set(ms(50));
        manager.handle_pointer_move(Position::new(2.0, 2.0));
        assert_eq!(manager.trails().count(), 2);
    }

    #[test]
    fn accepted_trails_are_spaced_and_capped() {
        let (mut manager, rig) = manager(Options::default());
        for t in (0..2_000).step_by(13) {
            rig.clock.set(ms(t));
            manager.handle_pointer_move(Position::new(t as f64, 0.0));
            assert!(manager.trails().count() <= TRAIL_CAPACITY);
        }
        let stamps: Vec<Duration> =
            manager.trails().map(|fx| fx.created_at).collect();
        assert!(stamps.windows(2).all(|w| w[1] - w[0] >= ms(50)));
    }

    #[test]
    fn trail_sized_and_timed_from_options() {
        let mut options = Options::default();
        options.trail.size = 20.0;
        options.trail.duration_ms = 300;
        let (mut manager, rig) = manager(options);
        manager.handle_pointer_move(Position::new(5.0, 6.0));
        let fx = manager.trails().next().unwrap().clone();
        assert_eq!(rig.surface.state().attached[&fx.id].size, Some(20.0));
        assert_eq!(fx.lifetime, ms(300));
        let _ = rig.advance(&mut manager, ms(300));
        assert_eq!(manager.trails().count(), 0);
    }

    #[test]
    fn ninth_trail_evicts_first() {
        let (mut manager, rig) = manager(Options::default());
        for i in 0..9 {
            rig.clock.set(ms(i * 50));
            manager.handle_pointer_move(Position::new(0.0, 0.0));
        }
        let ids: Vec<u64> = manager.trails().map(|fx| fx.id.0).collect();
        assert_eq!(ids, (1..9).collect::<Vec<_>>());
    }

    #[test]
    fn disabled_trail_ignores_moves() {
        let mut options = Options::default();
        options.trail.enabled = false;
        let (mut manager, rig) = manager(options);
        assert!(!manager.subscriptions().pointer_move);
        manager.handle_event(PointerEvent::moved(3.0, 3.0));
        assert_eq!(manager.trails().count(), 0);
        assert_eq!(rig.surface.state().appended, 0);
    }

    #[test]
    fn mobile_device_stays_inert() {
        let rig = HeadlessHost::new();
        let iphone = UserAgent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".to_owned());
        let mut manager = EffectManager::new(Options::default(), rig.host(), &iphone);

        assert!(manager.is_inert());
        assert!(manager.subscriptions().is_empty());
        manager.handle_click(Position::new(1.0, 1.0));
        manager.handle_pointer_move(Position::new(1.0, 1.0));
        manager.change_color("#FF0000");
        manager.disable();

        let state = rig.surface.state();
        assert_eq!(state.style_installs, 0);
        assert_eq!(state.appended, 0);
        assert!(!state.suppressed);
        assert_eq!(manager.ripples().count(), 0);
    }

    #[test]
    fn mobile_allowed_when_option_off() {
        let rig = HeadlessHost::new();
        let mut options = Options::default();
        options.platform.disable_on_mobile = false;
        let android = UserAgent("Linux; Android 14".to_owned());
        let manager = EffectManager::new(options, rig.host(), &android);
        assert!(!manager.is_inert());
        assert!(manager.subscriptions().click);
    }

    #[test]
    fn change_color_restyles_live_and_new_ripples() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(0.0, 0.0));
        manager.change_color("#FF0000");
        manager.handle_click(Position::new(9.0, 9.0));

        assert_eq!(manager.options().ripple.color, "#FF0000");
        let style = rig.surface.state().style.clone().unwrap();
        assert!(style.contains("border-color: #FF0000 !important"));
        assert!(!style.contains("#409EFF"));
        // Both ripples share the single rule
        assert_eq!(manager.ripples().count(), 2);
        assert_eq!(rig.surface.state().style_installs, 1);
    }

    #[test]
    fn disable_is_presentational_only() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(0.0, 0.0));
        manager.disable();
        assert!(manager.is_suppressed());
        assert!(rig.surface.state().suppressed);
        assert_eq!(manager.ripples().count(), 1);

        manager.handle_click(Position::new(1.0, 0.0));
        assert_eq!(manager.ripples().count(), 2);

        manager.enable();
        assert!(!manager.is_suppressed());
        assert!(!rig.surface.state().suppressed);
    }

    #[test]
    fn click_tone_only_when_enabled() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(0.0, 0.0));
        assert!(rig.tone.played().is_empty());

        let mut options = Options::default();
        options.sound.enabled = true;
        options.sound.volume = 0.4;
        let (mut manager, rig) = self::manager(options);
        manager.handle_click(Position::new(0.0, 0.0));
        let played = rig.tone.played();
        assert_eq!(played.len(), 1);
        assert_eq!(played[0].frequency_hz, 523.25);
        assert_eq!(played[0].volume, 0.4);
    }

    #[test]
    fn failing_tone_never_breaks_click() {
        let rig = HeadlessHost::with_tone(RecordingTonePlayer::failing());
        let mut options = Options::default();
        options.sound.enabled = true;
        let mut manager = EffectManager::new(options, rig.host(), &DESKTOP);
        for _ in 0..3 {
            manager.handle_click(Position::new(0.0, 0.0));
        }
        assert_eq!(rig.tone.played().len(), 3);
        assert_eq!(manager.ripples().count(), 3);
        assert_eq!(rig.scheduler.pending_count(), 3);
    }

    #[test]
    fn clear_removes_everything() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(0.0, 0.0));
        manager.handle_pointer_move(Position::new(0.0, 0.0));
        manager.clear();
        assert_eq!(manager.ripples().count() + manager.trails().count(), 0);
        assert_eq!(rig.surface.attached_count(), 0);
        assert_eq!(rig.scheduler.pending_count(), 0);
    }

    #[test]
    fn failed_append_leaves_nothing_queued() {
        let rig = HeadlessHost::new();
        rig.surface.set_failing(true);
        let mut manager = EffectManager::new(Options::default(), rig.host(), &DESKTOP);
        for i in 0..7 {
            manager.handle_click(Position::new(f64::from(i), 0.0));
        }
        manager.change_color("#FF0000");
        assert_eq!(manager.ripples().count(), 0);
        assert_eq!(rig.scheduler.pending_count(), 0);
        assert_eq!(rig.surface.state().appended, 0);
        // Stored color follows the call even when the stylesheet write fails
        assert_eq!(manager.options().ripple.color, "#FF0000");

        rig.surface.set_failing(false);
        manager.handle_click(Position::new(0.0, 0.0));
        assert_eq!(ripple_ids(&manager), vec![7]);
        assert_eq!(rig.surface.attached_count(), 1);
    }

    #[test]
    fn failed_schedule_keeps_untimed_ripples_within_cap() {
        let (mut manager, rig) = manager(Options::default());
        rig.scheduler.set_failing(true);
        for i in 0..7 {
            manager.handle_click(Position::new(f64::from(i), 0.0));
        }
        assert_eq!(ripple_ids(&manager), vec![2, 3, 4, 5, 6]);
        assert!(manager.ripples().all(|fx| fx.timer.is_none()));
        assert_eq!(rig.surface.attached_count(), 5);
        assert_eq!(rig.scheduler.pending_count(), 0);
        // Untimed ripples only leave by eviction
        assert_eq!(rig.advance(&mut manager, ms(5_000)), 0);
        assert_eq!(manager.ripples().count(), 5);
    }

    #[test]
    fn failed_suppression_keeps_previous_state() {
        let (mut manager, rig) = manager(Options::default());
        manager.handle_click(Position::new(0.0, 0.0));
        rig.surface.set_failing(true);
        manager.disable();
        assert!(!manager.is_suppressed());
        assert!(!rig.surface.state().suppressed);

        rig.surface.set_failing(false);
        manager.disable();
        rig.surface.set_failing(true);
        manager.enable();
        assert!(manager.is_suppressed());
        assert!(rig.surface.state().suppressed);
        assert_eq!(manager.ripples().count(), 1);
    }
}
