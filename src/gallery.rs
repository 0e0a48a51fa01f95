//! Image gallery of an open project, with timer-driven auto-advance.
//!
//! The auto-advance timer is a spawned task owned through an [`AutoAdvance`]
//! guard. Dropping the guard cancels the task, so a gallery that is dropped
//! (its modal closed) can never be advanced by its timer. Ticks already
//! queued when the guard dropped carry a [`TimerId`] that no live gallery
//! recognizes and are discarded.

use std::{
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Delivered on every elapsed auto-advance interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryTick {
    pub timer: TimerId,
}

#[derive(Default)]
struct TimerCounters {
    next_id: AtomicU64,
    started: AtomicUsize,
    cancelled: AtomicUsize,
}

/// Factory for auto-advance timers; all of them deliver into one channel.
#[derive(Clone)]
pub struct TickSource {
    tx: mpsc::UnboundedSender<GalleryTick>,
    counters: Arc<TimerCounters>,
}

impl TickSource {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GalleryTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            tx,
            counters: Arc::default(),
        };
        (source, rx)
    }

    /// Timers started so far.
    pub fn started(&self) -> usize {
        self.counters.started.load(Ordering::Relaxed)
    }

    /// Timers cancelled so far.
    pub fn cancelled(&self) -> usize {
        self.counters.cancelled.load(Ordering::Relaxed)
    }

    /// Start a timer whose first tick is one `period` from now.
    ///
    /// Must be called inside a tokio runtime.
    fn start(&self, period: Duration) -> AutoAdvance {
        let id = TimerId(self.counters.next_id.fetch_add(1, Ordering::Relaxed));
        let token = CancellationToken::new();
        self.counters.started.fetch_add(1, Ordering::Relaxed);

        let tx = self.tx.clone();
        let cancelled = token.clone();
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    () = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        if tx.send(GalleryTick { timer: id }).is_err() {
                            break;
                        }
                    }
                }
            }
            trace!(?id, "Auto-advance task finished");
        });

        trace!(?id, ?period, "Auto-advance timer started");
        AutoAdvance {
            id,
            token,
            counters: Arc::clone(&self.counters),
        }
    }
}

/// Guard for a running auto-advance timer.
pub struct AutoAdvance {
    id: TimerId,
    token: CancellationToken,
    counters: Arc<TimerCounters>,
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.token.cancel();
        self.counters.cancelled.fetch_add(1, Ordering::Relaxed);
        trace!(id = ?self.id, "Auto-advance timer cancelled");
    }
}

/// Current image of a project's image list.
///
/// Manual navigation is allowed while paused and restarts the auto-advance
/// interval, so the next automatic step happens one full period after the
/// last manual one.
pub struct Gallery {
    index: usize,
    len: usize,
    paused: bool,
    period: Duration,
    ticks: TickSource,
    timer: Option<AutoAdvance>,
}

impl Gallery {
    pub fn new(len: usize, ticks: TickSource, period: Duration) -> Self {
        let mut gallery = Self {
            index: 0,
            len,
            paused: false,
            period,
            ticks,
            timer: None,
        };
        gallery.restart_timer();
        gallery
    }

    pub const fn current_index(&self) -> usize {
        self.index
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether an auto-advance timer is currently running.
    pub const fn is_auto_advancing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        self.restart_timer();
    }

    pub fn prev(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
        self.restart_timer();
    }

    /// Jump to a specific image (indicator click). Out-of-range is ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
            self.restart_timer();
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        debug!(paused, "Gallery pause changed");
        self.restart_timer();
    }

    /// Apply a timer tick. Returns whether it belonged to this gallery's
    /// running timer and advanced it.
    pub fn on_tick(&mut self, tick: GalleryTick) -> bool {
        if self.timer.as_ref().map(|t| t.id) != Some(tick.timer) {
            trace!(timer = ?tick.timer, "Discarding stale gallery tick");
            return false;
        }
        self.index = (self.index + 1) % self.len;
        true
    }

    fn restart_timer(&mut self) {
        self.timer = None;
        if !self.paused && self.len > 1 && !self.period.is_zero() {
            self.timer = Some(self.ticks.start(self.period));
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::{sleep, timeout};

    use super::*;

    const PERIOD: Duration = Duration::from_millis(4000);

    /// Receive ticks until one advances `gallery`.
    async fn advance_by_timer(
        gallery: &mut Gallery,
        rx: &mut mpsc::UnboundedReceiver<GalleryTick>,
    ) {
        loop {
            let tick = rx.recv().await.unwrap();
            if gallery.on_tick(tick) {
                return;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrap_around() {
        let (ticks, _rx) = TickSource::channel();
        let mut gallery = Gallery::new(3, ticks, PERIOD);
        gallery.next();
        gallery.next();
        gallery.next();
        assert_eq!(gallery.current_index(), 0);
        gallery.prev();
        assert_eq!(gallery.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_gallery_ignores_navigation() {
        let (ticks, _rx) = TickSource::channel();
        let mut gallery = Gallery::new(0, ticks.clone(), PERIOD);
        gallery.next();
        gallery.prev();
        gallery.select(0);
        assert_eq!(gallery.current_index(), 0);
        assert!(!gallery.is_auto_advancing());
        assert_eq!(ticks.started(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_image_never_auto_advances() {
        let (ticks, _rx) = TickSource::channel();
        let gallery = Gallery::new(1, ticks, PERIOD);
        assert!(!gallery.is_auto_advancing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_never_starts_a_timer() {
        let (ticks, mut rx) = TickSource::channel();
        let mut gallery = Gallery::new(3, ticks.clone(), Duration::ZERO);
        assert!(!gallery.is_auto_advancing());

        gallery.next();
        gallery.set_paused(true);
        gallery.set_paused(false);
        assert!(!gallery.is_auto_advancing());
        assert_eq!(ticks.started(), 0);
        assert_eq!(gallery.current_index(), 1);

        let quiet = timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advance_on_interval() {
        let (ticks, mut rx) = TickSource::channel();
        let mut gallery = Gallery::new(2, ticks, PERIOD);
        let start = Instant::now();

        advance_by_timer(&mut gallery, &mut rx).await;
        assert_eq!(start.elapsed(), PERIOD);
        assert_eq!(gallery.current_index(), 1);

        advance_by_timer(&mut gallery, &mut rx).await;
        assert_eq!(start.elapsed(), PERIOD * 2);
        assert_eq!(gallery.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_restarts_interval() {
        let (ticks, mut rx) = TickSource::channel();
        let mut gallery = Gallery::new(3, ticks, PERIOD);

        sleep(Duration::from_millis(3000)).await;
        gallery.next();
        let manual = Instant::now();

        advance_by_timer(&mut gallery, &mut rx).await;
        assert_eq!(manual.elapsed(), PERIOD);
        assert_eq!(gallery.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_and_resume_restarts() {
        let (ticks, mut rx) = TickSource::channel();
        let mut gallery = Gallery::new(3, ticks.clone(), PERIOD);

        gallery.set_paused(true);
        assert!(!gallery.is_auto_advancing());
        // Manual navigation still works while paused.
        gallery.next();
        assert_eq!(gallery.current_index(), 1);
        assert!(!gallery.is_auto_advancing());

        let quiet = timeout(PERIOD * 3, rx.recv()).await;
        assert!(quiet.is_err(), "no ticks while paused");

        gallery.set_paused(false);
        let resumed = Instant::now();
        advance_by_timer(&mut gallery, &mut rx).await;
        assert_eq!(resumed.elapsed(), PERIOD);
        assert_eq!(gallery.current_index(), 2);

        // Redundant pause changes do not restart the timer.
        let started = ticks.started();
        gallery.set_paused(false);
        assert_eq!(ticks.started(), started);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timer() {
        let (ticks, mut rx) = TickSource::channel();
        let gallery = Gallery::new(3, ticks.clone(), PERIOD);
        assert_eq!(ticks.started(), 1);

        drop(gallery);
        assert_eq!(ticks.cancelled(), 1);

        let after_drop = timeout(PERIOD * 5, rx.recv()).await;
        assert!(after_drop.is_err(), "dropped gallery must not tick");
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_tick_is_discarded() {
        let (ticks, mut rx) = TickSource::channel();
        let mut first = Gallery::new(3, ticks.clone(), PERIOD);
        let mut second = Gallery::new(3, ticks, PERIOD);

        let tick = rx.recv().await.unwrap();
        let advanced_first = first.on_tick(tick);
        let advanced_second = second.on_tick(tick);
        assert!(advanced_first ^ advanced_second, "exactly one gallery owns a tick");
        assert_eq!(first.current_index() + second.current_index(), 1);
    }
}
