//! Countdown timers stepped once per frame.
//!
//! A [`Timer`] is built by the caller and handed to [`Stage::start_timer`], which
//! owns it until it expires or is stopped. Times are in milliseconds.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;

use super::error::TimerError;
use super::Stage;

/// Id of a running timer. Ids are never reused within one stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimerId(NonZeroU64);

impl TimerId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Arguments of a progress callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimerProgress {
    /// Milliseconds run so far.
    pub elapsed: f32,
    pub goal: f32,
}

type ProgressFn = Box<dyn FnMut(&mut Stage, &mut Timer, TimerProgress)>;
type FinishFn = Box<dyn FnMut(&mut Stage, &mut Timer)>;

/// Result of advancing a timer by one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum TimerStep {
    Idle,
    Progress(TimerProgress),
    /// Reached the goal and started over.
    Looped,
    /// Reached the goal and expired.
    Finished,
}

/// Countdown with optional progress and finish callbacks.
///
/// Callbacks run on the frame loop with the stage and the timer itself, so they
/// may restart it, change its duration, or stop it. A stop requested from a
/// callback takes effect after all timers of the frame were stepped.
pub struct Timer {
    id: Option<TimerId>,
    goal: f32,
    elapsed: f32,
    looping: bool,
    progress_every: f32,
    next_progress: f32,
    reset_requested: bool,
    on_progress: Option<ProgressFn>,
    on_finish: Option<FinishFn>,
}

impl Timer {
    /// Timer running for `goal_ms` milliseconds.
    pub fn new(goal_ms: f32) -> Self {
        Self {
            id: None,
            goal: goal_ms,
            elapsed: 0.0,
            looping: false,
            progress_every: 0.0,
            next_progress: 0.0,
            reset_requested: false,
            on_progress: None,
            on_finish: None,
        }
    }

    /// Restart whenever the goal is reached instead of expiring.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Calls `f` at most once per frame whenever another `every_ms` have passed.
    /// A cadence of 0 disables progress events.
    pub fn on_progress<F>(mut self, every_ms: f32, f: F) -> Self
    where
        F: FnMut(&mut Stage, &mut Timer, TimerProgress) + 'static,
    {
        self.progress_every = every_ms.max(0.0);
        self.next_progress = self.progress_every;
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Calls `f` each time the goal is reached.
    pub fn on_finish<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut Stage, &mut Timer) + 'static,
    {
        self.on_finish = Some(Box::new(f));
        self
    }

    /// `Some` exactly while the timer is running on a stage.
    #[inline]
    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Milliseconds run since the last (re)start.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn goal(&self) -> f32 {
        self.goal
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Fraction of the goal reached, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.goal <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.goal).clamp(0.0, 1.0)
    }

    /// Sets a new goal and restarts from zero on the next step.
    pub fn set_duration(&mut self, goal_ms: f32) {
        self.goal = goal_ms;
        self.reset_requested = true;
    }

    /// Sets a new goal and keeps the elapsed time.
    pub fn update_duration(&mut self, goal_ms: f32) {
        self.goal = goal_ms;
    }

    /// Restarts from zero on the next step.
    pub fn restart(&mut self) {
        self.reset_requested = true;
    }

    fn rewind(&mut self) {
        self.elapsed = 0.0;
        self.next_progress = self.progress_every;
    }

    pub(crate) fn step(&mut self, elapsed_ms: f32) -> TimerStep {
        if std::mem::take(&mut self.reset_requested) {
            self.rewind();
        } else {
            self.elapsed += elapsed_ms;
        }

        if self.elapsed >= self.goal {
            if self.looping {
                self.rewind();
                TimerStep::Looped
            } else {
                TimerStep::Finished
            }
        } else if self.progress_every > 0.0 && self.elapsed >= self.next_progress {
            self.next_progress += self.progress_every;
            TimerStep::Progress(TimerProgress { elapsed: self.elapsed, goal: self.goal })
        } else {
            TimerStep::Idle
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("id", &self.id)
            .field("goal", &self.goal)
            .field("elapsed", &self.elapsed)
            .field("looping", &self.looping)
            .field("progress_every", &self.progress_every)
            .finish_non_exhaustive()
    }
}

/// Running timers keyed by id.
#[derive(Debug)]
pub(crate) struct TimerList {
    timers: BTreeMap<TimerId, Timer>,
    /// One-shot timers that reached their goal during the last step, id cleared.
    /// Kept until the next step so their owner can take them back.
    expired: BTreeMap<TimerId, Timer>,
    last_id: u64,
    stepping: bool,
    /// Timer lent out to its own callback.
    current: Option<TimerId>,
    deferred_stops: Vec<TimerId>,
    expiring: Vec<TimerId>,
    scratch: Vec<TimerId>,
}

impl TimerList {
    pub(crate) fn new() -> Self {
        Self {
            timers: BTreeMap::new(),
            expired: BTreeMap::new(),
            last_id: 0,
            stepping: false,
            current: None,
            deferred_stops: Vec::new(),
            expiring: Vec::new(),
            scratch: Vec::new(),
        }
    }

    fn next_id(&mut self) -> TimerId {
        self.last_id += 1;
        // Starts at 1 and a u64 counter does not wrap in practice.
        TimerId(NonZeroU64::new(self.last_id).unwrap_or(NonZeroU64::MIN))
    }

    fn is_running(&self, id: TimerId) -> bool {
        (self.timers.contains_key(&id) || self.current == Some(id))
            && !self.deferred_stops.contains(&id)
            && !self.expiring.contains(&id)
    }

    fn len(&self) -> usize {
        let lent = self.current.is_some_and(|id| self.is_running(id));
        self.timers.keys().filter(|&&id| self.is_running(id)).count() + usize::from(lent)
    }

    fn remove(&mut self, id: TimerId) -> Option<Timer> {
        let mut timer = self.timers.remove(&id)?;
        timer.id = None;
        Some(timer)
    }

    pub(crate) fn clear(&mut self) {
        self.timers.clear();
        self.expired.clear();
        self.deferred_stops.clear();
        self.expiring.clear();
    }
}

// ── stage API ───────────────────────────────────────────────────────────────

impl Stage {
    /// Starts `timer` and returns its id.
    ///
    /// Timers started from a timer callback are first stepped on the next frame.
    ///
    /// # Panics
    /// Panics if the timer is already running.
    pub fn start_timer(&mut self, mut timer: Timer) -> TimerId {
        if let Some(id) = timer.id {
            panic!("timer {id} is already running");
        }

        let id = self.timers.next_id();
        timer.id = Some(id);
        timer.rewind();
        timer.reset_requested = false;

        log::debug!("timer {id} started (goal {} ms, looping {})", timer.goal, timer.looping);
        self.timers.timers.insert(id, timer);
        id
    }

    /// Stops a running timer and drops it. Also discards a one-shot timer that
    /// expired during this frame's step.
    ///
    /// While timers are being stepped the removal is deferred until every timer
    /// of the frame has run.
    pub fn stop_timer(&mut self, id: TimerId) -> Result<(), TimerError> {
        if self.timers.expired.remove(&id).is_some() {
            log::debug!("expired timer {id} discarded");
            return Ok(());
        }
        if !self.timers.is_running(id) {
            let err = TimerError::NotRunning(id);
            log::warn!("{err}");
            return Err(err);
        }

        if self.timers.stepping {
            self.timers.deferred_stops.push(id);
        } else {
            self.timers.remove(id);
        }
        log::debug!("timer {id} stopped");
        Ok(())
    }

    /// Stops a running timer and hands it back with its id cleared, ready to be
    /// started again. Not available from timer callbacks.
    ///
    /// A one-shot timer that expired during this frame's step can be taken back
    /// until the next step.
    pub fn take_timer(&mut self, id: TimerId) -> Result<Timer, TimerError> {
        if self.timers.stepping {
            let err = TimerError::Busy(id);
            log::warn!("{err}");
            return Err(err);
        }
        self.timers
            .remove(id)
            .or_else(|| self.timers.expired.remove(&id))
            .ok_or(TimerError::NotRunning(id))
    }

    /// The running timer `id`. `None` inside that timer's own callback.
    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.timers.get(&id)
    }

    pub fn timer_mut(&mut self, id: TimerId) -> Option<&mut Timer> {
        self.timers.timers.get_mut(&id)
    }

    pub fn is_timer_running(&self, id: TimerId) -> bool {
        self.timers.is_running(id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Advances every running timer by `dt` seconds and runs due callbacks.
    pub(super) fn step_timers(&mut self, dt: f32) {
        let elapsed_ms = dt * 1000.0;
        if !self.timers.expired.is_empty() {
            log::trace!("dropping {} unclaimed expired timers", self.timers.expired.len());
            self.timers.expired.clear();
        }

        let mut ids = std::mem::take(&mut self.timers.scratch);
        ids.clear();
        ids.extend(self.timers.timers.keys().copied());

        self.timers.stepping = true;
        for &id in &ids {
            if self.timers.deferred_stops.contains(&id) {
                continue;
            }
            let Some(mut timer) = self.timers.timers.remove(&id) else {
                continue;
            };
            self.timers.current = Some(id);

            match timer.step(elapsed_ms) {
                TimerStep::Idle => {}
                TimerStep::Progress(progress) => {
                    if let Some(mut f) = timer.on_progress.take() {
                        f(self, &mut timer, progress);
                        timer.on_progress = Some(f);
                    }
                }
                TimerStep::Looped => self.finish_timer(&mut timer),
                TimerStep::Finished => {
                    self.finish_timer(&mut timer);
                    self.timers.expiring.push(id);
                    log::debug!("timer {id} expired");
                }
            }

            self.timers.current = None;
            self.timers.timers.insert(id, timer);
        }
        self.timers.stepping = false;
        self.timers.scratch = ids;

        for id in std::mem::take(&mut self.timers.deferred_stops) {
            self.timers.remove(id);
        }
        for id in std::mem::take(&mut self.timers.expiring) {
            if let Some(timer) = self.timers.remove(id) {
                self.timers.expired.insert(id, timer);
            }
        }
    }

    fn finish_timer(&mut self, timer: &mut Timer) {
        if let Some(mut f) = timer.on_finish.take() {
            f(self, timer);
            timer.on_finish = Some(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_reports_progress_then_finish() {
        let mut t = Timer::new(1000.0).on_progress(400.0, |_, _, _| {});

        assert_eq!(t.step(250.0), TimerStep::Idle);
        assert_eq!(t.step(250.0), TimerStep::Progress(TimerProgress { elapsed: 500.0, goal: 1000.0 }));
        assert_eq!(t.step(250.0), TimerStep::Idle);
        assert_eq!(t.step(250.0), TimerStep::Finished);
    }

    #[test]
    fn at_most_one_progress_per_step() {
        let mut t = Timer::new(10_000.0).on_progress(100.0, |_, _, _| {});
        assert!(matches!(t.step(450.0), TimerStep::Progress(_)));
        assert!(matches!(t.step(0.0), TimerStep::Progress(_)));
        assert_eq!(t.next_progress, 300.0);
    }

    #[test]
    fn looping_rewinds() {
        let mut t = Timer::new(500.0).looping().on_progress(200.0, |_, _, _| {});
        assert!(matches!(t.step(250.0), TimerStep::Progress(_)));
        assert_eq!(t.step(250.0), TimerStep::Looped);
        assert_eq!(t.elapsed(), 0.0);
        assert_eq!(t.next_progress, 200.0);
    }

    #[test]
    fn zero_cadence_never_reports_progress() {
        let mut t = Timer::new(1000.0);
        assert_eq!(t.step(999.0), TimerStep::Idle);
    }

    #[test]
    fn restart_applies_on_next_step() {
        let mut t = Timer::new(1000.0);
        t.step(750.0);
        t.restart();
        assert_eq!(t.elapsed(), 750.0);
        assert_eq!(t.step(750.0), TimerStep::Idle);
        assert_eq!(t.elapsed(), 0.0);
    }

    #[test]
    #[should_panic(expected = "already running")]
    fn starting_a_running_timer_panics() {
        let mut stage = Stage::new(crate::stage::StageConfig::default()).unwrap();
        let mut timer = Timer::new(100.0);
        timer.id = Some(TimerId(NonZeroU64::MIN));
        stage.start_timer(timer);
    }

    #[test]
    fn duration_changes() {
        let mut t = Timer::new(1000.0);
        t.step(500.0);
        t.update_duration(400.0);
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.step(0.0), TimerStep::Finished);

        t.set_duration(2000.0);
        t.step(100.0);
        assert_eq!(t.elapsed(), 0.0);
        assert_eq!(t.goal(), 2000.0);
    }
}
