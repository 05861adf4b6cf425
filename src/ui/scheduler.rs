//! Deferred work: timed phases and in-flight contact submissions.
//!
//! Components never sleep. They hand a [`Timer`] plus a cancellation token to
//! a [`Scheduler`], and the host feeds the timer back into the page once it is
//! due, unless the token was cancelled first.

use crate::error::Result;
use crate::ui::notification::{NotificationPhase, ToastId};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A pending contact submission. It resolves once delivery finished.
pub type SubmitFuture = Pin<Box<dyn Future<Output = Result<()>> + Send + 'static>>;

/// Work the page asked to be woken up for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Next lifecycle phase of a toast
    Notification {
        toast: ToastId,
        phase: NotificationPhase,
    },
    /// One-off decoration of outbound links after bootstrap
    DecorateExternalLinks,
}

pub trait Scheduler {
    /// Deliver `timer` back to the page after `delay` unless `cancel` fires first
    fn schedule(&self, delay: Duration, cancel: CancellationToken, timer: Timer);

    /// Drive `submission` to completion and report its result back to the page
    fn spawn_submission(&self, submission: SubmitFuture);
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    cancel: CancellationToken,
    timer: Timer,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    timers: Vec<PendingTimer>,
    submissions: Vec<SubmitFuture>,
}

/// Virtual-time scheduler for headless hosts and tests.
///
/// Nothing happens until [`ManualScheduler::advance`] is called. Clones share
/// the same queue, so one clone can live inside a page while another drives it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    #[must_use]
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Timers still waiting to fire, as `(due, timer)` in due order
    #[must_use]
    pub fn pending(&self) -> Vec<(Duration, Timer)> {
        let state = self.lock();
        let mut pending: Vec<_> = state
            .timers
            .iter()
            .filter(|t| !t.cancel.is_cancelled())
            .map(|t| (t.due, t.seq, t.timer))
            .collect();
        pending.sort_by_key(|&(due, seq, _)| (due, seq));
        pending.into_iter().map(|(due, _, timer)| (due, timer)).collect()
    }

    /// Moves virtual time forward by `by`, handing each due timer to `fire` in
    /// due order. Timers scheduled by `fire` itself are honoured when they fall
    /// inside the window.
    pub fn advance(&self, by: Duration, mut fire: impl FnMut(Timer)) {
        let deadline = self.now() + by;
        loop {
            let next = {
                let mut state = self.lock();
                state.timers.retain(|t| !t.cancel.is_cancelled());
                let earliest = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= deadline)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(index, _)| index);
                earliest.map(|index| {
                    let pending = state.timers.swap_remove(index);
                    state.now = pending.due;
                    pending.timer
                })
            };
            match next {
                Some(timer) => fire(timer),
                None => break,
            }
        }
        self.lock().now = deadline;
    }

    /// Submissions handed over so far, oldest first
    #[must_use]
    pub fn take_submissions(&self) -> Vec<SubmitFuture> {
        std::mem::take(&mut self.lock().submissions)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, cancel: CancellationToken, timer: Timer) {
        let mut state = self.lock();
        let due = state.now + delay;
        state.seq += 1;
        let seq = state.seq;
        state.timers.push(PendingTimer {
            due,
            seq,
            cancel,
            timer,
        });
    }

    fn spawn_submission(&self, submission: SubmitFuture) {
        self.lock().submissions.push(submission);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_advance_fires_in_due_order() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(ms(300), CancellationToken::new(), Timer::DecorateExternalLinks);
        let toast = ToastId::new(1);
        scheduler.schedule(
            ms(100),
            CancellationToken::new(),
            Timer::Notification {
                toast,
                phase: NotificationPhase::SlideIn,
            },
        );

        let mut fired = Vec::new();
        scheduler.advance(ms(1000), |timer| fired.push(timer));
        assert_eq!(
            fired,
            vec![
                Timer::Notification {
                    toast,
                    phase: NotificationPhase::SlideIn
                },
                Timer::DecorateExternalLinks,
            ]
        );
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_cancelled_timers_never_fire() {
        let scheduler = ManualScheduler::new();
        let token = CancellationToken::new();
        scheduler.schedule(ms(10), token.clone(), Timer::DecorateExternalLinks);
        token.cancel();

        let mut fired = 0;
        scheduler.advance(ms(50), |_| fired += 1);
        assert_eq!(fired, 0);
        assert!(scheduler.pending().is_empty());
    }

    #[test]
    fn test_timers_scheduled_while_firing_use_virtual_now() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(ms(100), CancellationToken::new(), Timer::DecorateExternalLinks);

        let chained = scheduler.clone();
        let mut seen = Vec::new();
        scheduler.advance(ms(1000), |timer| {
            seen.push(chained.now());
            if seen.len() == 1 {
                chained.schedule(ms(50), CancellationToken::new(), timer);
            }
        });
        assert_eq!(seen, vec![ms(100), ms(150)]);
    }

    #[test]
    fn test_timers_past_deadline_stay_pending() {
        let scheduler = ManualScheduler::new();
        scheduler.schedule(ms(500), CancellationToken::new(), Timer::DecorateExternalLinks);

        scheduler.advance(ms(499), |_| panic!("fired early"));
        assert_eq!(scheduler.pending(), vec![(ms(500), Timer::DecorateExternalLinks)]);
    }
}
