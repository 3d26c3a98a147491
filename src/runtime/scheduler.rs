use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Interval ticks replayed per registration in one `advance_to` before the
/// schedule skips ahead.
pub const MAX_CATCH_UP_TICKS: u32 = 1_000;

/// Work driven by the [`Scheduler`]. `now_ms` is the logical time of the run;
/// for interval tasks it is the tick's due time, not the host clock.
pub trait ScheduledTask {
    fn run(&mut self, now_ms: i64);
}

impl<F> ScheduledTask for F
where
    F: FnMut(i64),
{
    fn run(&mut self, now_ms: i64) {
        self(now_ms);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cadence {
    Interval { period_ms: i64, next_due_ms: i64 },
    EveryFrame,
}

struct Registration {
    id: u64,
    cadence: Cadence,
    /// `None` while the task is running.
    task: Option<Box<dyn ScheduledTask>>,
}

#[derive(Default)]
struct SchedulerState {
    now_ms: i64,
    next_id: u64,
    registrations: Vec<Registration>,
}

impl SchedulerState {
    fn find_mut(&mut self, id: u64) -> Option<&mut Registration> {
        self.registrations.iter_mut().find(|registration| registration.id == id)
    }

    fn take(&mut self, id: u64) -> Option<Registration> {
        let index = self
            .registrations
            .iter()
            .position(|registration| registration.id == id)?;
        Some(self.registrations.remove(index))
    }
}

/// Single-threaded cooperative scheduler on a host-advanced logical clock.
///
/// Interval tasks run once per elapsed period (missed periods are caught up);
/// frame tasks run once per [`Scheduler::advance_to`]. Tasks may register or
/// cancel other tasks, including themselves, while running.
#[derive(Clone, Default)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Scheduler")
            .field("now_ms", &state.now_ms)
            .field("registrations", &state.registrations.len())
            .finish()
    }
}

impl Scheduler {
    #[must_use]
    pub fn new(start_ms: i64) -> Self {
        let scheduler = Self::default();
        scheduler.state.borrow_mut().now_ms = start_ms;
        scheduler
    }

    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.state.borrow().now_ms
    }

    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.state.borrow().registrations.len()
    }

    /// Runs `task` every `period_ms`, first one period from now.
    pub fn every(
        &self,
        period_ms: i64,
        task: impl ScheduledTask + 'static,
    ) -> ChartResult<TaskHandle> {
        if period_ms <= 0 {
            return Err(ChartError::InvalidData(
                "task period must be > 0 ms".to_owned(),
            ));
        }
        let next_due_ms = self.now_ms().saturating_add(period_ms);
        Ok(self.register(
            Cadence::Interval {
                period_ms,
                next_due_ms,
            },
            Box::new(task),
        ))
    }

    /// Runs `task` once per frame.
    pub fn every_frame(&self, task: impl ScheduledTask + 'static) -> TaskHandle {
        self.register(Cadence::EveryFrame, Box::new(task))
    }

    fn register(&self, cadence: Cadence, task: Box<dyn ScheduledTask>) -> TaskHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.registrations.push(Registration {
            id,
            cadence,
            task: Some(task),
        });
        debug!(task_id = id, ?cadence, "task registered");
        TaskHandle {
            id,
            state: Some(Rc::downgrade(&self.state)),
        }
    }

    /// Moves the clock to `now_ms` and runs everything that became due.
    ///
    /// Returns the number of task runs. A clock that moves backwards runs
    /// frame tasks only.
    pub fn advance_to(&self, now_ms: i64) -> usize {
        let ids: Vec<u64> = {
            let mut state = self.state.borrow_mut();
            state.now_ms = state.now_ms.max(now_ms);
            state.registrations.iter().map(|registration| registration.id).collect()
        };
        let now_ms = self.now_ms();

        let mut runs = 0;
        for id in ids {
            let mut catch_up = 0_u32;
            loop {
                let Some((mut task, run_at, repeat)) = self.take_due(id, now_ms, catch_up) else {
                    break;
                };
                task.run(run_at);
                runs += 1;
                catch_up += 1;

                let leftover = {
                    let mut state = self.state.borrow_mut();
                    match state.find_mut(id) {
                        Some(registration) => {
                            registration.task = Some(task);
                            None
                        }
                        None => Some(task),
                    }
                };
                if leftover.is_some() {
                    debug!(task_id = id, "task cancelled while running");
                    break;
                }
                if !repeat {
                    break;
                }
            }
        }
        runs
    }

    fn take_due(
        &self,
        id: u64,
        now_ms: i64,
        catch_up: u32,
    ) -> Option<(Box<dyn ScheduledTask>, i64, bool)> {
        let mut state = self.state.borrow_mut();
        let registration = state.find_mut(id)?;
        if registration.task.is_none() {
            return None;
        }
        let (run_at, repeat) = match &mut registration.cadence {
            Cadence::EveryFrame => (now_ms, false),
            Cadence::Interval {
                period_ms,
                next_due_ms,
            } => {
                if *next_due_ms > now_ms {
                    return None;
                }
                if catch_up >= MAX_CATCH_UP_TICKS {
                    let skipped = (now_ms - *next_due_ms) / *period_ms + 1;
                    warn!(task_id = id, skipped, "interval task fell behind, skipping ticks");
                    *next_due_ms = next_due_ms.saturating_add(skipped.saturating_mul(*period_ms));
                    return None;
                }
                let run_at = *next_due_ms;
                *next_due_ms = next_due_ms.saturating_add(*period_ms);
                (run_at, true)
            }
        };
        let task = registration.task.take()?;
        Some((task, run_at, repeat))
    }
}

/// Owner of one scheduler registration. Dropping it cancels the task.
#[must_use = "dropping a TaskHandle cancels its task"]
pub struct TaskHandle {
    id: u64,
    state: Option<Weak<RefCell<SchedulerState>>>,
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl TaskHandle {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True while the registration exists and the scheduler is alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(state) = self.state.as_ref().and_then(Weak::upgrade) else {
            return false;
        };
        match state.try_borrow() {
            Ok(state) => state.registrations.iter().any(|r| r.id == self.id),
            Err(_) => true,
        }
    }

    /// Removes the registration. Idempotent.
    pub fn cancel(&mut self) {
        let Some(state) = self.state.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        // The task is dropped after the borrow ends so its own handles can
        // cancel in turn.
        let removed = match state.try_borrow_mut() {
            Ok(mut state) => state.take(self.id),
            Err(_) => {
                warn!(task_id = self.id, "scheduler busy, task not cancelled");
                None
            }
        };
        if removed.is_some() {
            debug!(task_id = self.id, "task cancelled");
        }
        drop(removed);
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
