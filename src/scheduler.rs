use super::*;

/// Identifier returned by [`Scheduler::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) i64);

impl TimerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
}

pub type TimerTask<C> = Box<dyn FnOnce(&mut C) -> Result<()>>;

struct ScheduledTask<C> {
    id: TimerId,
    due_at: i64,
    order: i64,
    task: TimerTask<C>,
}

/// Virtual clock plus the pending one-shot tasks of a context `C`.
pub struct TimerQueue<C> {
    tasks: Vec<ScheduledTask<C>>,
    now_ms: i64,
    step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            now_ms: 0,
            step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl<C> std::fmt::Debug for TimerQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.tasks.len())
            .field("step_limit", &self.step_limit)
            .finish()
    }
}

impl<C> TimerQueue<C> {
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub fn set_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "timer step limit requires at least 1 step".into(),
            ));
        }
        self.step_limit = max_steps;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn schedule(&mut self, delay_ms: i64, task: TimerTask<C>) -> PendingTimer {
        let delay_ms = delay_ms.max(0);
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);
        self.tasks.push(ScheduledTask {
            id,
            due_at,
            order,
            task,
        });
        PendingTimer { id, due_at, order }
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before != self.tasks.len()
    }

    fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .tasks
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    fn take_next(&mut self, due_limit: Option<i64>) -> Option<ScheduledTask<C>> {
        let idx = self.next_task_index(due_limit)?;
        Some(self.tasks.remove(idx))
    }
}

/// A source of virtual time.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// A context that owns a [`TimerQueue`] of tasks which run against itself.
///
/// Tasks run in `(due_at, registration order)` order. A task scheduled while
/// another runs joins the same pass when it is already due.
pub trait Scheduler: Clock + Sized + 'static {
    fn timer_queue(&self) -> &TimerQueue<Self>;

    fn timer_queue_mut(&mut self) -> &mut TimerQueue<Self>;

    fn trace_timer_line(&mut self, _line: String) {}

    fn set_timeout<F>(&mut self, delay_ms: i64, task: F) -> TimerId
    where
        F: FnOnce(&mut Self) -> Result<()> + 'static,
    {
        let timer = self.timer_queue_mut().schedule(delay_ms, Box::new(task));
        self.trace_timer_line(format!(
            "[timer] schedule timeout id={} due_at={} delay_ms={}",
            timer.id.0,
            timer.due_at,
            delay_ms.max(0)
        ));
        timer.id
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        let removed = self.timer_queue_mut().cancel(id);
        self.trace_timer_line(format!("[timer] clear id={} removed={removed}", id.0));
        removed
    }

    fn pending_timers(&self) -> Vec<PendingTimer> {
        self.timer_queue().pending()
    }

    fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.timer_queue().now_ms.saturating_add(delta_ms);
        self.advance_time_to(target)
    }

    /// Runs every task due up to `target_ms` at its own due time, then
    /// leaves the clock at `target_ms`.
    fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.timer_queue().now_ms;
        if target_ms < from {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={from})"
            )));
        }
        let ran = run_timer_queue(self, Some(target_ms))?;
        self.timer_queue_mut().now_ms = target_ms;
        self.trace_timer_line(format!(
            "[timer] advance from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    fn run_due_timers(&mut self) -> Result<usize> {
        let now = self.timer_queue().now_ms;
        run_timer_queue(self, Some(now))
    }

    /// Runs every pending task, moving the clock to each task's due time.
    fn flush(&mut self) -> Result<()> {
        let from = self.timer_queue().now_ms;
        let ran = run_timer_queue(self, None)?;
        let to = self.timer_queue().now_ms;
        self.trace_timer_line(format!("[timer] flush from={from} to={to} ran={ran}"));
        Ok(())
    }

    fn run_next_timer(&mut self) -> Result<bool> {
        let Some(task) = self.timer_queue_mut().take_next(None) else {
            return Ok(false);
        };
        execute_task(self, task)?;
        Ok(true)
    }
}

fn run_timer_queue<C: Scheduler>(ctx: &mut C, due_limit: Option<i64>) -> Result<usize> {
    let mut steps = 0usize;
    while let Some(task) = ctx.timer_queue_mut().take_next(due_limit) {
        steps += 1;
        let queue = ctx.timer_queue();
        if steps > queue.step_limit {
            return Err(Error::TimerStepLimit {
                limit: queue.step_limit,
                now_ms: queue.now_ms,
                pending: queue.tasks.len() + 1,
            });
        }
        execute_task(ctx, task)?;
    }
    Ok(steps)
}

fn execute_task<C: Scheduler>(ctx: &mut C, task: ScheduledTask<C>) -> Result<()> {
    let queue = ctx.timer_queue_mut();
    if task.due_at > queue.now_ms {
        queue.now_ms = task.due_at;
    }
    let now_ms = queue.now_ms;
    ctx.trace_timer_line(format!(
        "[timer] run id={} due_at={} now_ms={now_ms}",
        task.id.0, task.due_at
    ));
    (task.task)(ctx)
}
