//! Call-coalescing wrappers driven by a [`Scheduler`] or [`Clock`].

use super::*;

/// Wraps `f` so that each call cancels the pending one and schedules a new
/// call `delay_ms` later. Only the last call of a burst runs, with its own
/// arguments, against the context that is current when the timer fires.
pub fn debounce<C, A, F>(delay_ms: i64, f: F) -> impl Fn(&mut C, A) -> Result<()>
where
    C: Scheduler,
    A: 'static,
    F: Fn(&mut C, A) -> Result<()> + 'static,
{
    let f = Rc::new(f);
    let pending: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

    move |ctx: &mut C, args: A| {
        if let Some(previous) = pending.take() {
            ctx.clear_timeout(previous);
        }
        let f = Rc::clone(&f);
        let slot = Rc::clone(&pending);
        let id = ctx.set_timeout(delay_ms, move |ctx| {
            slot.set(None);
            f(ctx, args)
        });
        pending.set(Some(id));
        Ok(())
    }
}

/// Wraps `f` so that a call runs immediately only when at least `delay_ms`
/// have passed since the last call that ran. Other calls are dropped.
pub fn throttle<C, A, F>(delay_ms: i64, f: F) -> impl Fn(&mut C, A) -> Result<()>
where
    C: Clock,
    F: Fn(&mut C, A) -> Result<()>,
{
    let last_run: Cell<Option<i64>> = Cell::new(None);

    move |ctx: &mut C, args: A| {
        let now = ctx.now_ms();
        if last_run
            .get()
            .is_some_and(|previous| now.saturating_sub(previous) < delay_ms)
        {
            return Ok(());
        }
        last_run.set(Some(now));
        f(ctx, args)
    }
}
