//! The task-local frame stack.

use std::cell::RefCell;
use std::future::Future;

use crate::{SpanFrame, TraceHandoff};

tokio::task_local! {
    static ACTIVE: RefCell<Vec<SpanFrame>>;
}

/// Pops its frame when the call unwinds, including on cancellation.
struct FrameGuard;

impl Drop for FrameGuard {
    fn drop(&mut self) {
        // Drop may run outside the task-local scope during task teardown.
        let _ = ACTIVE.try_with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Runs `body` inside a new span frame.
///
/// When an ambient frame exists the new frame is a child within the same
/// trace; otherwise a fresh trace is minted. The frame is popped when the
/// body completes or its future is dropped.
pub async fn with_frame<F, Fut, T>(body: F) -> T
where
    F: FnOnce(SpanFrame) -> Fut,
    Fut: Future<Output = T>,
{
    if ACTIVE.try_with(|_| ()).is_ok() {
        let frame = ACTIVE.with(|stack| {
            let mut stack = stack.borrow_mut();
            let frame = match stack.last() {
                Some(parent) => parent.child(),
                None => SpanFrame::root(),
            };
            stack.push(frame);
            frame
        });
        let _guard = FrameGuard;
        body(frame).await
    } else {
        let frame = SpanFrame::root();
        ACTIVE
            .scope(RefCell::new(vec![frame]), body(frame))
            .await
    }
}

/// Returns the innermost active frame, if any.
#[must_use]
pub fn current() -> Option<SpanFrame> {
    ACTIVE
        .try_with(|stack| stack.borrow().last().copied())
        .ok()
        .flatten()
}

/// Snapshots the ambient frame for handoff into a spawned task.
#[must_use]
pub fn capture() -> Option<TraceHandoff> {
    current().map(TraceHandoff::from_frame)
}

/// Runs `fut` with the handed-off frame as its ambient context, so spans
/// recorded inside join the originating trace.
pub async fn scope_seeded<F>(handoff: TraceHandoff, fut: F) -> F::Output
where
    F: Future,
{
    ACTIVE
        .scope(RefCell::new(vec![handoff.into_frame()]), fut)
        .await
}

/// Runs `fut` under a freshly minted root frame.
///
/// Every span recorded inside shares one new trace, regardless of any
/// ambient context outside the scope.
pub async fn root_scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    ACTIVE
        .scope(RefCell::new(vec![SpanFrame::root()]), fut)
        .await
}
