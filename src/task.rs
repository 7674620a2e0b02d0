//! Non-blocking collection of tokio tasks
//!
//! The UI thread never awaits. Provider calls are spawned on the runtime and
//! their handles are checked once per frame with [`poll_task`].

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// Result of polling a task slot
pub enum PollResult<T> {
    /// The slot is empty
    NoTask,
    /// The task is still running
    Pending,
    /// The task finished; the slot has been emptied
    Complete(Result<T, JoinError>),
}

/// Take the result out of `slot` if its task has finished.
///
/// ```ignore
/// match poll_task(&mut self.reply) {
///     PollResult::Complete(Ok(Ok(text))) => { /* provider answered */ }
///     PollResult::Complete(Ok(Err(e))) => { /* provider error */ }
///     PollResult::Complete(Err(e)) => { /* task panicked */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_task<T>(slot: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = slot.as_mut() else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        return PollResult::Pending;
    }

    match handle.now_or_never() {
        Some(result) => {
            slot.take();
            PollResult::Complete(result)
        }
        None => {
            tracing::warn!("Task not ready despite is_finished()");
            PollResult::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_empty_slot() {
        let mut slot: Option<JoinHandle<()>> = None;
        assert!(matches!(poll_task(&mut slot), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_pending_then_complete() {
        let (tx, rx) = tokio::sync::oneshot::channel::<u32>();
        let mut slot = Some(tokio::spawn(async move { rx.await.unwrap_or(0) }));

        assert!(matches!(poll_task(&mut slot), PollResult::Pending));
        assert!(slot.is_some());

        tx.send(7).unwrap();
        let value = loop {
            match poll_task(&mut slot) {
                PollResult::Complete(result) => break result.unwrap(),
                PollResult::Pending => tokio::time::sleep(Duration::from_millis(2)).await,
                PollResult::NoTask => panic!("slot emptied without a result"),
            }
        };

        assert_eq!(value, 7);
        assert!(slot.is_none());
    }
}
