//! Remote fetch lifecycle
//!
//! [`Fetch`] runs one async provider call per query change and exposes the
//! outcome as a [`FetchState`]. Every view that shows remote data owns one.
//!
//! - `trigger` moves to `Loading` at once and spawns the producer.
//! - `poll` (called each frame) applies the result of the latest request.
//! - Calls are never cancelled. Each request is tagged with a sequence number
//!   and a result that arrives after a newer request was issued is dropped,
//!   so a slow answer for an old query cannot overwrite a newer one.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::providers::ProviderError;
use crate::task::{poll_task, PollResult};

/// Outcome of the latest request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested (empty query)
    Idle,
    Loading,
    Success(T),
    /// User-facing message
    Error(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Turns a provider error into the message a view shows
pub type Describe = fn(&ProviderError) -> String;

/// What a call to [`Fetch::poll`] observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPoll {
    /// Nothing outstanding for the current query
    Idle,
    /// The current request is still running
    Pending,
    /// The current request finished during this poll
    Settled,
}

struct InFlight<T> {
    seq: u64,
    handle: Option<JoinHandle<Result<T, ProviderError>>>,
}

/// One view's fetch lifecycle
pub struct Fetch<T> {
    /// Name used in logs
    label: &'static str,
    state: FetchState<T>,
    query: String,
    /// Sequence number of the latest request
    seq: u64,
    in_flight: Vec<InFlight<T>>,
    describe: Describe,
}

impl<T: Send + 'static> Fetch<T> {
    pub fn new(label: &'static str, describe: Describe) -> Self {
        Self {
            label,
            state: FetchState::Idle,
            query: String::new(),
            seq: 0,
            in_flight: Vec::new(),
            describe,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Query of the latest request
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Start a request for `query`, superseding any earlier one
    pub fn trigger<F>(&mut self, query: &str, producer: F)
    where
        F: Future<Output = Result<T, ProviderError>> + Send + 'static,
    {
        self.seq += 1;
        self.query = query.to_string();
        self.state = FetchState::Loading;

        tracing::debug!("{} request #{} for {:?}", self.label, self.seq, query);
        self.in_flight.push(InFlight {
            seq: self.seq,
            handle: Some(tokio::spawn(producer)),
        });
    }

    /// Return to `Idle`; results of earlier requests will be dropped
    pub fn clear(&mut self) {
        self.seq += 1;
        self.query.clear();
        self.state = FetchState::Idle;
    }

    /// Collect finished requests without blocking
    pub fn poll(&mut self) -> FetchPoll {
        let latest = self.seq;
        let mut settled = false;

        for flight in &mut self.in_flight {
            let PollResult::Complete(result) = poll_task(&mut flight.handle) else {
                continue;
            };

            if flight.seq != latest {
                tracing::debug!(
                    "Dropping stale {} result #{} (latest #{})",
                    self.label,
                    flight.seq,
                    latest
                );
                continue;
            }

            self.state = match result {
                Ok(Ok(data)) => FetchState::Success(data),
                Ok(Err(e)) => {
                    tracing::warn!("{} request for {:?} failed: {}", self.label, self.query, e);
                    FetchState::Error((self.describe)(&e))
                }
                Err(e) => {
                    tracing::error!("{} task panicked: {}", self.label, e);
                    FetchState::Error((self.describe)(&ProviderError::Unknown(e.to_string())))
                }
            };
            settled = true;
        }

        self.in_flight.retain(|flight| flight.handle.is_some());

        if settled {
            FetchPoll::Settled
        } else if self.state.is_loading() {
            FetchPoll::Pending
        } else {
            FetchPoll::Idle
        }
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

/// Fixed-interval wall-clock timer driven by the frame loop
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    /// `None` when the interval reaches past what `Instant` can represent
    next_due: Option<Instant>,
}

impl RefreshTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now.checked_add(interval),
        }
    }

    /// Restart the interval from `now`
    pub fn reset(&mut self, now: Instant) {
        self.next_due = now.checked_add(self.interval);
    }

    /// True once per elapsed interval
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = now.checked_add(self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due
            .map_or(Duration::MAX, |due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn describe(e: &ProviderError) -> String {
        match e {
            ProviderError::NotFound => "not found".to_string(),
            _ => "failed".to_string(),
        }
    }

    async fn poll_until<T: Send + 'static>(fetch: &mut Fetch<T>, done: impl Fn(&Fetch<T>) -> bool) {
        for _ in 0..500 {
            fetch.poll();
            if done(fetch) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!("fetch did not settle");
    }

    #[tokio::test]
    async fn test_loading_then_success() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        assert_eq!(*fetch.state(), FetchState::Idle);

        fetch.trigger("Paris", async { Ok(42) });
        assert!(fetch.state().is_loading());
        assert_eq!(fetch.query(), "Paris");

        poll_until(&mut fetch, |f| !f.state().is_loading()).await;
        assert_eq!(*fetch.state(), FetchState::Success(42));
        assert_eq!(fetch.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_error_is_described() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        fetch.trigger("Atlantis", async { Err(ProviderError::NotFound) });

        poll_until(&mut fetch, |f| !f.state().is_loading()).await;
        assert_eq!(fetch.state().error(), Some("not found"));
    }

    #[tokio::test]
    async fn test_retrigger_clears_previous_result() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        fetch.trigger("a", async { Ok(1) });
        poll_until(&mut fetch, |f| !f.state().is_loading()).await;

        let (_tx, rx) = oneshot::channel::<u32>();
        fetch.trigger("b", async move { rx.await.map_err(|e| ProviderError::Unknown(e.to_string())) });
        assert_eq!(*fetch.state(), FetchState::Loading);
        assert_eq!(fetch.state().data(), None);
    }

    #[tokio::test]
    async fn test_stale_result_is_dropped() {
        let mut fetch: Fetch<&'static str> = Fetch::new("test", describe);
        let (old_tx, old_rx) = oneshot::channel::<&'static str>();
        let (new_tx, new_rx) = oneshot::channel::<&'static str>();

        fetch.trigger("Par", async move { old_rx.await.map_err(|_| ProviderError::NotFound) });
        fetch.trigger("Paris", async move { new_rx.await.map_err(|_| ProviderError::NotFound) });
        assert_eq!(fetch.in_flight(), 2);

        new_tx.send("paris data").unwrap();
        poll_until(&mut fetch, |f| !f.state().is_loading()).await;
        assert_eq!(*fetch.state(), FetchState::Success("paris data"));

        // The older request finishes last and must not win.
        old_tx.send("par data").unwrap();
        poll_until(&mut fetch, |f| f.in_flight() == 0).await;
        assert_eq!(*fetch.state(), FetchState::Success("paris data"));
    }

    #[tokio::test]
    async fn test_clear_drops_outstanding_result() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        let (tx, rx) = oneshot::channel::<u32>();
        fetch.trigger("Oslo", async move { rx.await.map_err(|_| ProviderError::NotFound) });

        fetch.clear();
        assert_eq!(*fetch.state(), FetchState::Idle);
        assert_eq!(fetch.query(), "");

        tx.send(5).unwrap();
        poll_until(&mut fetch, |f| f.in_flight() == 0).await;
        assert_eq!(*fetch.state(), FetchState::Idle);
    }

    #[tokio::test]
    async fn test_panicked_task_becomes_error() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        let explode = true;
        fetch.trigger("x", async move {
            if explode {
                panic!("provider blew up");
            }
            Ok(0)
        });

        poll_until(&mut fetch, |f| !f.state().is_loading()).await;
        assert_eq!(fetch.state().error(), Some("failed"));
    }

    #[tokio::test]
    async fn test_poll_reports_progress() {
        let mut fetch: Fetch<u32> = Fetch::new("test", describe);
        assert_eq!(fetch.poll(), FetchPoll::Idle);

        let (tx, rx) = oneshot::channel::<u32>();
        fetch.trigger("x", async move { rx.await.map_err(|_| ProviderError::NotFound) });
        assert_eq!(fetch.poll(), FetchPoll::Pending);

        tx.send(3).unwrap();
        let mut observed = FetchPoll::Pending;
        for _ in 0..500 {
            observed = fetch.poll();
            if observed != FetchPoll::Pending {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        assert_eq!(observed, FetchPoll::Settled);
        assert_eq!(fetch.poll(), FetchPoll::Idle);
    }

    #[test]
    fn test_refresh_timer() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_secs(300), start);

        assert!(!timer.tick(start + Duration::from_secs(299)));
        assert_eq!(timer.remaining(start + Duration::from_secs(200)), Duration::from_secs(100));
        assert!(timer.tick(start + Duration::from_secs(300)));
        // Fires once per interval
        assert!(!timer.tick(start + Duration::from_secs(301)));
        assert!(timer.tick(start + Duration::from_secs(600)));

        timer.reset(start + Duration::from_secs(650));
        assert!(!timer.tick(start + Duration::from_secs(900)));
        assert!(timer.tick(start + Duration::from_secs(950)));
    }

    #[test]
    fn test_unrepresentable_interval_never_fires() {
        let start = Instant::now();
        let mut timer = RefreshTimer::new(Duration::MAX, start);

        assert!(!timer.tick(start + Duration::from_secs(86_400)));
        assert_eq!(timer.remaining(start), Duration::MAX);
        timer.reset(start + Duration::from_secs(1));
        assert!(!timer.tick(start + Duration::from_secs(2)));
    }
}
