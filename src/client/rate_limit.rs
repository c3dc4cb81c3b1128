//! Request scheduling for the GitHub API
//!
//! Every outgoing request goes through a FIFO queue. A submission that finds
//! the queue empty is dispatched at once; otherwise its dispatch is delayed by
//! `(depth - 1) × interval`, where `depth` is the queue length right after the
//! enqueue. The delay is fixed at enqueue time and never recomputed.
//!
//! A dispatch always pops the queue head, so requests leave in submission
//! order even if the timers fire out of order. Each dispatch then passes a
//! governor gate allowing one request per interval.

use std::collections::VecDeque;
use std::future::Future;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use tokio::sync::oneshot;

use crate::error::{ApiError, TransportError};

/// Default spacing between dispatched requests
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

/// One operation waiting for its turn
struct QueueSlot {
    id: u64,
    enqueued_at: Instant,
    run: BoxFuture<'static, ()>,
}

#[derive(Default)]
struct QueueState {
    slots: VecDeque<QueueSlot>,
    next_id: u64,
}

struct SchedulerInner {
    interval: Duration,
    queue: Mutex<QueueState>,
    /// Serializes gate waiters in pop order; tokio's mutex is fair.
    lane: tokio::sync::Mutex<()>,
    gate: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// FIFO scheduler spacing requests by a fixed interval.
///
/// Cloning is cheap and clones share the same queue.
#[derive(Clone)]
pub struct RateLimitedScheduler {
    inner: Arc<SchedulerInner>,
}

impl Default for RateLimitedScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl RateLimitedScheduler {
    /// Create a scheduler. A zero interval disables spacing entirely.
    pub fn new(interval: Duration) -> Self {
        let gate = Quota::with_period(interval)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));

        Self {
            inner: Arc::new(SchedulerInner {
                interval,
                queue: Mutex::new(QueueState::default()),
                lane: tokio::sync::Mutex::new(()),
                gate,
            }),
        }
    }

    /// Spacing between dispatches.
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Number of operations enqueued but not yet dispatched.
    pub fn pending(&self) -> usize {
        self.inner.queue().slots.len()
    }

    /// Queue `operation` and resolve with its classified result.
    ///
    /// The operation is not retried. Must be called within a tokio runtime.
    pub async fn submit<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, TransportError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let run: BoxFuture<'static, ()> = Box::pin(async move {
            let result = operation.await.map_err(|err| {
                let classified = ApiError::classify(&err);
                debug!("Request failed ({}), classified as {:?}", err, classified);
                classified
            });
            // The submitter may have gone away; nothing else wants the result.
            let _ = tx.send(result);
        });

        let (id, depth) = self.inner.enqueue(run);
        let delay = self
            .inner
            .interval
            .saturating_mul(u32::try_from(depth - 1).unwrap_or(u32::MAX));
        debug!(
            "Enqueued request #{} at depth {}, dispatch in {:?}",
            id, depth, delay
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            inner.dispatch_next().await;
        });

        rx.await.unwrap_or(Err(ApiError::RequestFailed))
    }
}

impl SchedulerInner {
    fn queue(&self) -> MutexGuard<'_, QueueState> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a slot, returning its id and the queue depth including it.
    fn enqueue(&self, run: BoxFuture<'static, ()>) -> (u64, usize) {
        let mut queue = self.queue();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.slots.push_back(QueueSlot {
            id,
            enqueued_at: Instant::now(),
            run,
        });
        (id, queue.slots.len())
    }

    /// Pop the queue head, wait for the gate and run it.
    async fn dispatch_next(&self) {
        let lane = self.lane.lock().await;

        let next = self.queue().slots.pop_front();
        let Some(slot) = next else {
            debug!("Dispatch found an empty queue");
            return;
        };

        if let Some(gate) = &self.gate {
            gate.until_ready().await;
        }
        drop(lane);

        debug!(
            "Dispatching request #{} after {:?} in queue",
            slot.id,
            slot.enqueued_at.elapsed()
        );
        slot.run.await;
    }
}
