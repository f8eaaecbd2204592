use crate::Result;
use core::sync::atomic::{AtomicU64, Ordering};
use core::time::Duration;
use ohno::IntoAppError;
use tokio::sync::{Semaphore, SemaphorePermit};
use tokio::time::Instant;

/// Gate in front of the gateway: a fixed number of request slots plus a shared back-off deadline.
///
/// A 429 from the gateway moves the deadline forward with [`Throttler::pause_for`]; every request
/// that starts afterwards sleeps until the deadline has passed. The deadline only ever moves
/// forward, so overlapping rate-limit responses keep the pause that ends last.
#[derive(Debug)]
pub struct Throttler {
    slots: Semaphore,
    origin: Instant,

    /// Milliseconds after `origin` at which requests may resume; zero when never paused.
    resume_after_ms: AtomicU64,
}

impl Throttler {
    /// Pauses that end within this much of the current one do not count as a new pause.
    const PAUSE_SLACK: Duration = Duration::from_secs(1);

    #[must_use]
    pub fn new(max_concurrent_requests: usize) -> Self {
        Self {
            slots: Semaphore::new(max_concurrent_requests.max(1)),
            origin: Instant::now(),
            resume_after_ms: AtomicU64::new(0),
        }
    }

    /// Wait out any pause, then take a request slot.
    ///
    /// A pause that begins while waiting for a slot is honored before the slot is handed out.
    pub async fn acquire(&self) -> Result<SemaphorePermit<'_>> {
        loop {
            while let Some(deadline) = self.pause_deadline() {
                tokio::time::sleep_until(deadline).await;
            }

            let permit = self.slots.acquire().await.into_app_err("request slots closed")?;
            if self.pause_deadline().is_none() {
                return Ok(permit);
            }
        }
    }

    /// Hold back new requests for `delay`. Returns `false` when a pause ending at least as late
    /// is already in effect.
    pub fn pause_for(&self, delay: Duration) -> bool {
        let until = self.millis_since_origin(Instant::now() + delay);
        let previous = self.resume_after_ms.fetch_max(until, Ordering::AcqRel);
        until > previous.saturating_add(millis(Self::PAUSE_SLACK))
    }

    fn pause_deadline(&self) -> Option<Instant> {
        let resume_after = self.resume_after_ms.load(Ordering::Acquire);
        let deadline = self.origin + Duration::from_millis(resume_after);
        (deadline > Instant::now()).then_some(deadline)
    }

    fn millis_since_origin(&self, at: Instant) -> u64 {
        millis(at.saturating_duration_since(self.origin))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
