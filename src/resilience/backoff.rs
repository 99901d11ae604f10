//! Poll interval with jitter, and the delay capability used between polls.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Something that can suspend the caller for a while.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer for the requested duration plus up to 10% jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        let jittered = with_jitter(duration);
        tracing::trace!(delay_ms = jittered.as_millis() as u64, "Sleeping before next poll");
        tokio::time::sleep(jittered).await;
    }
}

/// Add 0 to 10% jitter on top of `base`.
pub fn with_jitter(base: Duration) -> Duration {
    let base_ms = base.as_millis() as u64;
    let jitter_range = base_ms / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(base_ms + jitter)
}
