#[cfg(test)]
#[path = "scheduler_test.rs"]
mod tests;

use std::time::Duration;

use tokio::time;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// An advance to the next word that fires once `deadline` passes unless it
/// gets cancelled first. Clones share the same cancellation token.
#[derive(Clone, Debug)]
pub struct ScheduledAdvance {
    deadline: Instant,
    token: CancellationToken,
}

impl ScheduledAdvance {
    pub fn after(delay: Duration) -> ScheduledAdvance {
        return ScheduledAdvance {
            deadline: Instant::now() + delay,
            token: CancellationToken::new(),
        };
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        return self.token.is_cancelled();
    }

    /// Resolves to true once the deadline passed, or false as soon as the
    /// advance is cancelled.
    pub async fn wait(&self) -> bool {
        tokio::select! {
            _ = self.token.cancelled() => {
                return false;
            }
            _ = time::sleep_until(self.deadline) => {
                return !self.token.is_cancelled();
            }
        }
    }
}
