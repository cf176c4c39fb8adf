//! Answer countdown.
//!
//! The timer is cooperative: it never sleeps or spawns. The host advances it
//! with [`ChallengeTimer::tick`] from whatever clock it has, and the timer
//! hands back a tagged timeout command once, when time runs out. Because the
//! command carries the challenge id, a timeout that races an explicit answer
//! is rejected as stale by the reducer instead of resolving the next
//! challenge.

use std::time::Duration;

use crate::core::{ChallengeId, Command};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Armed {
    challenge: ChallengeId,
    remaining: Duration,
}

/// Cancellable countdown for one challenge at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChallengeTimer {
    armed: Option<Armed>,
}

impl ChallengeTimer {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting down for `challenge`, replacing any earlier countdown.
    pub fn arm(&mut self, challenge: ChallengeId, limit: Duration) {
        log::trace!("{challenge}: countdown armed for {}s", limit.as_secs());
        self.armed = Some(Armed {
            challenge,
            remaining: limit,
        });
    }

    /// Stop the countdown without firing.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Advance by `elapsed`. Returns the timeout command on expiry, then
    /// goes idle.
    pub fn tick(&mut self, elapsed: Duration) -> Option<Command> {
        let armed = self.armed.as_mut()?;
        armed.remaining = armed.remaining.saturating_sub(elapsed);
        if !armed.remaining.is_zero() {
            return None;
        }
        let challenge = armed.challenge;
        self.armed = None;
        log::debug!("{challenge}: countdown expired");
        Some(Command::timeout(challenge))
    }

    /// Check if a countdown is running.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Challenge being timed.
    #[must_use]
    pub fn challenge(&self) -> Option<ChallengeId> {
        self.armed.map(|a| a.challenge)
    }

    /// Time left, if armed.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.armed.map(|a| a.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_on_expiry() {
        let mut timer = ChallengeTimer::new();
        let id = ChallengeId::new(4);
        timer.arm(id, Duration::from_secs(60));

        assert_eq!(timer.tick(Duration::from_secs(59)), None);
        assert_eq!(timer.remaining(), Some(Duration::from_secs(1)));

        assert_eq!(timer.tick(Duration::from_secs(5)), Some(Command::timeout(id)));
        assert!(!timer.is_armed());
        assert_eq!(timer.tick(Duration::from_secs(5)), None);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut timer = ChallengeTimer::new();
        timer.arm(ChallengeId::new(1), Duration::from_secs(10));
        timer.cancel();

        assert_eq!(timer.tick(Duration::from_secs(30)), None);
        assert_eq!(timer.challenge(), None);
    }

    #[test]
    fn test_rearm_replaces_challenge() {
        let mut timer = ChallengeTimer::new();
        timer.arm(ChallengeId::new(1), Duration::from_secs(10));
        timer.arm(ChallengeId::new(2), Duration::from_secs(10));

        assert_eq!(timer.challenge(), Some(ChallengeId::new(2)));
        assert_eq!(
            timer.tick(Duration::from_secs(10)),
            Some(Command::timeout(ChallengeId::new(2)))
        );
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut timer = ChallengeTimer::default();
        assert_eq!(timer.tick(Duration::from_secs(1)), None);
    }
}
