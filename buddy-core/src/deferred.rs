//! Results that become visible after a delay, unless their screen is gone.
//!
//! Every screen transition bumps a [`Generation`]. A [`Deferred`] remembers
//! the generation it was issued under and is only delivered while that
//! generation is still current; otherwise it is dropped on the next poll.

/// Monotonic counter identifying the current screen visit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    pub fn current(&self) -> u64 {
        self.0
    }

    /// Invalidate everything issued so far
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// A value that may be taken once `ready_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<T> {
    token: u64,
    ready_at: i64,
    value: T,
}

/// What polling a [`Deferred`] produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Poll<T> {
    /// Due and still current
    Ready(T),
    /// Current but not yet due
    Pending(Deferred<T>),
    /// Issued under an older generation; discarded
    Stale,
}

impl<T> Deferred<T> {
    /// Schedule `value` for `delay_ms` after `now`, under generation `token`
    pub fn schedule(generation: &Generation, now: i64, delay_ms: u64, value: T) -> Self {
        Self {
            token: generation.current(),
            ready_at: now.saturating_add(delay_ms as i64),
            value,
        }
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn ready_at(&self) -> i64 {
        self.ready_at
    }

    pub fn is_current(&self, generation: &Generation) -> bool {
        self.token == generation.current()
    }

    pub fn poll(self, generation: &Generation, now: i64) -> Poll<T> {
        if !self.is_current(generation) {
            Poll::Stale
        } else if now >= self.ready_at {
            Poll::Ready(self.value)
        } else {
            Poll::Pending(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_after_delay() {
        let generation = Generation::default();
        let deferred = Deferred::schedule(&generation, 1_000, 500, "hi");

        let deferred = match deferred.poll(&generation, 1_499) {
            Poll::Pending(d) => d,
            other => panic!("expected pending, got {:?}", other),
        };
        assert_eq!(deferred.poll(&generation, 1_500), Poll::Ready("hi"));
    }

    #[test]
    fn test_bumped_generation_discards() {
        let mut generation = Generation::default();
        let deferred = Deferred::schedule(&generation, 0, 0, 42);
        generation.bump();

        assert!(!deferred.is_current(&generation));
        assert_eq!(deferred.poll(&generation, 10), Poll::Stale);
    }
}
