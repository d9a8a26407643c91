use std::sync::atomic::{AtomicU64, Ordering};

/// Last-request-wins guard for overlapping fetches.
///
/// A filter change triggers a new fetch while an older one may still be in
/// flight; a slow stale response must not overwrite fresher data. Callers
/// take a token from [`begin`](Self::begin) before sending the request and
/// apply the result only if [`is_current`](Self::is_current) still holds.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    current: AtomicU64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new fetch generation, invalidating all earlier tokens.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer fetch has begun since `token` was taken.
    pub fn is_current(&self, token: u64) -> bool {
        self.current.load(Ordering::SeqCst) == token
    }
}
