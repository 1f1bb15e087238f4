use crate::api::types::SessionId;

/// A signal waiting for its delay to run out.
#[derive(Debug, Clone)]
struct Pending<T> {
    session: SessionId,
    remaining: f32,
    signal: T,
}

/// Delayed callbacks driven by frame time.
///
/// Each entry remembers the session that scheduled it. Firing does not check
/// the session; the receiver compares the returned id against its current one
/// and ignores stale signals instead of relying on cancellation.
#[derive(Debug, Clone)]
pub struct DelayedSignals<T> {
    pending: Vec<Pending<T>>,
}

impl<T> DelayedSignals<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(4),
        }
    }

    /// Schedule `signal` to fire after `delay` seconds.
    pub fn schedule(&mut self, session: SessionId, delay: f32, signal: T) {
        self.pending.push(Pending {
            session,
            remaining: delay.max(0.0),
            signal,
        });
    }

    /// Advance time by `dt` seconds. Returns the signals that came due, in
    /// the order they were scheduled.
    pub fn tick(&mut self, dt: f32) -> Vec<(SessionId, T)> {
        let mut fired = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for mut entry in self.pending.drain(..) {
            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                fired.push((entry.session, entry.signal));
            } else {
                waiting.push(entry);
            }
        }
        self.pending = waiting;
        fired
    }

    /// Number of signals still waiting.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for DelayedSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}
