use serde::{Deserialize, Serialize};

/// A one-shot action that fires once its delay has elapsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deferred<A> {
    pub action: A,
    pub remaining: f32,
}

impl<A> Deferred<A> {
    pub fn new(action: A, delay_secs: f32) -> Self {
        Self {
            action,
            remaining: delay_secs,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
    }

    pub fn is_due(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Pending one-shot actions, advanced by frame time.
///
/// Timers are never cancelled individually; `clear` drops all of them when
/// the owning session is torn down or reinitialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "A: Serialize", deserialize = "A: Deserialize<'de>"))]
pub struct DeferredQueue<A> {
    pending: Vec<Deferred<A>>,
}

impl<A> DeferredQueue<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, action: A, delay_secs: f32) {
        self.pending.push(Deferred::new(action, delay_secs));
    }

    /// Advance every timer by `dt` and return the actions that came due,
    /// in the order they were scheduled.
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for timer in &mut self.pending {
            timer.tick(dt);
        }

        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(Deferred::is_due);
        self.pending = waiting;
        due.into_iter().map(|d| d.action).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<A> Default for DeferredQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}
