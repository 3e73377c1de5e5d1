//! Time-based button debounce.

use heapless::LinearMap;

use crate::types::{ButtonCode, CapturedEdge};

/// How edges share debounce timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePolicy {
    /// One timestamp per code; a release soon after a press is rejected.
    SharedPerCode,
    /// Press and release of a code are timed separately.
    PerEdge,
}

/// Outcome of a debounce check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Debounce {
    Accepted,
    /// Too close to the last accepted event of the same key.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Key {
    code: ButtonCode,
    edge: Option<bool>,
}

/// Table slots that track `codes` distinct codes under either policy.
#[must_use]
pub const fn slots_for(codes: usize) -> usize {
    codes * 2
}

/// Remembers when each code was last accepted.
///
/// `N` bounds the number of tracked keys. Under [`DebouncePolicy::PerEdge`]
/// every code takes two slots. Once the table is full, untracked keys are
/// always accepted.
#[derive(Debug)]
pub struct Debouncer<const N: usize> {
    policy: DebouncePolicy,
    interval_ms: u64,
    accepted: LinearMap<Key, u64, N>,
}

impl<const N: usize> Debouncer<N> {
    #[must_use]
    pub fn new(policy: DebouncePolicy, interval_ms: u64) -> Self {
        Self {
            policy,
            interval_ms,
            accepted: LinearMap::new(),
        }
    }

    /// Accept `edge` unless an event of the same key was accepted less than
    /// the interval before it. Accepted edges become the new reference.
    pub fn check(&mut self, edge: &CapturedEdge) -> Debounce {
        let key = Key {
            code: edge.event.code,
            edge: match self.policy {
                DebouncePolicy::SharedPerCode => None,
                DebouncePolicy::PerEdge => Some(edge.event.pressed),
            },
        };

        if let Some(&last) = self.accepted.get(&key) {
            if edge.at_ms.saturating_sub(last) < self.interval_ms {
                return Debounce::Rejected;
            }
        }
        // A full table leaves the key untracked
        self.accepted.insert(key, edge.at_ms).ok();
        Debounce::Accepted
    }

    /// Forget all timestamps.
    pub fn reset(&mut self) {
        self.accepted.clear();
    }
}
