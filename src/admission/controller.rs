//! Core admission controller implementation.

use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::counter::ClientCounter;
use super::decision::Decision;
use super::policy::Policy;
use crate::config::GovernorConfig;
use crate::error::Result;

/// Default tracked-client count that triggers an opportunistic eviction pass.
pub const DEFAULT_MAX_TRACKED_CLIENTS: usize = 10_000;

/// The per-client admission controller.
///
/// Owns the mapping from client identifier to window counter and applies
/// the fixed-window algorithm on every call to [`evaluate`]. Thread-safe:
/// share it via `Arc` across request-handling tasks and call it once per
/// inbound request. Counter updates for the same client serialize on the
/// map entry; distinct clients do not block each other.
///
/// [`evaluate`]: AdmissionController::evaluate
pub struct AdmissionController {
    /// The active admission policy
    policy: Policy,
    /// Per-client window counters, keyed by client identifier
    clients: DashMap<String, ClientCounter>,
    /// Registry size that triggers an opportunistic eviction pass
    max_tracked_clients: usize,
    /// Gate ensuring a single opportunistic eviction pass runs at a time
    evict_gate: Mutex<()>,
}

impl AdmissionController {
    /// Create a controller with the default tracked-client bound.
    pub fn new(policy: Policy) -> Self {
        Self::with_tracked_client_bound(policy, DEFAULT_MAX_TRACKED_CLIENTS)
    }

    /// Create a controller with an explicit tracked-client bound.
    pub fn with_tracked_client_bound(policy: Policy, max_tracked_clients: usize) -> Self {
        Self {
            policy,
            clients: DashMap::new(),
            max_tracked_clients,
            evict_gate: Mutex::new(()),
        }
    }

    /// Create a controller from configuration, validating the policy.
    pub fn from_config(config: &GovernorConfig) -> Result<Self> {
        let policy = Policy::try_from(config)?;
        Ok(Self::with_tracked_client_bound(
            policy,
            config.max_tracked_clients,
        ))
    }

    /// Apply the fixed-window algorithm to one request from `client_id`.
    ///
    /// The counter for `client_id` is fetched or created and updated as a
    /// single atomic unit: a first-seen client (or one whose window has
    /// elapsed) starts a fresh window with `count = 1`; otherwise the count
    /// is incremented first and then compared against the limit, so the
    /// limit-th request in a window is admitted and the one after it is
    /// rejected. Windows are fixed, not sliding: back-to-back bursts across
    /// a window boundary are permitted.
    ///
    /// `now` is supplied by the caller (normally `Instant::now()`), which
    /// keeps the decision pure and lets tests advance simulated time.
    pub fn evaluate(&self, client_id: &str, now: Instant) -> Decision {
        self.maybe_evict(now);

        trace!(client_id = %client_id, "Checking admission");

        let window = self.policy.window();
        let limit = self.policy.max_requests();

        let (count, elapsed) = match self.clients.entry(client_id.to_owned()) {
            Entry::Vacant(slot) => {
                debug!(
                    client_id = %client_id,
                    limit = limit,
                    "Creating new client counter"
                );
                let counter = slot.insert(ClientCounter::start(now));
                (counter.count, Duration::ZERO)
            }
            Entry::Occupied(mut slot) => {
                let counter = slot.get_mut();
                if counter.expired(now, window) {
                    debug!(client_id = %client_id, "Window elapsed, starting fresh window");
                    counter.restart(now);
                } else {
                    counter.record();
                }
                (counter.count, now.duration_since(counter.window_start))
            }
        };

        let admitted = count <= limit;
        let remaining = limit.saturating_sub(count);
        let reset_secs = (window.as_secs_f64() - elapsed.as_secs_f64()).ceil() as u64;

        if !admitted {
            debug!(
                client_id = %client_id,
                count = count,
                limit = limit,
                "Admission limit exceeded"
            );
        }

        Decision {
            admitted,
            limit,
            remaining,
            reset_secs,
            retry_after_secs: (!admitted).then(|| self.policy.retry_after_secs()),
        }
    }

    /// Remove every counter whose window had elapsed by `now`.
    ///
    /// Best-effort housekeeping: counters with an active window are never
    /// removed, so a pass can run (or be skipped) at any time without
    /// affecting admit/reject outcomes. Returns the number of entries
    /// removed.
    pub fn evict_expired(&self, now: Instant) -> usize {
        let window = self.policy.window();
        let before = self.clients.len();
        self.clients
            .retain(|_, counter| !counter.expired(now, window));

        let evicted = before.saturating_sub(self.clients.len());
        if evicted > 0 {
            debug!(
                evicted = evicted,
                remaining = self.clients.len(),
                "Evicted expired client counters"
            );
        }
        evicted
    }

    /// Run an eviction pass when the registry has outgrown its bound.
    fn maybe_evict(&self, now: Instant) {
        if self.clients.len() <= self.max_tracked_clients {
            return;
        }
        // A pass already in flight on another task covers this one too.
        if let Some(_guard) = self.evict_gate.try_lock() {
            self.evict_expired(now);
        }
    }

    /// The active admission policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    /// Current window count for a client.
    ///
    /// Returns `None` if the client is not tracked.
    pub fn current_count(&self, client_id: &str) -> Option<u64> {
        self.clients.get(client_id).map(|counter| counter.count)
    }

    /// Drop all counters.
    ///
    /// This is primarily useful for testing.
    pub fn clear(&self) {
        self.clients.clear();
    }
}
