//! In-flight submission latch. At most one submission per applicant email is
//! allowed to reach the contact service at a time.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct SubmissionLatch {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// Held for the duration of one submission; releases the latch on drop,
/// whichever way the submission ended.
#[derive(Debug)]
pub struct LatchGuard {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SubmissionLatch {
    /// Returns `None` when a submission for the same email is already in flight.
    pub fn try_acquire(&self, email: &str) -> Option<LatchGuard> {
        let key = normalize(email);
        if !lock(&self.in_flight).insert(key.clone()) {
            return None;
        }

        Some(LatchGuard {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }
}

#[cfg(test)]
impl SubmissionLatch {
    pub fn is_held(&self, email: &str) -> bool {
        lock(&self.in_flight).contains(&normalize(email))
    }
}

impl Drop for LatchGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.key);
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

// A panic while holding the set cannot leave it half-updated, so a poisoned lock is still usable.
fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}
