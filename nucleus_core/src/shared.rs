//! Thread-safe handle to a [`NucleusHub`].
//!
//! Every operation takes the lock once, so a submission's registry append
//! and feed record form a single critical section.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::calculations::AdvisoryResult;
use crate::errors::NucleusResult;
use crate::hub::{EvaluateRequest, HubSnapshot, NucleusHub, SubmitRequest, SubmitResponse};

/// Cloneable, lock-protected hub.
#[derive(Debug, Clone, Default)]
pub struct SharedHub {
    inner: Arc<Mutex<NucleusHub>>,
}

impl SharedHub {
    pub fn new(hub: NucleusHub) -> Self {
        SharedHub {
            inner: Arc::new(Mutex::new(hub)),
        }
    }

    // Hub state is plain data, so a panic in another holder leaves it usable.
    fn lock(&self) -> MutexGuard<'_, NucleusHub> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn evaluate(&self, request: &EvaluateRequest) -> NucleusResult<AdvisoryResult> {
        self.lock().evaluate(request)
    }

    pub fn submit(&self, request: &SubmitRequest) -> NucleusResult<SubmitResponse> {
        self.lock().submit(request)
    }

    pub fn snapshot(&self) -> HubSnapshot {
        self.lock().snapshot()
    }

    /// Run a read-only closure against the hub while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&NucleusHub) -> R) -> R {
        f(&*self.lock())
    }
}

impl From<NucleusHub> for SharedHub {
    fn from(hub: NucleusHub) -> Self {
        SharedHub::new(hub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_concurrent_submissions_are_not_lost() {
        let shared = SharedHub::new(NucleusHub::new());
        let seeded = shared.with(|hub| hub.registry().len());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let request = SubmitRequest {
                            name: Some(format!("Sample {}-{}", t, i)),
                            strength: Some("40".into()),
                            contributor: Some(format!("worker{}", t)),
                        };
                        shared.submit(&request).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.materials.len(), seeded + 200);
        assert_eq!(snapshot.feed.len(), 200);

        let ids: HashSet<_> = snapshot.materials.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids.len(), snapshot.materials.len());
    }

    #[test]
    fn test_evaluate_through_handle() {
        let shared = SharedHub::from(NucleusHub::new());
        let result = shared.evaluate(&EvaluateRequest::for_material("bamboo")).unwrap();
        assert_eq!(result.thickness, 20.0);
    }
}
