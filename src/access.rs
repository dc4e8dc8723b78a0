//! In-memory registry of access applications.
//!
//! State is process-local and lost on restart; the original deployment never
//! persisted it either.

use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("You already have a request pending.")]
    AlreadyPending,
}

#[derive(Debug, Default)]
pub struct AccessRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    pending: Vec<u64>,
    approved: Vec<u64>,
}

impl AccessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new application. Only a pending application blocks
    /// re-submission; approved or denied users may apply again.
    pub fn submit(&self, userid: u64) -> Result<(), AccessError> {
        let mut inner = self.lock();
        if inner.pending.contains(&userid) {
            return Err(AccessError::AlreadyPending);
        }
        inner.pending.push(userid);
        Ok(())
    }

    /// Move a pending application to approved. Returns `false` when the user
    /// had no pending application.
    pub fn approve(&self, userid: u64) -> bool {
        let mut inner = self.lock();
        if !remove(&mut inner.pending, userid) {
            return false;
        }
        inner.approved.push(userid);
        true
    }

    /// Discard a pending application. Returns `false` when the user had no
    /// pending application.
    pub fn deny(&self, userid: u64) -> bool {
        let mut inner = self.lock();
        remove(&mut inner.pending, userid)
    }

    pub fn is_approved(&self, userid: u64) -> bool {
        self.lock().approved.contains(&userid)
    }

    pub fn pending_count(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn approved_count(&self) -> usize {
        self.lock().approved.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        self.inner.lock().expect("registry mutex poisoned")
    }
}

fn remove(ids: &mut Vec<u64>, userid: u64) -> bool {
    match ids.iter().position(|&id| id == userid) {
        Some(index) => {
            ids.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_duplicate() {
        let registry = AccessRegistry::new();
        assert_eq!(registry.submit(42), Ok(()));
        assert_eq!(registry.submit(42), Err(AccessError::AlreadyPending));
        assert_eq!(registry.pending_count(), 1);
    }

    #[test]
    fn test_approve_moves_pending_to_approved() {
        let registry = AccessRegistry::new();
        registry.submit(42).unwrap();

        assert!(registry.approve(42));
        assert!(registry.is_approved(42));
        assert_eq!(registry.pending_count(), 0);
        assert_eq!(registry.approved_count(), 1);

        // Not pending anymore.
        assert!(!registry.approve(42));
    }

    #[test]
    fn test_deny_discards_pending() {
        let registry = AccessRegistry::new();
        registry.submit(42).unwrap();

        assert!(registry.deny(42));
        assert!(!registry.is_approved(42));
        assert_eq!(registry.pending_count(), 0);

        assert!(!registry.deny(42));
    }

    #[test]
    fn test_approved_user_may_apply_again() {
        let registry = AccessRegistry::new();
        registry.submit(42).unwrap();
        registry.approve(42);

        assert_eq!(registry.submit(42), Ok(()));
    }
}
