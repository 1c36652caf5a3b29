//! Consent grant store.

use std::collections::VecDeque;

use crate::models::{AccessMode, ConsentGrant, NewConsentGrant};

/// Ordered collection of live consent grants, newest first.
#[derive(Debug, Clone, Default)]
pub struct ConsentStore {
    grants: VecDeque<ConsentGrant>,
}

impl ConsentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from grants already ordered newest first.
    pub fn from_grants(grants: Vec<ConsentGrant>) -> Self {
        Self {
            grants: grants.into(),
        }
    }

    /// Create an active grant with a fresh id and insert it at the front.
    pub fn grant(&mut self, new_grant: NewConsentGrant) -> &ConsentGrant {
        let id = self.next_id();
        self.grants.push_front(new_grant.into_grant(id));
        &self.grants[0]
    }

    /// Remove every grant with the given id. Returns the newest removed
    /// grant, or `None` if absent.
    ///
    /// The remaining grants keep their relative order.
    pub fn revoke(&mut self, id: &str) -> Option<ConsentGrant> {
        let removed = self.get(id).cloned()?;
        self.grants.retain(|g| g.id != id);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ConsentGrant> {
        self.grants.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ConsentGrant> {
        self.grants.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Grants with the given access mode, newest first.
    pub fn by_mode(&self, mode: AccessMode) -> Vec<&ConsentGrant> {
        self.grants.iter().filter(|g| g.mode == mode).collect()
    }

    /// Owned copy of all grants, newest first.
    pub fn to_vec(&self) -> Vec<ConsentGrant> {
        self.grants.iter().cloned().collect()
    }

    /// Generate an id not held by any live grant.
    fn next_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
