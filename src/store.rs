//! In-memory highlight collection.
//!
//! The store owns the ordered sequence for the lifetime of the process and is
//! handed to request handlers through `AppState`. Each operation takes the lock
//! once, so a single call is atomic, but nothing coordinates calls from
//! different clients: a reorder built from a stale list wins over a delete that
//! landed in between. There is no version token.

use serde::Deserialize;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::model::Highlight;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Monotonic counter, never reuses an id.
    #[default]
    Counter,
    /// `len + 1`. Collides with an existing id after any delete.
    Length,
}

struct Inner {
    highlights: Vec<Highlight>,
    /// `None` once a numeric id of `u64::MAX` has been seen or handed out.
    next_id: Option<u64>,
    spill_seq: u64,
}

impl Inner {
    fn bump_past(&mut self, highlights: &[Highlight]) {
        let max = highlights
            .iter()
            .filter_map(|h| h.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_id = match (self.next_id, max.checked_add(1)) {
            (Some(next), Some(past)) => Some(next.max(past)),
            _ => None,
        };
    }

    fn next_counter_id(&mut self) -> String {
        if let Some(id) = self.next_id {
            self.next_id = id.checked_add(1);
            return id.to_string();
        }

        // Numeric space is used up; fall back to ids that never parse as u64.
        loop {
            self.spill_seq += 1;
            let candidate = format!("x{}", self.spill_seq);
            if !self.highlights.iter().any(|h| h.id == candidate) {
                return candidate;
            }
        }
    }
}

pub struct HighlightStore {
    inner: Mutex<Inner>,
    id_policy: IdPolicy,
}

impl HighlightStore {
    pub fn new(highlights: Vec<Highlight>, id_policy: IdPolicy) -> Self {
        let mut inner = Inner {
            highlights: Vec::new(),
            next_id: Some(1),
            spill_seq: 0,
        };
        inner.bump_past(&highlights);
        inner.highlights = highlights;

        Self {
            inner: Mutex::new(inner),
            id_policy,
        }
    }

    pub fn empty(id_policy: IdPolicy) -> Self {
        Self::new(Vec::new(), id_policy)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    pub fn list(&self) -> Result<Vec<Highlight>, StoreError> {
        Ok(self.lock()?.highlights.clone())
    }

    pub fn add(&self, text: String) -> Result<Highlight, StoreError> {
        let mut inner = self.lock()?;
        let id = match self.id_policy {
            IdPolicy::Counter => inner.next_counter_id(),
            IdPolicy::Length => (inner.highlights.len() + 1).to_string(),
        };

        let highlight = Highlight { id, text };
        inner.highlights.push(highlight.clone());
        tracing::info!(id = %highlight.id, "added highlight");
        Ok(highlight)
    }

    pub fn update(&self, id: &str, text: String) -> Result<Highlight, StoreError> {
        let mut inner = self.lock()?;
        let Some(highlight) = inner.highlights.iter_mut().find(|h| h.id == id) else {
            tracing::warn!(id, "highlight not found for update");
            return Err(StoreError::NotFound(id.to_string()));
        };

        highlight.text = text;
        tracing::info!(id, "updated highlight");
        Ok(highlight.clone())
    }

    /// Removes every record with `id`. Absent ids are not an error.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.highlights.len();
        inner.highlights.retain(|h| h.id != id);
        tracing::info!(id, removed = before - inner.highlights.len(), "deleted highlight");
        Ok(())
    }

    /// Replaces the stored sequence verbatim. The input is not checked against
    /// the current records; it may add, drop or repeat entries.
    pub fn reorder(&self, highlights: Vec<Highlight>) -> Result<Vec<Highlight>, StoreError> {
        let mut inner = self.lock()?;
        inner.bump_past(&highlights);
        inner.highlights = highlights;
        tracing::info!(count = inner.highlights.len(), "reordered highlights");
        Ok(inner.highlights.clone())
    }
}
