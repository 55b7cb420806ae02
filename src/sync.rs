//! Client-side mirror of the highlight collection.
//!
//! Edits and reorders are applied locally first and pushed to the server in a
//! spawned task; a failed push is logged and the local state stays as it is
//! until the next `load`. Add and delete wait for the server before touching
//! local state.

use tokio::task::JoinHandle;

use crate::client::HighlightsApi;
use crate::model::Highlight;

pub const PLACEHOLDER_TEXT: &str = "New highlight text";

/// Moves the element at `from` to `to`, shifting the ones in between.
/// Returns false and leaves `items` untouched if either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

pub struct SyncClient {
    api: HighlightsApi,
    highlights: Vec<Highlight>,
}

impl SyncClient {
    pub fn new(api: HighlightsApi) -> Self {
        Self {
            api,
            highlights: Vec::new(),
        }
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Replaces local state with the server's list. Returns false on failure,
    /// in which case local state is unchanged.
    pub async fn load(&mut self) -> bool {
        match self.api.list().await {
            Ok(highlights) => {
                tracing::debug!(count = highlights.len(), "loaded highlights");
                self.highlights = highlights;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching highlights: {}", e);
                false
            }
        }
    }

    /// Creates a placeholder highlight on the server and appends whatever the
    /// server returned.
    pub async fn add_local(&mut self) -> Option<Highlight> {
        match self.api.add(PLACEHOLDER_TEXT).await {
            Ok(highlight) => {
                self.highlights.push(highlight.clone());
                Some(highlight)
            }
            Err(e) => {
                tracing::error!("Error adding highlight: {}", e);
                None
            }
        }
    }

    /// Optimistic: local text changes now, the update is sent in the background.
    pub fn edit_local(&mut self, id: &str, text: &str) -> JoinHandle<()> {
        for highlight in self.highlights.iter_mut().filter(|h| h.id == id) {
            highlight.text = text.to_string();
        }

        let api = self.api.clone();
        let id = id.to_string();
        let text = text.to_string();
        tokio::spawn(async move {
            if let Err(e) = api.update(&id, &text).await {
                tracing::error!("Error updating highlight {}: {}", id, e);
            }
        })
    }

    /// Removes the record locally only once the server has confirmed.
    pub async fn delete_local(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(()) => {
                self.highlights.retain(|h| h.id != id);
                true
            }
            Err(e) => {
                tracing::error!("Error deleting highlight {}: {}", id, e);
                false
            }
        }
    }

    /// Moves one item and pushes the complete resulting order. Returns `None`
    /// without sending anything when the move is out of range or a no-op.
    pub fn reorder_local(&mut self, from: usize, to: usize) -> Option<JoinHandle<()>> {
        if from == to || !move_item(&mut self.highlights, from, to) {
            return None;
        }

        let api = self.api.clone();
        let reordered = self.highlights.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = api.reorder(reordered).await {
                tracing::error!("Error reordering highlights: {}", e);
            }
        }))
    }

    /// Drops `active_id` onto the position currently held by `over_id`.
    pub fn reorder_by_id(&mut self, active_id: &str, over_id: &str) -> Option<JoinHandle<()>> {
        if active_id == over_id {
            return None;
        }
        let from = self.position(active_id)?;
        let to = self.position(over_id)?;
        self.reorder_local(from, to)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.highlights.iter().position(|h| h.id == id)
    }
}
