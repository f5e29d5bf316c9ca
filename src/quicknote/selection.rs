use crate::model::{sort_by_recency, Note, NoteId};

/// Which note is open, plus the active search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<NoteId>,
    query: String,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the query verbatim. Matching is case-insensitive and uses the
    /// untrimmed string.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn select(&mut self, id: NoteId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&NoteId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &NoteId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Enforce auto-select-first over `sorted`, the full collection ordered
    /// most recent first. A missing or stale selection falls back to the
    /// first note, or to nothing when the collection is empty.
    pub fn reconcile(&mut self, sorted: &[Note]) {
        let valid = self
            .selected
            .as_ref()
            .is_some_and(|id| sorted.iter().any(|n| &n.id == id));
        if !valid {
            self.selected = sorted.first().map(|n| n.id.clone());
        }
    }
}

/// Notes matching `query` in title or body, most recently updated first.
/// An empty query matches everything.
pub fn filtered_view(notes: &[Note], query: &str) -> Vec<Note> {
    let mut view: Vec<Note> = notes.iter().filter(|n| n.matches(query)).cloned().collect();
    sort_by_recency(&mut view);
    view
}
