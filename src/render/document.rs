//! In-memory page model and the surface capability patches are applied to.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use super::{Card, DocumentPatch, PatchOp};
use crate::models::{NewVideoRequest, SortOrder};

/// Something that can display the board: a browser DOM, a terminal, a test double.
pub trait Surface: Send + Sync {
    /// Apply a patch as one unit.
    fn apply(&self, patch: DocumentPatch);

    /// Current contents of the new-request form.
    fn form_data(&self) -> NewVideoRequest;
}

/// State of the page: list container, form and sort toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub cards: Vec<Card>,
    pub submit_enabled: bool,
    pub active_sort: SortOrder,
    pub form: NewVideoRequest,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            cards: Vec::new(),
            submit_enabled: true,
            active_sort: SortOrder::default(),
            form: NewVideoRequest::default(),
        }
    }
}

impl Document {
    pub fn apply(&mut self, patch: &DocumentPatch) {
        for op in &patch.ops {
            match op {
                PatchOp::ClearList => self.cards.clear(),
                PatchOp::AppendCards(cards) => self.cards.extend(cards.iter().cloned()),
                PatchOp::PrependCards(cards) => {
                    self.cards.splice(0..0, cards.iter().cloned());
                }
                PatchOp::SetVoteCount { card_id, count } => {
                    match self.cards.iter_mut().find(|c| &c.dom_id == card_id) {
                        Some(card) => card.vote_count = *count,
                        None => tracing::debug!("No card {} for vote update", card_id),
                    }
                }
                PatchOp::SetSubmitEnabled(enabled) => self.submit_enabled = *enabled,
                PatchOp::ResetForm => self.form = NewVideoRequest::default(),
                PatchOp::SetActiveSort(order) => self.active_sort = *order,
            }
        }
    }

    pub fn card(&self, record_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.record_id == record_id)
    }

    pub fn record_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.record_id.as_str()).collect()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toggle = |order: SortOrder| if self.active_sort == order { "[x]" } else { "[ ]" };
        writeln!(
            f,
            "{} newest  {} top voted",
            toggle(SortOrder::ServerOrder),
            toggle(SortOrder::TopVotedFirst)
        )?;
        if self.cards.is_empty() {
            return writeln!(f, "(no video requests)");
        }
        for card in &self.cards {
            writeln!(f, "{:>4}  {} [{}]", card.vote_count, card.title, card.record_id)?;
            writeln!(f, "      {}", card.details)?;
            if !card.expected_result_hidden {
                writeln!(f, "      expected: {}", card.expected_result)?;
            }
            writeln!(
                f,
                "      {} | {} | {} | {}",
                card.status, card.level, card.author, card.date
            )?;
        }
        Ok(())
    }
}

/// Surface backed by a [`Document`] held in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    document: Mutex<Document>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current page state.
    pub fn snapshot(&self) -> Document {
        self.lock().clone()
    }

    /// Type into the new-request form.
    pub fn fill_form(&self, form: NewVideoRequest) {
        self.lock().form = form;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn apply(&self, patch: DocumentPatch) {
        self.lock().apply(&patch);
    }

    fn form_data(&self) -> NewVideoRequest {
        self.lock().form.clone()
    }
}
