//! Card rendering.
//!
//! Rendering is pure: records become [`Card`]s and list updates are expressed as a
//! [`DocumentPatch`]. A [`Surface`] decides what applying a patch means; the
//! in-memory [`Document`] is the reference interpretation.

mod document;

pub use document::*;

use crate::models::{SortOrder, VideoRequest, VoteTally, VoteType};

/// Prefix of the DOM id of a card.
pub const CARD_ID_PREFIX: &str = "video-request-";
const VOTE_UP_PREFIX: &str = "votes_ups_";
const VOTE_DOWN_PREFIX: &str = "votes_downs_";
const DATE_FORMAT: &str = "%a %b %d %Y";

/// DOM id of the card showing a record.
pub fn card_dom_id(record_id: &str) -> String {
    format!("{}{}", CARD_ID_PREFIX, record_id)
}

/// DOM id of a vote control on a record's card.
pub fn vote_control_id(record_id: &str, vote_type: VoteType) -> String {
    match vote_type {
        VoteType::Up => format!("{}{}", VOTE_UP_PREFIX, record_id),
        VoteType::Down => format!("{}{}", VOTE_DOWN_PREFIX, record_id),
    }
}

/// Map a clicked element id back to the record and vote direction.
///
/// Returns `None` for anything that is not a vote control.
pub fn parse_vote_control(element_id: &str) -> Option<(String, VoteType)> {
    let (record_id, vote_type) = if let Some(id) = element_id.strip_prefix(VOTE_UP_PREFIX) {
        (id, VoteType::Up)
    } else if let Some(id) = element_id.strip_prefix(VOTE_DOWN_PREFIX) {
        (id, VoteType::Down)
    } else {
        return None;
    };
    (!record_id.is_empty()).then(|| (record_id.to_string(), vote_type))
}

/// Rendered form of one video request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub dom_id: String,
    pub record_id: String,
    pub title: String,
    pub details: String,
    pub expected_result: String,
    pub expected_result_hidden: bool,
    pub status: String,
    pub author: String,
    pub date: String,
    pub level: String,
    pub vote_count: i64,
}

impl Card {
    pub fn from_record(record: &VideoRequest) -> Self {
        let expected_result = record.expected_result.clone().unwrap_or_default();
        Self {
            dom_id: card_dom_id(&record.id),
            record_id: record.id.clone(),
            title: record.topic_title.clone(),
            details: record.topic_details.clone(),
            expected_result_hidden: expected_result.is_empty(),
            expected_result,
            status: record.status.as_str().to_uppercase(),
            author: record.author_name.clone(),
            date: record.submit_date.format(DATE_FORMAT).to_string(),
            level: record.target_level.as_str().to_string(),
            vote_count: record.votes.score(),
        }
    }
}

/// A single mutation of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOp {
    /// Remove every card from the list container
    ClearList,
    /// Insert a batch of cards at the end of the list, in order
    AppendCards(Vec<Card>),
    /// Insert a batch of cards at the top of the list, in order
    PrependCards(Vec<Card>),
    /// Replace the vote count text of one card
    SetVoteCount { card_id: String, count: i64 },
    SetSubmitEnabled(bool),
    /// Clear the new-request form fields
    ResetForm,
    /// Mark one sort toggle active and its sibling inactive
    SetActiveSort(SortOrder),
}

/// Ordered list of page mutations, applied as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub ops: Vec<PatchOp>,
}

impl DocumentPatch {
    pub fn single(op: PatchOp) -> Self {
        Self { ops: vec![op] }
    }

    pub fn push(&mut self, op: PatchOp) {
        self.ops.push(op);
    }

    /// Whether applying this patch changes the card list.
    pub fn touches_list(&self) -> bool {
        self.ops.iter().any(|op| {
            matches!(
                op,
                PatchOp::ClearList
                    | PatchOp::AppendCards(_)
                    | PatchOp::PrependCards(_)
                    | PatchOp::SetVoteCount { .. }
            )
        })
    }
}

/// Render records into the list.
///
/// With `reset_list` the list is cleared and the records appended in the given
/// order; otherwise they are prepended as one batch ahead of the existing cards.
pub fn render(records: &[VideoRequest], reset_list: bool) -> DocumentPatch {
    let cards: Vec<Card> = records.iter().map(Card::from_record).collect();
    if reset_list {
        DocumentPatch {
            ops: vec![PatchOp::ClearList, PatchOp::AppendCards(cards)],
        }
    } else {
        DocumentPatch::single(PatchOp::PrependCards(cards))
    }
}

/// Update only the vote count of one card.
pub fn vote_update(card_id: &str, tally: &VoteTally) -> DocumentPatch {
    DocumentPatch::single(PatchOp::SetVoteCount {
        card_id: card_id.to_string(),
        count: tally.score(),
    })
}
