//! View query: the sort order and search term that drive a list fetch.

use std::cmp::Reverse;

use super::VideoRequest;

/// Order in which the list is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Keep the order the server returned.
    #[default]
    ServerOrder,
    /// Highest `ups - downs` first, ties kept in server order.
    TopVotedFirst,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::ServerOrder => "none",
            SortOrder::TopVotedFirst => "topVotedFirst",
        }
    }

    /// Sort records client-side. The sort is stable.
    pub fn apply(&self, mut records: Vec<VideoRequest>) -> Vec<VideoRequest> {
        if let SortOrder::TopVotedFirst = self {
            records.sort_by_key(|r| Reverse(r.votes.score()));
        }
        records
    }
}

/// Immutable description of what the list view should show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub sort_order: SortOrder,
    pub search_term: String,
}

impl ViewQuery {
    pub fn with_sort(&self, sort_order: SortOrder) -> Self {
        Self {
            sort_order,
            search_term: self.search_term.clone(),
        }
    }

    pub fn with_search_term(&self, search_term: impl Into<String>) -> Self {
        Self {
            sort_order: self.sort_order,
            search_term: search_term.into(),
        }
    }

    /// Search term to send to the server, if any.
    pub fn search(&self) -> Option<&str> {
        let term = self.search_term.as_str();
        (!term.is_empty()).then_some(term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VoteTally;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, ups: u32, downs: u32) -> VideoRequest {
        VideoRequest {
            id: id.to_string(),
            topic_title: format!("Topic {}", id),
            topic_details: String::new(),
            expected_result: None,
            target_level: Default::default(),
            status: Default::default(),
            author_name: "tester".to_string(),
            submit_date: Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap(),
            votes: VoteTally::new(ups, downs),
        }
    }

    fn ids(records: &[VideoRequest]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_top_voted_scenario() {
        let sorted = SortOrder::TopVotedFirst.apply(vec![record("1", 5, 2), record("2", 1, 0)]);
        assert_eq!(ids(&sorted), vec!["1", "2"]);

        let sorted = SortOrder::TopVotedFirst.apply(vec![record("2", 1, 0), record("1", 5, 2)]);
        assert_eq!(ids(&sorted), vec!["1", "2"]);
    }

    #[test]
    fn test_top_voted_is_descending_and_stable() {
        let input = vec![
            record("a", 1, 1),
            record("b", 4, 0),
            record("c", 0, 3),
            record("d", 2, 2),
            record("e", 5, 1),
            record("f", 3, 3),
            record("g", 4, 0),
        ];
        let sorted = SortOrder::TopVotedFirst.apply(input);

        for pair in sorted.windows(2) {
            assert!(pair[0].votes.score() >= pair[1].votes.score());
        }
        // b, e and g tie at 4; a, d and f tie at 0.
        assert_eq!(ids(&sorted), vec!["b", "e", "g", "a", "d", "f", "c"]);
    }

    #[test]
    fn test_server_order_is_identity() {
        let sorted = SortOrder::ServerOrder.apply(vec![record("2", 0, 0), record("1", 9, 0)]);
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }

    #[test]
    fn test_query_builders_keep_other_half() {
        let query = ViewQuery::default()
            .with_search_term("cat")
            .with_sort(SortOrder::TopVotedFirst);
        assert_eq!(query.search(), Some("cat"));
        assert_eq!(query.sort_order, SortOrder::TopVotedFirst);

        let cleared = query.with_search_term("");
        assert_eq!(cleared.search(), None);
        assert_eq!(cleared.sort_order, SortOrder::TopVotedFirst);
    }
}
