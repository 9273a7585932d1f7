use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use futures::future::{BoxFuture, FutureExt};

use crate::errors::NetworkError;
use crate::models::{NewVideoRequest, VideoRequest, ViewQuery, VoteTally, VoteType};
use crate::store::RequestStore;

/// In-memory store for controller tests. Records are filtered by title and
/// list latency can be set per search term to stage racing responses.
#[derive(Default)]
pub(crate) struct MockStore {
    pub(crate) records: Mutex<Vec<VideoRequest>>,
    pub(crate) list_calls: Mutex<Vec<ViewQuery>>,
    pub(crate) create_calls: Mutex<Vec<NewVideoRequest>>,
    pub(crate) vote_calls: Mutex<Vec<(String, VoteType)>>,
    pub(crate) list_delays: Mutex<HashMap<String, Duration>>,
    pub(crate) create_delay: Mutex<Option<Duration>>,
    pub(crate) fail_status: Mutex<Option<u16>>,
}

impl MockStore {
    pub fn with_records(records: Vec<VideoRequest>) -> Self {
        MockStore {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    pub fn delay_list(&self, search_term: &str, delay: Duration) {
        self.list_delays
            .lock()
            .unwrap()
            .insert(search_term.to_string(), delay);
    }

    fn failure(&self) -> Result<(), NetworkError> {
        match *self.fail_status.lock().unwrap() {
            Some(status) => Err(NetworkError::Status {
                status,
                body: "mock failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

pub(crate) fn record(id: &str, ups: u32, downs: u32) -> VideoRequest {
    VideoRequest {
        id: id.to_string(),
        topic_title: format!("Topic {}", id),
        topic_details: format!("Details {}", id),
        expected_result: None,
        target_level: Default::default(),
        status: Default::default(),
        author_name: "mock".to_string(),
        submit_date: Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap(),
        votes: VoteTally::new(ups, downs),
    }
}

impl RequestStore for MockStore {
    fn list<'a>(
        &'a self,
        query: &'a ViewQuery,
    ) -> BoxFuture<'a, Result<Vec<VideoRequest>, NetworkError>> {
        async move {
            self.list_calls.lock().unwrap().push(query.clone());
            let delay = self
                .list_delays
                .lock()
                .unwrap()
                .get(&query.search_term)
                .copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.failure()?;

            let needle = query.search_term.to_lowercase();
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.topic_title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }
        .boxed()
    }

    fn create<'a>(
        &'a self,
        form: &'a NewVideoRequest,
    ) -> BoxFuture<'a, Result<VideoRequest, NetworkError>> {
        async move {
            self.create_calls.lock().unwrap().push(form.clone());
            let delay = *self.create_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.failure()?;

            let mut records = self.records.lock().unwrap();
            let mut created = record(&format!("new-{}", records.len() + 1), 0, 0);
            created.topic_title = form.topic_title.clone();
            created.topic_details = form.topic_details.clone();
            created.expected_result = Some(form.expected_result.clone());
            created.target_level = form.target_level;
            created.author_name = form.author_name.clone();
            records.insert(0, created.clone());
            Ok(created)
        }
        .boxed()
    }

    fn vote<'a>(
        &'a self,
        id: &'a str,
        vote_type: VoteType,
    ) -> BoxFuture<'a, Result<VoteTally, NetworkError>> {
        async move {
            self.vote_calls
                .lock()
                .unwrap()
                .push((id.to_string(), vote_type));
            self.failure()?;

            let mut records = self.records.lock().unwrap();
            let target = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| NetworkError::Status {
                    status: 404,
                    body: format!("no video request {}", id),
                })?;
            match vote_type {
                VoteType::Up => target.votes.ups += 1,
                VoteType::Down => target.votes.downs += 1,
            }
            Ok(target.votes)
        }
        .boxed()
    }
}
