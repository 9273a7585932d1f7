//! Request store: access to the remote video request collection.
//!
//! The server owns the canonical records; the client only reads them and asks
//! for mutations. Failures are reported once and never retried here.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpRequestStore;

use futures::future::BoxFuture;

use crate::errors::NetworkError;
use crate::models::{NewVideoRequest, VideoRequest, ViewQuery, VoteTally, VoteType};

pub trait RequestStore: Send + Sync {
    /// Fetch the collection, filtered by the query's search term.
    ///
    /// Records come back in server order; sorting is left to the caller.
    fn list<'a>(
        &'a self,
        query: &'a ViewQuery,
    ) -> BoxFuture<'a, Result<Vec<VideoRequest>, NetworkError>>;

    /// Submit a new request. The server assigns id, date and the zero tally.
    fn create<'a>(
        &'a self,
        form: &'a NewVideoRequest,
    ) -> BoxFuture<'a, Result<VideoRequest, NetworkError>>;

    /// Cast a vote and return the updated tally.
    fn vote<'a>(
        &'a self,
        id: &'a str,
        vote_type: VoteType,
    ) -> BoxFuture<'a, Result<VoteTally, NetworkError>>;
}
