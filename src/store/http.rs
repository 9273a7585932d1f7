//! Request store talking to the video request HTTP API with reqwest.

use futures::future::{BoxFuture, FutureExt};
use reqwest::{multipart, Client, Response};
use serde::Serialize;

use super::RequestStore;
use crate::config::Config;
use crate::errors::NetworkError;
use crate::models::{NewVideoRequest, VideoRequest, ViewQuery, VoteTally, VoteType};

const COLLECTION_PATH: &str = "/video-request";
const VOTE_PATH: &str = "/video-request/vote";

#[derive(Debug, Serialize)]
struct VoteBody<'a> {
    id: &'a str,
    vote_type: VoteType,
}

/// Store backed by the remote API.
#[derive(Debug, Clone)]
pub struct HttpRequestStore {
    client: Client,
    base_url: String,
}

impl HttpRequestStore {
    pub fn new(config: &Config) -> Result<Self, NetworkError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Turn a non-success response into [`NetworkError::Status`].
async fn check_status(response: Response) -> Result<Response, NetworkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NetworkError::Status {
        status: status.as_u16(),
        body,
    })
}

impl RequestStore for HttpRequestStore {
    fn list<'a>(
        &'a self,
        query: &'a ViewQuery,
    ) -> BoxFuture<'a, Result<Vec<VideoRequest>, NetworkError>> {
        async move {
            let mut request = self.client.get(self.url(COLLECTION_PATH));
            if let Some(term) = query.search() {
                request = request.query(&[("searchTerm", term)]);
            }
            tracing::debug!(search = ?query.search(), "Listing video requests");

            let response = check_status(request.send().await?).await?;
            Ok(response.json().await?)
        }
        .boxed()
    }

    fn create<'a>(
        &'a self,
        form: &'a NewVideoRequest,
    ) -> BoxFuture<'a, Result<VideoRequest, NetworkError>> {
        async move {
            let body = form
                .fields()
                .into_iter()
                .fold(multipart::Form::new(), |body, (name, value)| {
                    body.text(name, value)
                });

            let response = self
                .client
                .post(self.url(COLLECTION_PATH))
                .multipart(body)
                .send()
                .await?;
            let created: VideoRequest = check_status(response).await?.json().await?;
            tracing::debug!("Created video request {}", created.id);
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
            let response = self
                .client
                .put(self.url(VOTE_PATH))
                .json(&VoteBody { id, vote_type })
                .send()
                .await?;
            Ok(check_status(response).await?.json().await?)
        }
        .boxed()
    }
}
