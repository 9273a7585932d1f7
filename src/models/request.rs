//! Video request model matching the JSON served by the video request API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience level a requested video targets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetLevel {
    #[default]
    Beginner,
    Medium,
    Advanced,
    /// Any level this client does not know about
    #[serde(other)]
    Unknown,
}

impl TargetLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLevel::Beginner => "beginner",
            TargetLevel::Medium => "medium",
            TargetLevel::Advanced => "advanced",
            TargetLevel::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(TargetLevel::Beginner),
            "medium" => Some(TargetLevel::Medium),
            "advanced" => Some(TargetLevel::Advanced),
            _ => None,
        }
    }
}

/// Workflow status of a request, owned by the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RequestStatus {
    #[default]
    New,
    Planned,
    InProgress,
    Done,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::Planned => "planned",
            RequestStatus::InProgress => "in-progress",
            RequestStatus::Done => "done",
            RequestStatus::Unknown => "unknown",
        }
    }
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Up => "up",
            VoteType::Down => "down",
        }
    }
}

/// The {ups, downs} vote pair of a request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteTally {
    #[serde(default)]
    pub ups: u32,
    #[serde(default)]
    pub downs: u32,
}

impl VoteTally {
    pub fn new(ups: u32, downs: u32) -> Self {
        Self { ups, downs }
    }

    /// Net score shown on a card and used by the top-voted sort.
    pub fn score(&self) -> i64 {
        i64::from(self.ups) - i64::from(self.downs)
    }
}

/// A single topic request on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "WireVideoRequest")]
pub struct VideoRequest {
    pub id: String,
    pub topic_title: String,
    pub topic_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_result: Option<String>,
    pub target_level: TargetLevel,
    pub status: RequestStatus,
    pub author_name: String,
    pub submit_date: DateTime<Utc>,
    pub votes: VoteTally,
}

/// Record as sent by the server, which may carry `_id`, `id` or both.
#[derive(Deserialize)]
struct WireVideoRequest {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    topic_title: String,
    #[serde(default)]
    topic_details: String,
    #[serde(default)]
    expected_result: Option<String>,
    #[serde(default)]
    target_level: TargetLevel,
    #[serde(default)]
    status: RequestStatus,
    #[serde(default)]
    author_name: String,
    submit_date: DateTime<Utc>,
    #[serde(default)]
    votes: VoteTally,
}

impl TryFrom<WireVideoRequest> for VideoRequest {
    type Error = String;

    fn try_from(wire: WireVideoRequest) -> Result<Self, Self::Error> {
        let id = wire
            .object_id
            .or(wire.id)
            .ok_or_else(|| "video request without `_id` or `id`".to_string())?;
        Ok(Self {
            id,
            topic_title: wire.topic_title,
            topic_details: wire.topic_details,
            expected_result: wire.expected_result,
            target_level: wire.target_level,
            status: wire.status,
            author_name: wire.author_name,
            submit_date: wire.submit_date,
            votes: wire.votes,
        })
    }
}

/// Fields of the new-request form, submitted as multipart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVideoRequest {
    pub topic_title: String,
    pub topic_details: String,
    pub expected_result: String,
    pub target_level: TargetLevel,
    pub author_name: String,
}

impl NewVideoRequest {
    /// Form fields in submission order, as (name, value) pairs.
    pub fn fields(&self) -> [(&'static str, String); 5] {
        [
            ("topic_title", self.topic_title.clone()),
            ("topic_details", self.topic_details.clone()),
            ("expected_result", self.expected_result.clone()),
            ("target_level", self.target_level.as_str().to_string()),
            ("author_name", self.author_name.clone()),
        ]
    }
}
