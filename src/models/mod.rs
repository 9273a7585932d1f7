//! Data models for the video request board.
//!
//! Records mirror the JSON of the video request API; the view query is client-only.

mod query;
mod request;

pub use query::*;
pub use request::*;
