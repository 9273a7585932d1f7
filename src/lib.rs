//! Video request board client.
//!
//! Keeps a rendered list of request cards in sync with the remote video request
//! collection while the user loads, creates, votes, sorts and searches.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod errors;
pub mod models;
pub mod render;
pub mod store;

pub use config::Config;
pub use controller::{ControllerOptions, EventSource, ListState, UiEvent, ViewController};
pub use errors::NetworkError;
pub use render::{DocumentPatch, MemorySurface, Surface};
pub use store::{HttpRequestStore, RequestStore};
