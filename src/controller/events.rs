//! UI events and the sources that deliver them.

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::mpsc;

use crate::models::SortOrder;

/// Something the user did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The new-request form was submitted
    Submit,
    /// A click somewhere inside the list container
    ListClick { target_id: String },
    /// One of the two sort toggles was clicked
    SortClick(SortOrder),
    /// The search input changed to this value
    SearchInput(String),
    /// Explicit reload of the list with the current query
    Refresh,
}

/// Source of UI events. `None` means the page is gone.
pub trait EventSource: Send {
    fn next_event(&mut self) -> BoxFuture<'_, Option<UiEvent>>;
}

impl EventSource for mpsc::UnboundedReceiver<UiEvent> {
    fn next_event(&mut self) -> BoxFuture<'_, Option<UiEvent>> {
        self.recv().boxed()
    }
}

impl EventSource for mpsc::Receiver<UiEvent> {
    fn next_event(&mut self) -> BoxFuture<'_, Option<UiEvent>> {
        self.recv().boxed()
    }
}
