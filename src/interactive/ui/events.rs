use crate::interactive::domain::models::Region;
use crate::schemas::{Chunk, SearchResponse};

#[derive(Clone, Debug)]
pub enum Message {
    // Query input
    QueryChanged(String),
    SubmitQuery(Region, String),

    // Backend events
    ResultsReceived {
        request_id: Option<u64>,
        chunks: Vec<Chunk>,
    },
    SearchCompleted {
        request_id: u64,
        response: SearchResponse,
    },
    SearchFailed(String),
    ProtocolError,
    ConnectionOpened,
    ConnectionClosed(String),

    // Mode changes
    SwitchView,
    ShowHelp,
    CloseHelp,

    // UI events
    SetStatus(String),
    ClearStatus,
    Quit,
}
