#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    None,
    /// Send the query to the backend: over the socket when it is open,
    /// otherwise through the one-shot HTTP fallback.
    SendQuery {
        request_id: u64,
        query: String,
    },
    ShowMessage(String),
    /// Like ShowMessage, but rendered in the error style.
    ShowError(String),
    ClearMessage,
    ScheduleClearMessage(u64), // delay in milliseconds
}
