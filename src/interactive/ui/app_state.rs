use crate::client::ConnectionState;
use crate::interactive::constants::MESSAGE_CLEAR_DELAY_MS;
use crate::interactive::domain::models::SessionStore;
use crate::interactive::ui::commands::Command;
use crate::interactive::ui::events::Message;

// Re-export Mode
pub use crate::interactive::domain::models::Mode;

pub struct AppState {
    pub mode: Mode,
    /// Mode to return to when the help overlay closes.
    previous_mode: Mode,
    pub connection: ConnectionState,
    pub store: SessionStore,
    pub search_query: String,
    pub ui: UiState,
}

pub struct UiState {
    pub message: Option<String>,
    /// Whether the current message is an error notice (rendered in the
    /// error style) rather than a transient status.
    pub message_is_error: bool,
    pub is_searching: bool,
}

impl UiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.message_is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_is_error = false;
    }
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            previous_mode: mode,
            connection: ConnectionState::Connecting,
            store: SessionStore::new(),
            search_query: String::new(),
            ui: UiState {
                message: None,
                message_is_error: false,
                is_searching: false,
            },
        }
    }

    pub fn update(&mut self, msg: Message) -> Command {
        match msg {
            Message::QueryChanged(query) => {
                self.search_query = query;
                Command::None
            }
            Message::SubmitQuery(region, query) => {
                if query.is_empty() {
                    return Command::None;
                }
                let request_id = self.store.begin(region, &query);
                self.ui.is_searching = true;
                self.ui.set_status("[searching...]");
                Command::SendQuery { request_id, query }
            }
            Message::ResultsReceived { request_id, chunks } => {
                self.ui.is_searching = false;
                if self.store.append(request_id, chunks).is_some() {
                    self.ui.clear_message();
                }
                Command::None
            }
            Message::SearchCompleted {
                request_id,
                response,
            } => {
                self.ui.is_searching = false;
                if self
                    .store
                    .complete(request_id, response.llm_summary, response.reranked_chunks)
                    .is_some()
                {
                    self.ui.clear_message();
                }
                Command::None
            }
            Message::SearchFailed(message) => {
                self.ui.is_searching = false;
                self.store.fail();
                Command::ShowError(format!("Search failed: {message}"))
            }
            Message::ProtocolError => {
                self.ui.is_searching = false;
                self.store.abandon_active();
                Command::ShowError("Failed to process server response.".to_string())
            }
            Message::ConnectionOpened => {
                self.connection = ConnectionState::Open;
                self.ui.set_status("Connected.");
                Command::ScheduleClearMessage(MESSAGE_CLEAR_DELAY_MS)
            }
            Message::ConnectionClosed(reason) => {
                self.connection = ConnectionState::Closed;
                self.ui.is_searching = false;
                // Rendered results stay; only the outstanding query is lost.
                self.store.abandon_active();
                Command::ShowError(format!("Connection closed: {reason}"))
            }
            Message::SwitchView => {
                self.mode = match self.mode {
                    Mode::List => Mode::Grid,
                    Mode::Grid => Mode::List,
                    Mode::Help => Mode::Help,
                };
                Command::None
            }
            Message::ShowHelp => {
                if self.mode != Mode::Help {
                    self.previous_mode = self.mode;
                    self.mode = Mode::Help;
                }
                Command::None
            }
            Message::CloseHelp => {
                if self.mode == Mode::Help {
                    self.mode = self.previous_mode;
                }
                Command::None
            }
            Message::SetStatus(message) => {
                self.ui.set_status(message);
                Command::None
            }
            Message::ClearStatus => {
                self.ui.clear_message();
                Command::None
            }
            Message::Quit => Command::None, // handled in the main loop
        }
    }

    /// The view the help overlay was opened from.
    pub fn help_backdrop(&self) -> Mode {
        self.previous_mode
    }
}
