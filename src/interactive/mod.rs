use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, poll},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Url;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

pub mod constants;
pub mod domain;
pub mod ui;


use crate::client::{
    ClientEvent, Connection, ConnectionState, HttpWorker, websocket_url,
};
use crate::schemas::{ClientFrame, ServerFrame};

use self::constants::{DOUBLE_CTRL_C_TIMEOUT_SECS, EVENT_POLL_INTERVAL_MS};
use self::ui::{
    app_state::{AppState, Mode},
    commands::Command,
    components::Component,
    events::Message,
    renderer::Renderer,
};

/// The interactive TUI: list view, query grid, and the connection plumbing
/// between them and the backend.
///
/// Workers are started on `run` and torn down when the app is dropped;
/// dropping the [`Connection`] handle is what closes the socket.
pub struct InteractiveApp {
    state: AppState,
    renderer: Renderer,
    server: Url,
    connection: Option<Connection>,
    http: Option<HttpWorker>,
    events: Option<Receiver<ClientEvent>>,
    last_ctrl_c_press: Option<Instant>,
    message_timer: Option<Instant>,
    message_clear_delay: u64,
}

impl InteractiveApp {
    pub fn new(server: Url, start_mode: Mode) -> Self {
        Self {
            state: AppState::new(start_mode),
            renderer: Renderer::new(),
            server,
            connection: None,
            http: None,
            events: None,
            last_ctrl_c_press: None,
            message_timer: None,
            message_clear_delay: constants::MESSAGE_CLEAR_DELAY_MS,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup_terminal()?;

        // Start the connection and fallback workers.
        let (events_tx, events_rx) = mpsc::channel();
        let ws_url = websocket_url(&self.server)?;
        self.connection = Some(Connection::open(ws_url, events_tx.clone())?);
        self.http = Some(HttpWorker::spawn(self.server.clone(), events_tx)?);
        self.events = Some(events_rx);

        let result = self.run_app(&mut terminal);

        self.cleanup_terminal(&mut terminal)?;
        // Drop the handle so the worker sends a close frame and exits.
        self.connection = None;
        result
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn cleanup_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run_app(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                self.renderer.render(f, &self.state);
            })?;

            // Drain worker events in arrival order.
            loop {
                let event = match &self.events {
                    Some(receiver) => match receiver.try_recv() {
                        Ok(event) => event,
                        Err(_) => break,
                    },
                    None => break,
                };
                if matches!(event, ClientEvent::Closed { .. }) {
                    // The socket is gone; discard the dead handle.
                    self.connection = None;
                }
                if let Some(msg) = map_client_event(event) {
                    self.handle_message(msg);
                }
            }

            // Check for scheduled message clear
            if let Some(timer) = self.message_timer {
                if timer.elapsed() >= Duration::from_millis(self.message_clear_delay) {
                    self.message_timer = None;
                    self.handle_message(Message::ClearStatus);
                }
            }

            if poll(Duration::from_millis(EVENT_POLL_INTERVAL_MS))? {
                if let Event::Key(key) = event::read()? {
                    let should_quit = self.handle_input(key)?;
                    if should_quit {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        use crossterm::event::KeyModifiers;

        // Global Ctrl+C handling for exit
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if let Some(last_press) = self.last_ctrl_c_press {
                if last_press.elapsed() < Duration::from_secs(DOUBLE_CTRL_C_TIMEOUT_SECS) {
                    return Ok(true);
                }
            }
            self.last_ctrl_c_press = Some(Instant::now());
            self.state.ui.set_status("Press Ctrl+C again to exit");
            return Ok(false);
        }

        // Global keys
        match key.code {
            KeyCode::Char('?') if self.state.mode != Mode::Help => {
                self.handle_message(Message::ShowHelp);
                return Ok(false);
            }
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_message(Message::SwitchView);
                return Ok(false);
            }
            KeyCode::Esc if self.state.mode != Mode::Help => {
                return Ok(true);
            }
            _ => {}
        }

        // Mode-specific input handling
        let message = match self.state.mode {
            Mode::List => self.handle_list_mode_input(key),
            Mode::Grid => self.renderer.get_query_grid_mut().handle_key(key),
            Mode::Help => self.renderer.get_help_dialog_mut().handle_key(key),
        };

        if let Some(msg) = message {
            self.handle_message(msg);
        }

        Ok(false)
    }

    fn handle_list_mode_input(&mut self, key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                self.renderer.get_result_list_mut().handle_key(key)
            }
            _ => self.renderer.get_search_bar_mut().handle_key(key),
        }
    }

    fn handle_message(&mut self, message: Message) {
        let command = self.state.update(message);
        self.execute_command(command);
    }

    fn execute_command(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::SendQuery { request_id, query } => {
                self.send_query(request_id, query);
            }
            Command::ShowMessage(msg) => {
                self.state.ui.set_status(msg);
                self.message_timer = None;
            }
            Command::ShowError(msg) => {
                self.state.ui.set_error(msg);
                self.message_timer = None;
            }
            Command::ClearMessage => {
                self.state.ui.clear_message();
                self.message_timer = None;
            }
            Command::ScheduleClearMessage(delay) => {
                self.message_timer = Some(Instant::now());
                self.message_clear_delay = delay;
            }
        }
    }

    /// Send over the socket when it is open; otherwise fall back to a
    /// one-shot HTTP search answered on the same event channel.
    fn send_query(&mut self, request_id: u64, query: String) {
        let over_socket = self.state.connection.is_open()
            && self.connection.as_ref().is_some_and(|connection| {
                connection.send(ClientFrame::Search {
                    query: query.clone(),
                    request_id,
                })
            });
        if over_socket {
            return;
        }

        if self.state.connection.is_open() {
            // The worker vanished without a close event.
            self.state.connection = ConnectionState::Closed;
        }
        if let Some(http) = &self.http {
            http.submit(request_id, query);
        }
    }
}

/// Translate a worker event into a UI message. Unknown server actions are
/// logged and ignored here so the state machine never sees them.
fn map_client_event(event: ClientEvent) -> Option<Message> {
    match event {
        ClientEvent::Opened => Some(Message::ConnectionOpened),
        ClientEvent::Closed { reason } => Some(Message::ConnectionClosed(reason)),
        ClientEvent::BadFrame { detail } => {
            tracing::warn!("discarding undecodable server frame: {detail}");
            Some(Message::ProtocolError)
        }
        ClientEvent::Frame(ServerFrame::Results { request_id, chunks }) => {
            Some(Message::ResultsReceived { request_id, chunks })
        }
        ClientEvent::Frame(ServerFrame::Error { message }) => {
            Some(Message::SearchFailed(message))
        }
        ClientEvent::Frame(ServerFrame::Unknown { action }) => {
            tracing::debug!("ignoring unknown server action: {action}");
            None
        }
        ClientEvent::HttpCompleted { request_id, result } => Some(match result {
            Ok(response) => Message::SearchCompleted {
                request_id,
                response,
            },
            Err(message) => Message::SearchFailed(message),
        }),
    }
}
