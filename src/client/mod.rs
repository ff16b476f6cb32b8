pub mod http;

pub use http::{HttpWorker, fetch_health, fetch_search};

use std::sync::mpsc::Sender;
use std::thread;

use anyhow::{Result, anyhow};
use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use crate::schemas::{ClientFrame, SearchResponse, ServerFrame};

/// Lifecycle of the single persistent connection.
///
/// There is no reconnect state: once `Closed`, the client stays offline
/// (queries fall back to HTTP) until the user restarts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn is_open(&self) -> bool {
        matches!(self, ConnectionState::Open)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "online",
            ConnectionState::Closed => "offline",
        }
    }
}

/// Event delivered from the connection and HTTP workers to the UI loop.
#[derive(Debug)]
pub enum ClientEvent {
    /// WebSocket handshake succeeded.
    Opened,
    /// A decoded server frame arrived.
    Frame(ServerFrame),
    /// An inbound frame was not valid JSON / not a known envelope shape.
    BadFrame { detail: String },
    /// The connection terminated (handshake failure, error, or close).
    Closed { reason: String },
    /// An HTTP fallback request finished.
    HttpCompleted {
        request_id: u64,
        result: Result<SearchResponse, String>,
    },
}

/// Derive the `/ws` endpoint from the HTTP base URL.
pub fn websocket_url(base: &Url) -> Result<Url> {
    let mut url = base.clone();
    let scheme = match base.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    url.set_scheme(scheme)
        .map_err(|_| anyhow!("cannot derive a websocket URL from {base}"))?;
    url.set_path("/ws");
    Ok(url)
}

/// Handle to the persistent WebSocket connection.
///
/// Construction spawns a worker thread that owns the socket; the handle
/// only holds the outbound frame channel. Dropping the handle closes that
/// channel, which makes the worker send a close frame and exit: the
/// teardown half of the mount/unmount lifecycle.
pub struct Connection {
    outbound: UnboundedSender<ClientFrame>,
}

impl Connection {
    /// Spawn the connection worker. Lifecycle events and inbound frames
    /// arrive on `events`; the caller starts in [`ConnectionState::Connecting`]
    /// and transitions on [`ClientEvent::Opened`] / [`ClientEvent::Closed`].
    pub fn open(url: Url, events: Sender<ClientEvent>) -> Result<Self> {
        let (outbound, outbound_rx) = unbounded_channel();
        thread::Builder::new()
            .name("psearch-ws".to_string())
            .spawn(move || run_worker(url, outbound_rx, events))
            .map_err(|e| anyhow!("failed to spawn connection worker: {e}"))?;
        Ok(Self { outbound })
    }

    /// Queue a frame for sending. Returns false when the worker is gone,
    /// in which case the caller should treat the connection as closed.
    pub fn send(&self, frame: ClientFrame) -> bool {
        self.outbound.send(frame).is_ok()
    }
}

fn run_worker(url: Url, outbound: UnboundedReceiver<ClientFrame>, events: Sender<ClientEvent>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = events.send(ClientEvent::Closed {
                reason: format!("failed to start connection runtime: {e}"),
            });
            return;
        }
    };
    runtime.block_on(drive_socket(url, outbound, events));
}

async fn drive_socket(
    url: Url,
    mut outbound: UnboundedReceiver<ClientFrame>,
    events: Sender<ClientEvent>,
) {
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            let _ = events.send(ClientEvent::Closed {
                reason: e.to_string(),
            });
            return;
        }
    };
    tracing::info!("websocket connection established: {url}");
    if events.send(ClientEvent::Opened).is_err() {
        return;
    }

    let (mut sink, mut inbound) = stream.split();

    loop {
        tokio::select! {
            frame = outbound.recv() => match frame {
                Some(frame) => {
                    let payload = match frame.encode() {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::warn!("failed to encode outbound frame: {e}");
                            continue;
                        }
                    };
                    if sink.send(WsMessage::Text(payload.into())).await.is_err() {
                        let _ = events.send(ClientEvent::Closed {
                            reason: "failed to send on connection".to_string(),
                        });
                        return;
                    }
                }
                // Handle dropped: clean shutdown.
                None => {
                    let _ = sink.send(WsMessage::Close(None)).await;
                    return;
                }
            },
            message = inbound.next() => {
                let event = match message {
                    Some(Ok(WsMessage::Text(payload))) => decode_event(payload.as_bytes()),
                    Some(Ok(WsMessage::Binary(payload))) => decode_event(&payload),
                    Some(Ok(WsMessage::Close(frame))) => {
                        let reason = frame
                            .map(|f| f.reason.to_string())
                            .filter(|reason| !reason.is_empty())
                            .unwrap_or_else(|| "closed by server".to_string());
                        let _ = events.send(ClientEvent::Closed { reason });
                        return;
                    }
                    Some(Ok(_)) => continue, // ping/pong and raw frames
                    Some(Err(e)) => {
                        let _ = events.send(ClientEvent::Closed {
                            reason: e.to_string(),
                        });
                        return;
                    }
                    None => {
                        let _ = events.send(ClientEvent::Closed {
                            reason: "connection closed unexpectedly".to_string(),
                        });
                        return;
                    }
                };
                if events.send(event).is_err() {
                    return;
                }
            }
        }
    }
}

fn decode_event(payload: &[u8]) -> ClientEvent {
    match ServerFrame::decode_slice(payload) {
        Ok(frame) => ClientEvent::Frame(frame),
        Err(e) => {
            tracing::warn!("failed to decode server frame: {e}");
            ClientEvent::BadFrame {
                detail: e.to_string(),
            }
        }
    }
}
