pub mod client;
pub mod formatters;
pub mod interactive;
pub mod logging;
pub mod schemas;

pub use client::{ClientEvent, Connection, ConnectionState, HttpWorker};
pub use formatters::{format_chunk, format_score, format_scores};
pub use schemas::{Chunk, ClientFrame, Health, SearchResponse, ServerFrame};
