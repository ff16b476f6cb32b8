pub mod chunk;
pub mod envelope;
pub mod http;

pub use chunk::Chunk;
pub use envelope::{ClientFrame, ServerFrame};
pub use http::{Health, SearchResponse};
