//! WebSocket module for real-time event ingestion

mod connection;
mod protocol;

pub use connection::{StreamQuery, stream_handler};
pub use protocol::{ClientMessage, ServerMessage, parse_frame};
