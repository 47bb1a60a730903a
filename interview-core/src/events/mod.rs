//! Events streamed into an interview session

pub mod types;

pub use types::{AttentionEvent, AttentionState, SegmentKind, SessionEvent, TranscriptSegment};
