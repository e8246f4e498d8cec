//! Document Reader Module
//!
//! Provides the layers above the raw tokenizer:
//! - Loader: owned document buffers from memory, readers or files
//! - SliceReader: zero-copy element-level reader
//! - Events: element event types for pull parsing

pub mod events;
pub mod loader;
pub mod slice;

pub use events::{BxEvent, EndElement, StartElement};
pub use loader::{Document, LoaderOptions};
pub use slice::{parse_events, SliceReader};
