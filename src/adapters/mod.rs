// Adapters layer: concrete implementations for external systems (http, embedded payloads, local files).

pub mod sample;
pub mod source;
pub mod storage;

pub use source::{DataSource, HttpRecordSource, InlineRecordSource, SampleRecordSource};
pub use storage::LocalStorage;
