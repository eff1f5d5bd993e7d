//! Record store and cross-reference engine for numbered decision records.

pub mod config;
pub mod editor;
pub mod fold;
pub mod fs;
pub mod link;
pub mod patch;
pub mod record;
pub mod sanitize;
pub mod store;
pub mod toc;
pub mod writer;
pub mod xref;

pub use fs::{MemoryFs, OsFs, RecordFs};
pub use link::{LinkParseError, LinkRelation};
pub use record::{Record, RecordError, RecordKind};
pub use store::RecordStore;
pub use writer::RecordWriter;
pub use xref::CrossReferenceEngine;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
