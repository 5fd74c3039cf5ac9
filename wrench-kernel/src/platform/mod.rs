//! Platform description ingestion: host state traces (§6.1).
//!
//! Full platform-XML parsing is out of scope; the host state trace
//! grammar is fully specified and small enough to parse by hand.

mod driver;
mod error;
mod trace;

pub use driver::drive_trace;
pub use error::TraceParseError;
pub use trace::{HostStateTrace, TraceEntry};
