//! Export core modules shared by the CLI and its backends.

pub mod recorder;
pub mod report_core;

pub use recorder::{DocOp, RecordingDocument};
pub use report_core::{
    assemble_report, AssemblyReport, DocumentBackend, LayoutCursor, PhotoFallback, ReportAssembler,
};
