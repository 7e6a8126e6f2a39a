//! Inspection Report Common Library
//!
//! CLIと各バックエンドで共有される型・署名キャプチャ・組版コア

pub mod types;
pub mod layout;
pub mod error;
pub mod raster;
pub mod text_metrics;
pub mod signature;
pub mod export;

pub use types::{FormSection, PhotoRecord, ReportData, SectionStatus, default_caption, report_file_name};
pub use layout::{FontWeight, ReportLayout};
pub use error::{Error, Result};
pub use raster::RasterFormat;
pub use signature::SignaturePad;
pub use export::{assemble_report, AssemblyReport, DocumentBackend, RecordingDocument, ReportAssembler};
