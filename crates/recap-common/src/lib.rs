//! Common types, errors, and export parsing for the recap pipeline

pub mod error;
pub mod export;
pub mod logging;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{RecapError, Result};
pub use export::{
    locate_export, load_records, ExportData, ViewingRecord, EXPORT_FILE_NAME,
};
pub use logging::{init_default_logging, init_logging, LoggingConfig};
pub use types::Year;
