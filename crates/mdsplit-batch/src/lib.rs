//! Batch driver for the Markdown splitter.
//!
//! Reads a `directory:identifier` mapping file, discovers the documents of
//! each directory in their numeric sequence order and splits every one of
//! them, collecting the results in a serialisable report.

pub mod discover;
pub mod mapping;
pub mod runner;

pub use discover::{discover_documents, sequence_number};
pub use mapping::{DirectoryMap, MappingEntry, MappingError};
pub use runner::{
    BatchConfig, BatchError, BatchReport, BatchRunner, DirectoryReport, DocumentReport,
    FailurePolicy, Outcome,
};
