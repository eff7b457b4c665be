//! Best-effort extraction of records from topic source files
//!
//! # Error Handling Strategy
//!
//! - **Unrecognized lines**: silently skipped. Extraction documents shell code, it
//!   does not validate it, so one odd line never fails a query.
//! - **Unterminated quotes**: the offending line is skipped like any other unrecognized line.
//! - **File-level errors**: unreadable or oversized files surface as `anyhow` errors to the
//!   query layer, which logs them and treats the topic as having no records.

pub mod shell;

pub use shell::{Records, extract_records, parse_source_file};
