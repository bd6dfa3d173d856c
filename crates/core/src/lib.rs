//! Core types for the foodshare dashboard.
//!
//! Following the Functional Core pattern, everything in this crate is pure:
//! domain types, form coercion, the report catalog, chart rendering and CSV
//! export. I/O lives in the `foodshare` binary crate.

pub mod donation;
pub mod export;
pub mod reports;
pub mod storage;
