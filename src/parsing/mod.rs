//! Loaders for the two batch inputs: the client roster and the candidate
//! file listing.
//!
//! - **Roster**: Excel workbooks (`.xlsx`/`.xls`/`.xlsm`) or delimited text
//!   (`.csv`/`.tsv`), with case-insensitive header detection against alias
//!   lists. Rows that fail validation are collected as errors, never fatal.
//! - **Candidates**: a directory of PDFs or a plain text listing of archive
//!   member names, one per line. The matcher itself never opens an archive;
//!   it only sees the already-materialized name list.
//! - **Filename extraction**: pulls the embedded NIT out of each candidate
//!   filename (see [`filename`]).

pub mod filename;
pub mod listing;
pub mod roster;
pub mod xlsx;

pub use listing::load_candidates;
pub use roster::load_roster;
