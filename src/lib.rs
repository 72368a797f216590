//! # nit-match
//!
//! A library for pairing client tax identifiers (Colombian NITs) with the
//! PDF receipt files meant for them.
//!
//! Bulk receipt sends start from two inputs that never quite agree: a client
//! roster (a spreadsheet with NIT, company name, and email columns) and a
//! pile of PDF filenames that embed the NIT in inconsistent formats, with or
//! without the check digit, with leading zeros, or sometimes only the
//! company name.
//!
//! `nit-match` resolves each roster row to its files through a graduated
//! cascade: exact digit equality first, then formatting-tolerant variants,
//! then looser substring and company-name fallbacks. The cascade stops at
//! the first tier that produces files, every fallback match carries a
//! warning, and a row with no files is a normal reportable result rather
//! than an error.
//!
//! ## Example
//!
//! ```rust
//! use nit_match::core::candidate::CandidateFile;
//! use nit_match::core::nit::Nit;
//! use nit_match::matching::{CandidateIndex, MatchEngine};
//! use nit_match::parsing::filename::extract_nit;
//!
//! let files = vec!["NIT._900123456 ACME.pdf", "otros.pdf"];
//! let index = CandidateIndex::from_files(
//!     files
//!         .into_iter()
//!         .map(|name| CandidateFile::new(name, extract_nit(name)))
//!         .collect(),
//! );
//!
//! let nit = Nit::parse("900.123.456-7").unwrap();
//! let outcome = MatchEngine::new(&index).match_nit(&nit, None);
//! assert_eq!(outcome.files, vec!["NIT._900123456 ACME.pdf"]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Identifier, client, and candidate-file types
//! - [`parsing`]: Roster loading (xlsx/csv) and filename extraction
//! - [`matching`]: The tier cascade, similarity pre-pass, and batch report
//! - [`cli`]: Command-line interface implementation
//! - [`version`]: Release-version file management

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod version;

// Re-export commonly used types for convenience
pub use core::candidate::CandidateFile;
pub use core::client::Client;
pub use core::nit::Nit;
pub use core::types::*;
pub use matching::engine::{MatchConfig, MatchEngine, MatchOutcome};
pub use matching::report::BatchReport;
