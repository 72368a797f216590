//! Core data types for identifiers, roster rows, and candidate files.

pub mod candidate;
pub mod client;
pub mod nit;
pub mod types;

pub use candidate::{CandidateFile, ExtractedNit, ExtractionPattern};
pub use client::Client;
pub use nit::{Nit, NitError};
pub use types::{MatchTier, MatchWarning, SimilarPair, SimilarReason};
