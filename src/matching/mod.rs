//! The matching core: an index over candidate filenames, the graduated
//! tier cascade, the similar-identifier pre-pass, and the batch report
//! that ties them together for a whole roster.

pub mod engine;
pub mod index;
pub mod report;
pub mod similarity;

pub use engine::{MatchConfig, MatchEngine, MatchOutcome, DEFAULT_NAME_THRESHOLD};
pub use index::CandidateIndex;
pub use report::{BatchReport, BatchSummary, ClientOutcome, OrphanFile};
pub use similarity::detect_similar_nits;
