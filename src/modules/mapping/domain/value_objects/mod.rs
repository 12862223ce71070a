mod match_result;

pub use match_result::{MatchResult, MatchType};
