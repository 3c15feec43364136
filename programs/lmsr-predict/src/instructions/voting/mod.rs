pub mod submit_vote;
pub mod aggregate_votes;

pub use submit_vote::*;
pub use aggregate_votes::*;
