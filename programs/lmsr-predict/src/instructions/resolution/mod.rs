pub mod propose_resolution;
pub mod open_dispute;
pub mod finalize;

pub use propose_resolution::*;
pub use open_dispute::*;
pub use finalize::*;
