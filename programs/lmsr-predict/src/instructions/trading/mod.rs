pub mod buy;
pub mod sell;

pub use buy::*;
pub use sell::*;
