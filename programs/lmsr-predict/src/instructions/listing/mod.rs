pub mod create_market;
pub mod activate_market;

pub use create_market::*;
pub use activate_market::*;
