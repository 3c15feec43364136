pub mod claim;
pub mod withdraw_liquidity;

pub use claim::*;
pub use withdraw_liquidity::*;
