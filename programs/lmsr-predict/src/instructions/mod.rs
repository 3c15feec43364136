use anchor_lang::prelude::*;
use crate::events::MarketStateChanged;
use crate::state::{Market, MarketState};

pub mod admin;
pub mod listing;
pub mod voting;
pub mod trading;
pub mod resolution;
pub mod settlement;

pub use admin::*;
pub use listing::*;
pub use voting::*;
pub use trading::*;
pub use resolution::*;
pub use settlement::*;

pub(crate) fn emit_transition(market: &Market, from: MarketState, now: i64) {
    if market.state != from {
        emit!(MarketStateChanged {
            market_id: market.market_id,
            from,
            to: market.state,
            timestamp: now,
        });
    }
}
