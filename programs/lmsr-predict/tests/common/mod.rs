#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use lmsr_predict::constants::PRECISION;
use lmsr_predict::state::{Market, MarketParams, Position, VoteKind};

pub const END_TIME: i64 = 10_000;

pub fn proposed_market(b: u64) -> Market {
    Market::new(0, Pubkey::new_unique(), [9; 32], b, END_TIME, MarketParams::default(), 1, 255, 254, 0)
        .unwrap()
}

/// Market voted through and funded at exactly the required floor.
pub fn active_market(b: u64) -> Market {
    let mut market = proposed_market(b);
    for _ in 0..market.params.min_proposal_votes {
        market.record_vote(VoteKind::Proposal).unwrap();
    }
    let votes = market.proposal_votes;
    market.count_votes(VoteKind::Proposal, 0, votes, 0, 1).unwrap();
    let floor = market.required_liquidity().unwrap();
    market.activate(floor, 2).unwrap();
    market
}

pub fn position() -> Position {
    Position::new(Pubkey::new_unique(), Pubkey::new_unique(), 255)
}

pub fn tokens(n: u64) -> u64 {
    n * PRECISION
}
