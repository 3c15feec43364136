mod common;

use anchor_lang::prelude::Pubkey;
use common::*;
use lmsr_predict::constants::{MAX_B, MIN_B, PRECISION};
use anchor_lang::error::Error;
use lmsr_predict::errors::{ErrorKind, PredictError};
use lmsr_predict::state::{Market, Outcome, Position};
use lmsr_predict::utils::fees::{split_fees, FeeRates};
use lmsr_predict::utils::lmsr;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Buy { trader: usize, yes: bool, spend: u64 },
    Sell { trader: usize, yes: bool, percent: u64 },
}

fn side(yes: bool) -> Outcome {
    if yes { Outcome::Yes } else { Outcome::No }
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..3usize, any::<bool>(), PRECISION / 1_000..5_000 * PRECISION)
            .prop_map(|(trader, yes, spend)| Step::Buy { trader, yes, spend }),
        (0..3usize, any::<bool>(), 1..=100u64)
            .prop_map(|(trader, yes, percent)| Step::Sell { trader, yes, percent }),
    ]
}

const INTERNAL_FAILURES: [PredictError; 11] = [
    PredictError::MathOverflow,
    PredictError::MathUnderflow,
    PredictError::DivisionByZero,
    PredictError::LogDomain,
    PredictError::SolverBracket,
    PredictError::FeeSplitMismatch,
    PredictError::VoteLedgerMismatch,
    PredictError::AggregationDiverged,
    PredictError::PoolOverdrawn,
    PredictError::BoundedLossExceeded,
    PredictError::AccountingMismatch,
];

/// Rejections of in-bounds trades must come from input or lifecycle checks.
fn check_rejection(error: Error) -> Result<(), TestCaseError> {
    for internal in INTERNAL_FAILURES {
        prop_assert!(error != Error::from(internal), "internal failure: {:?}", error);
    }
    Ok(())
}

/// Runs the steps; rejected trades leave the market untouched.
fn run(market: &mut Market, traders: &mut [Position], steps: &[Step]) -> Result<(), TestCaseError> {
    for (i, step) in steps.iter().enumerate() {
        let now = 10 + i as i64;
        let outcome = match *step {
            Step::Buy { trader, yes, spend } => market
                .execute_buy(&mut traders[trader], side(yes), spend, 0, now)
                .map(|_| ()),
            Step::Sell { trader, yes, percent } => {
                let shares = traders[trader].shares(side(yes)) * percent / 100;
                if shares == 0 {
                    continue;
                }
                market
                    .execute_sell(&mut traders[trader], side(yes), shares, 0, now)
                    .map(|_| ())
            }
        };
        if let Err(error) = outcome {
            check_rejection(error)?;
        }
    }
    Ok(())
}

#[test]
fn internal_failures_are_arithmetic_or_consistency() {
    for internal in INTERNAL_FAILURES {
        assert!(matches!(internal.kind(), ErrorKind::Arithmetic | ErrorKind::Consistency));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prices_sum_to_one(
        q_yes in 0..1_000_000 * PRECISION,
        q_no in 0..1_000_000 * PRECISION,
        b in MIN_B..=MAX_B,
    ) {
        let yes = lmsr::price_yes(q_yes, q_no, b).unwrap();
        let no = lmsr::price_no(q_yes, q_no, b).unwrap();
        prop_assert!(yes <= PRECISION && no <= PRECISION);
        prop_assert!((yes + no).abs_diff(PRECISION) <= lmsr::PRICE_SUM_TOLERANCE);
    }

    #[test]
    fn a_share_costs_at_most_one_unit(
        q_yes in 0..100_000 * PRECISION,
        q_no in 0..100_000 * PRECISION,
        shares in 1..10_000 * PRECISION,
        b in MIN_B..10_000 * PRECISION,
        yes in any::<bool>(),
    ) {
        let paid = lmsr::buy_cost(q_yes, q_no, b, yes, shares).unwrap();
        prop_assert!(paid <= shares + 2);
    }

    #[test]
    fn round_trip_never_profits(
        b in MIN_B..10_000 * PRECISION,
        spend in PRECISION..1_000 * PRECISION,
        yes in any::<bool>(),
    ) {
        let mut market = active_market(b);
        let mut trader = position();
        let bought = market.execute_buy(&mut trader, side(yes), spend, 0, 10).unwrap();
        let sold = market.execute_sell(&mut trader, side(yes), bought.shares, 0, 11).unwrap();

        prop_assert_eq!(sold.proceeds, bought.cost);
        prop_assert!(sold.net_proceeds < spend);
        prop_assert_eq!(market.q_yes + market.q_no, 0);
        prop_assert_eq!(market.net_deposits, 0);
    }

    #[test]
    fn maker_loss_is_bounded(
        b in MIN_B..10_000 * PRECISION,
        steps in prop::collection::vec(step(), 1..20),
    ) {
        let mut market = active_market(b);
        let mut traders = vec![position(), position(), position()];
        run(&mut market, &mut traders, &steps)?;

        let max_loss = market.max_loss().unwrap();
        let winners = [market.q_yes, market.q_no];
        for winning in winners {
            prop_assert!(winning.saturating_sub(market.net_deposits) <= max_loss);
        }
        prop_assert_eq!(
            market.q_yes,
            traders.iter().map(|t| t.yes_shares).sum::<u64>()
        );
        prop_assert_eq!(
            market.q_no,
            traders.iter().map(|t| t.no_shares).sum::<u64>()
        );
    }

    #[test]
    fn claims_never_exceed_net_deposits(
        b in MIN_B..10_000 * PRECISION,
        steps in prop::collection::vec(step(), 1..20),
        outcome in prop_oneof![Just(Outcome::Yes), Just(Outcome::No), Just(Outcome::Invalid)],
    ) {
        let mut market = active_market(b);
        let mut traders = vec![position(), position(), position()];
        run(&mut market, &mut traders, &steps)?;

        let opens = END_TIME + market.params.resolution_delay;
        market.propose_resolution(Pubkey::new_unique(), outcome, [0; 32], opens).unwrap();
        market.finalize(market.dispute_deadline().unwrap()).unwrap();

        let mut paid = 0u64;
        let mut resolver_paid = 0u64;
        for trader in traders.iter_mut() {
            match market.claim(trader) {
                Ok(payout) => {
                    paid += payout.holder_amount;
                    resolver_paid += payout.resolver_amount;
                    prop_assert_eq!(
                        market.claim(trader).unwrap_err(),
                        PredictError::AlreadyClaimed.into()
                    );
                }
                Err(e) => prop_assert_eq!(e, PredictError::NothingToClaim.into()),
            }
        }
        prop_assert!(paid <= market.settlement.pool);
        prop_assert!(paid <= market.net_deposits);
        prop_assert!(resolver_paid <= market.resolver_fees);
        prop_assert!(market.expected_vault_balance().is_ok());
    }

    #[test]
    fn fee_split_is_exact(
        amount in 0..u64::MAX / 10_000,
        protocol_bps in 0..700u16,
        resolver_bps in 0..700u16,
        lp_bps in 0..600u16,
    ) {
        let rates = FeeRates { protocol_bps, resolver_bps, lp_bps };
        let split = split_fees(amount, &rates).unwrap();
        prop_assert_eq!(split.protocol + split.resolver + split.lp, split.total);
        prop_assert!(split.total <= amount);
    }
}
