use anchor_lang::prelude::*;
use crate::errors::PredictError;
use crate::state::{GlobalParameters, Market};

/// Roles an instruction can require of its signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Admin,
    Scheduler,
    Resolver,
    Creator,
    Trader,
}

impl Capability {
    pub fn is_held_by(self, signer: &Pubkey, config: &GlobalParameters, market: Option<&Market>) -> bool {
        match self {
            Capability::Admin => *signer == config.admin,
            Capability::Scheduler => *signer == config.scheduler,
            Capability::Resolver => {
                config.resolver == Pubkey::default() || *signer == config.resolver
            }
            Capability::Creator => market.is_some_and(|m| m.creator == *signer),
            Capability::Trader => true,
        }
    }

    pub fn check(self, signer: &Pubkey, config: &GlobalParameters, market: Option<&Market>) -> Result<()> {
        require!(self.is_held_by(signer, config, market), PredictError::Unauthorized);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MarketParams;

    fn config(resolver: Pubkey) -> GlobalParameters {
        GlobalParameters {
            admin: Pubkey::new_unique(),
            scheduler: Pubkey::new_unique(),
            resolver,
            treasury: Pubkey::new_unique(),
            collateral_mint: Pubkey::new_unique(),
            params: MarketParams::default(),
            paused: false,
            version: 1,
            total_markets: 0,
            bump: 0,
            reserved: [0; 64],
        }
    }

    #[test]
    fn roles_match_configured_keys() {
        let cfg = config(Pubkey::new_unique());
        let stranger = Pubkey::new_unique();
        assert!(Capability::Admin.check(&cfg.admin, &cfg, None).is_ok());
        assert!(Capability::Scheduler.check(&cfg.scheduler, &cfg, None).is_ok());
        assert!(Capability::Resolver.check(&cfg.resolver, &cfg, None).is_ok());
        assert!(Capability::Trader.check(&stranger, &cfg, None).is_ok());
        for role in [Capability::Admin, Capability::Scheduler, Capability::Resolver] {
            assert_eq!(
                role.check(&stranger, &cfg, None).unwrap_err(),
                PredictError::Unauthorized.into()
            );
        }
        // The admin does not implicitly hold the scheduler role.
        assert!(!Capability::Scheduler.is_held_by(&cfg.admin, &cfg, None));
    }

    #[test]
    fn default_resolver_opens_resolution() {
        let cfg = config(Pubkey::default());
        assert!(Capability::Resolver.is_held_by(&Pubkey::new_unique(), &cfg, None));
    }

    #[test]
    fn creator_is_per_market() {
        let cfg = config(Pubkey::default());
        let creator = Pubkey::new_unique();
        let market = Market::new(0, creator, [0; 32], 0, 10, MarketParams::default(), 1, 0, 0, 0).unwrap();
        assert!(Capability::Creator.is_held_by(&creator, &cfg, Some(&market)));
        assert!(!Capability::Creator.is_held_by(&cfg.admin, &cfg, Some(&market)));
        assert!(!Capability::Creator.is_held_by(&creator, &cfg, None));
    }
}
