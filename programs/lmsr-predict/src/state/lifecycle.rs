use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum MarketState {
    Proposed,
    Approved,
    Active,
    Resolving,
    Disputed,
    Finalized,
    Cancelled,
}

impl MarketState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MarketState::Finalized | MarketState::Cancelled)
    }

    /// Forward edges of the lifecycle plus cancellation from any live state.
    pub fn can_transition_to(self, next: MarketState) -> bool {
        use MarketState::*;
        match (self, next) {
            (Proposed, Approved)
            | (Approved, Active)
            | (Active, Resolving)
            | (Resolving, Disputed)
            | (Resolving, Finalized)
            | (Disputed, Finalized) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MarketState::*;

    const ALL: [MarketState; 7] = [Proposed, Approved, Active, Resolving, Disputed, Finalized, Cancelled];

    #[test]
    fn happy_path_is_allowed() {
        let path = [Proposed, Approved, Active, Resolving, Disputed, Finalized];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
        assert!(Resolving.can_transition_to(Finalized));
    }

    #[test]
    fn no_backward_or_skipping_edges() {
        assert!(!Approved.can_transition_to(Proposed));
        assert!(!Proposed.can_transition_to(Active));
        assert!(!Active.can_transition_to(Finalized));
        assert!(!Disputed.can_transition_to(Resolving));
        assert!(!Disputed.can_transition_to(Disputed));
    }

    #[test]
    fn terminal_states_are_frozen() {
        for from in [Finalized, Cancelled] {
            for to in ALL {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn cancel_from_any_live_state() {
        for from in ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert!(from.can_transition_to(Cancelled));
        }
    }
}
