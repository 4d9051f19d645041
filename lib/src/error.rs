use crate::game::EGameState;
use crate::primitives::*;
use failure::Fail;

/// Everything the engine can reject. An action returning one of these left the table untouched.
#[derive(Fail, Debug, Clone, PartialEq, Eq)]
pub enum EEngineError {
    #[fail(display = "{} is not possible in state {}", str_action, egamestate)]
    InvalidActionForState {
        str_action: &'static str,
        egamestate: EGameState,
    },
    #[fail(display = "It is not the turn of player {}", epi)]
    NotPlayersTurn {
        epi: EPlayerIndex,
    },
    #[fail(display = "Player {} does not hold {}", epi, card)]
    CardNotInHand {
        epi: EPlayerIndex,
        card: SCard,
    },
    #[fail(display = "Illegal bid: {}", str_reason)]
    IllegalBid {
        str_reason: String,
    },
    #[fail(display = "Trick is not complete")]
    IncompleteTrick,
    #[fail(display = "Trick already holds four cards")]
    TrickFull,
    /// Raised for conditions the rules exclude. Indicates a bug; the round should not go on.
    #[fail(display = "Invariant violated: {}", str_what)]
    InvariantViolation {
        str_what: String,
    },
    #[fail(display = "Unknown player {}", str_player)]
    UnknownPlayer {
        str_player: String,
    },
    #[fail(display = "Player {} already has a seat", str_player)]
    PlayerAlreadySeated {
        str_player: String,
    },
}

impl EEngineError {
    pub fn illegal_bid(str_reason: impl Into<String>) -> Self {
        EEngineError::IllegalBid{str_reason: str_reason.into()}
    }
    pub fn invariant_violation(str_what: impl Into<String>) -> Self {
        EEngineError::InvariantViolation{str_what: str_what.into()}
    }
}

#[test]
fn test_error_display() {
    use crate::primitives::card::card_values::*;
    assert_eq!(
        EEngineError::CardNotInHand{epi: EPlayerIndex::EPI1, card: HA}.to_string(),
        "Player 1 does not hold HA",
    );
    assert_eq!(
        EEngineError::InvalidActionForState{str_action: "play_card", egamestate: EGameState::PreRound}.to_string(),
        "play_card is not possible in state PreRound",
    );
}
