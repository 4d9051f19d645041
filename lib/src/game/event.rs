use crate::game::{scoreboard::SScoreBoardRow, EGameState};
use crate::primitives::*;
use crate::rules::*;
use serde::Serialize;

/// Notification emitted by the table for every accepted action, in the order things happened.
/// `HandChanged` carries a private hand; collaborators must only forward it to its owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum VGameEvent<PlayerId> {
    PlayerSeated {
        playerid: PlayerId,
        epi: EPlayerIndex,
    },
    StateChanged {
        egamestate: EGameState,
    },
    HandChanged {
        epi: EPlayerIndex,
        hand: SHand,
    },
    TurnChanged {
        epi: EPlayerIndex,
    },
    BidSubmitted {
        epi: EPlayerIndex,
        oannouncement: Option<SGameAnnouncement>,
    },
    RoundModeFixed {
        announcement: SGameAnnouncement,
        oepi_decider: Option<EPlayerIndex>,
    },
    CardPlayed {
        epi: EPlayerIndex,
        card: SCard,
    },
    TrickCompleted {
        stichcompleted: SCompletedStich,
        n_points: isize,
    },
    TrickStarted {
        epi_first: EPlayerIndex,
    },
    ScoreBoardRowAppended {
        scoreboardrow: SScoreBoardRow,
    },
}

impl<PlayerId> VGameEvent<PlayerId> {
    /// Whether every seat may see this event.
    pub fn is_public(&self) -> bool {
        !matches!(self, VGameEvent::HandChanged{..})
    }
}
