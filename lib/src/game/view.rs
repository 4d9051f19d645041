use crate::game::{scoreboard::SScoreBoard, EGameState};
use crate::primitives::*;
use crate::rules::*;
use crate::util::*;
use serde::Serialize;

/// What one seat is allowed to know about the table.
#[derive(Clone, Debug, Serialize)]
pub struct SPlayerView<PlayerId> {
    pub epi: EPlayerIndex,
    pub egamestate: EGameState,
    pub vecplayerid: Vec<PlayerId>,
    pub hand: SHand,
    #[serde(serialize_with = "serialize_enummap")]
    pub an_cards_in_hand: EnumMap<EPlayerIndex, usize>,
    pub oepi_turn: Option<EPlayerIndex>,
    pub oepi_round_starter: Option<EPlayerIndex>,
    pub vectplepioannouncement: Vec<(EPlayerIndex, Option<SGameAnnouncement>)>,
    pub oannouncement: Option<SGameAnnouncement>,
    pub oepi_decider: Option<EPlayerIndex>,
    pub ostich_current: Option<SStich>,
    pub vecstichcompleted: Vec<SCompletedStich>,
    pub scoreboard: SScoreBoard,
}
