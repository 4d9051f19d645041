use crate::error::EEngineError;
use crate::primitives::*;
use crate::rules::{playerparties::*, ruleset::*, trumpfdecider::*, *};
use crate::util::*;
use rand::{seq::SliceRandom, Rng};
use serde::Serialize;
use std::fmt;
#[cfg(test)]
use itertools::Itertools;

pub mod event;
pub mod scoreboard;
pub mod table;
pub mod view;

use scoreboard::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EGameState {
    Waiting,
    GameRunning,
    PreRound,
    Round,
    RoundFinished,
}

impl fmt::Display for EGameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub trait TGamePhase : Sized {
    type ActivePlayerInfo;
    type Finish;

    fn which_player_can_do_something(&self) -> Option<Self::ActivePlayerInfo>;
    fn finish_success(self) -> Self::Finish;

    fn finish(self) -> Result<Self::Finish, Self> {
        if self.which_player_can_do_something().is_some() {
            Err(self)
        } else {
            Ok(self.finish_success())
        }
    }
}

/// Shuffles a fresh deck and hands out consecutive blocks of eight cards, seat by seat.
pub fn deal_cards(rng: &mut impl Rng) -> EnumMap<EPlayerIndex, SHand> {
    let mut veccard = SCard::values().collect::<Vec<_>>();
    assert_eq!(veccard.len(), EPlayerIndex::SIZE*N_CARDS_PER_PLAYER);
    veccard.shuffle(rng);
    EPlayerIndex::map_from_fn(|epi| SHand::new_from_iter(
        veccard[epi.to_usize()*N_CARDS_PER_PLAYER..(epi.to_usize()+1)*N_CARDS_PER_PLAYER].iter().copied()
    ))
}

pub type SGameAnnouncements = SPlayersInRound<Option<SGameAnnouncement>>;

/// Bidding phase: every seat gets exactly one turn, starting with the round starter.
#[derive(Debug, Clone)]
pub struct SGamePreparations {
    pub ahand: EnumMap<EPlayerIndex, SHand>,
    pub gameannouncements: SGameAnnouncements,
}

impl TGamePhase for SGamePreparations {
    type ActivePlayerInfo = EPlayerIndex;
    type Finish = Result<SRound, EEngineError>;

    fn which_player_can_do_something(&self) -> Option<Self::ActivePlayerInfo> {
        if self.leading_bid().map_or(false, |(_epi, announcement)| announcement.eroundmode.is_wenz_tier()) {
            None // nothing outranks a Wenz
        } else {
            self.gameannouncements.current_playerindex()
        }
    }

    fn finish_success(self) -> Self::Finish {
        let (oepi_decider, announcement) = match self.leading_bid() {
            Some((epi, announcement)) => (Some(epi), announcement),
            None => (None, SGameAnnouncement::ramsch()),
        };
        let epi_first = self.gameannouncements.first_playerindex();
        SRound::new(self.ahand, announcement, oepi_decider, epi_first)
    }
}

impl SGamePreparations {
    pub fn new(ahand: EnumMap<EPlayerIndex, SHand>, epi_first: EPlayerIndex) -> Self {
        SGamePreparations {
            ahand,
            gameannouncements: SGameAnnouncements::new(epi_first),
        }
    }

    /// Latest concrete bid. Bids strictly increase, so this is the strongest one.
    pub fn leading_bid(&self) -> Option<(EPlayerIndex, SGameAnnouncement)> {
        self.gameannouncements.iter()
            .filter_map(|(epi, oannouncement)| oannouncement.map(|announcement| (epi, announcement)))
            .last()
    }

    /// Records `oannouncement` (`None` meaning Weiter) for `epi`.
    /// Returns the bid as stored, i.e. with its suit normalized.
    pub fn announce_game(&mut self, epi: EPlayerIndex, oannouncement: Option<SGameAnnouncement>, ruleset: &SRuleSet) -> Result<Option<SGameAnnouncement>, EEngineError> {
        if Some(epi)!=self.which_player_can_do_something() {
            return Err(EEngineError::NotPlayersTurn{epi});
        }
        let oannouncement = if let Some(announcement) = oannouncement {
            let announcement = announcement.normalized();
            if ERoundMode::Ramsch==announcement.eroundmode {
                return Err(EEngineError::illegal_bid("Ramsch cannot be bid"));
            }
            let eroundmode_leading = self.leading_bid()
                .map_or(ERoundMode::Ramsch, |(_epi, announcement_leading)| announcement_leading.eroundmode);
            if announcement.eroundmode.priority() <= eroundmode_leading.priority() {
                return Err(EEngineError::illegal_bid(format!("{} does not outrank {}", announcement, eroundmode_leading)));
            }
            if !ruleset.is_mode_allowed(announcement.eroundmode) {
                return Err(EEngineError::illegal_bid(format!("{} is disabled", announcement.eroundmode)));
            }
            announcement.can_be_played(&self.ahand[epi])?;
            Some(announcement)
        } else {
            None
        };
        self.gameannouncements.push(oannouncement);
        Ok(oannouncement)
    }
}

/// Trick play, from the first lead until the eighth trick is complete.
#[derive(Debug, Clone)]
pub struct SRound {
    pub ahand: EnumMap<EPlayerIndex, SHand>,
    pub announcement: SGameAnnouncement,
    pub oepi_decider: Option<EPlayerIndex>,
    pub trumpfdecider: STrumpfDecider,
    pub playergroups: SPlayerGroups,
    vecstichcompleted: Vec<SCompletedStich>,
    ostich_current: Option<SStich>, // None between two tricks
}

impl TGamePhase for SRound {
    type ActivePlayerInfo = EPlayerIndex;
    type Finish = Result<SRoundResult, EEngineError>;

    fn which_player_can_do_something(&self) -> Option<Self::ActivePlayerInfo> {
        self.ostich_current.as_ref().and_then(|stich| stich.current_playerindex())
    }

    fn finish_success(self) -> Self::Finish {
        if !self.is_finished() {
            return Err(EEngineError::invariant_violation(format!("round finished after {} tricks", self.vecstichcompleted.len())));
        }
        let an_points = compute_round_scores(&self.vecstichcompleted, &self.playergroups)?;
        Ok(SRoundResult {
            scoreboardrow: SScoreBoardRow::new(self.announcement, self.oepi_decider, an_points),
            playergroups: self.playergroups,
            vecstichcompleted: self.vecstichcompleted,
        })
    }
}

impl SRound {
    pub fn new(ahand: EnumMap<EPlayerIndex, SHand>, announcement: SGameAnnouncement, oepi_decider: Option<EPlayerIndex>, epi_first: EPlayerIndex) -> Result<Self, EEngineError> {
        let playergroups = calculate_round_groups(&ahand, oepi_decider, &announcement)?;
        Ok(SRound {
            trumpfdecider: STrumpfDecider::new(&announcement)?,
            playergroups,
            ahand,
            announcement,
            oepi_decider,
            vecstichcompleted: Vec::new(),
            ostich_current: Some(SStich::new(epi_first)),
        })
    }

    pub fn current_stich(&self) -> Option<&SStich> {
        self.ostich_current.as_ref()
    }

    pub fn completed_stichs(&self) -> &[SCompletedStich] {
        &self.vecstichcompleted
    }

    pub fn is_finished(&self) -> bool {
        self.vecstichcompleted.len()==N_CARDS_PER_PLAYER
    }

    /// Between two tricks: the last trick is complete and the next one has not begun.
    pub fn is_paused(&self) -> bool {
        self.ostich_current.is_none() && !self.is_finished()
    }

    /// Plays `card` for `epi`. Returns the trick if this card completed it.
    pub fn zugeben(&mut self, epi: EPlayerIndex, card: SCard) -> Result<Option<SCompletedStich>, EEngineError> {
        let stich = match self.ostich_current.as_mut() {
            Some(stich) => stich,
            None => return Err(EEngineError::InvalidActionForState{str_action: "play_card", egamestate: EGameState::Round}),
        };
        if Some(epi)!=stich.current_playerindex() {
            return Err(EEngineError::NotPlayersTurn{epi});
        }
        if !self.ahand[epi].contains(card) {
            return Err(EEngineError::CardNotInHand{epi, card});
        }
        stich.add_card(card)?;
        self.ahand[epi].play_card(card);
        if !stich.is_complete() {
            return Ok(None);
        }
        let epi_winner = self.trumpfdecider.winner_index(stich)?;
        let stichcompleted = SCompletedStich::new(unwrap!(self.ostich_current.take()), epi_winner);
        self.vecstichcompleted.push(stichcompleted.clone());
        Ok(Some(stichcompleted))
    }

    /// Opens the next trick, led by the winner of the previous one.
    pub fn begin_next_stich(&mut self) -> Result<EPlayerIndex, EEngineError> {
        if !self.is_paused() {
            return Err(EEngineError::InvalidActionForState{str_action: "end_trick_pause", egamestate: EGameState::Round});
        }
        let epi_first = unwrap!(self.vecstichcompleted.last()).epi_winner;
        self.ostich_current = Some(SStich::new(epi_first));
        Ok(epi_first)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SRoundResult {
    pub scoreboardrow: SScoreBoardRow,
    pub playergroups: SPlayerGroups,
    pub vecstichcompleted: Vec<SCompletedStich>,
}

impl TGamePhase for SRoundResult { // "absorbing state"
    type ActivePlayerInfo = std::convert::Infallible;
    type Finish = Self;

    fn which_player_can_do_something(&self) -> Option<Self::ActivePlayerInfo> {
        None
    }
    fn finish_success(self) -> Self::Finish {
        self
    }
}

#[cfg(test)]
pub(crate) fn ahand_from_str(astr_hand: [&str; EPlayerIndex::SIZE]) -> EnumMap<EPlayerIndex, SHand> {
    use crate::primitives::cardvector::parse_cards;
    let ahand = EPlayerIndex::map_from_fn(|epi| SHand::new_from_iter(
        unwrap!(parse_cards::<Vec<_>>(astr_hand[epi.to_usize()]))
    ));
    assert!(ahand.iter().all(|hand| hand.cards().len()==N_CARDS_PER_PLAYER));
    assert!(ahand.iter().flat_map(|hand| hand.cards().iter()).all_unique());
    ahand
}

#[cfg(test)]
pub(crate) fn ahand_sorted() -> EnumMap<EPlayerIndex, SHand> {
    ahand_from_str([
        "S7 S8 S9 SK SZ SA HA HO",
        "H7 H8 H9 HK HZ HU BO EO",
        "B7 B8 B9 BK BZ BA SO SU",
        "E7 E8 E9 EK EZ EA EU BU",
    ])
}

#[test]
fn test_deal_cards() {
    use rand::{rngs::StdRng, SeedableRng};
    let ahand = deal_cards(&mut StdRng::seed_from_u64(7));
    assert!(ahand.iter().all(|hand| hand.cards().len()==N_CARDS_PER_PLAYER));
    let veccard = ahand.iter().flat_map(|hand| hand.cards().iter().copied()).collect::<Vec<_>>();
    assert_eq!(veccard.len(), N_CARDS_IN_DECK);
    assert!(veccard.iter().all_unique());
    assert_eq!(
        ahand.iter().flat_map(|hand| hand.cards().iter().copied()).map(crate::rules::card_points::points_card).sum::<isize>(),
        crate::rules::card_points::N_POINTS_TOTAL,
    );
    // same seed, same deal
    assert_eq!(deal_cards(&mut StdRng::seed_from_u64(7)), ahand);
}

#[test]
fn test_bidding_escalation() {
    use EPlayerIndex::*;
    let ruleset = SRuleSet::default();
    let mut gamepreparations = SGamePreparations::new(ahand_sorted(), EPI1);
    assert_eq!(gamepreparations.which_player_can_do_something(), Some(EPI1));
    assert_eq!(
        gamepreparations.announce_game(EPI2, None, &ruleset),
        Err(EEngineError::NotPlayersTurn{epi: EPI2}),
    );
    // the Herz-Sau is trump
    assert!(matches!(
        gamepreparations.announce_game(EPI1, Some(SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Herz)), &ruleset),
        Err(EEngineError::IllegalBid{..}),
    ));
    assert_eq!(gamepreparations.announce_game(EPI1, None, &ruleset), Ok(None));
    assert!(matches!(
        gamepreparations.announce_game(EPI2, Some(SGameAnnouncement::ramsch()), &ruleset),
        Err(EEngineError::IllegalBid{..}),
    ));
    // EPI2 holds the Blatt-Sau
    assert!(matches!(
        gamepreparations.announce_game(EPI2, Some(SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Blatt)), &ruleset),
        Err(EEngineError::IllegalBid{..}),
    ));
    assert_eq!(gamepreparations.announce_game(EPI2, Some(SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Blatt)), &ruleset), Ok(Some(SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Blatt))));
    // same tier does not outrank
    assert!(matches!(
        gamepreparations.announce_game(EPI3, Some(SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Eichel)), &ruleset),
        Err(EEngineError::IllegalBid{..}),
    ));
    assert_eq!(gamepreparations.announce_game(EPI3, None, &ruleset), Ok(None));
    assert_eq!(gamepreparations.which_player_can_do_something(), Some(EPI0));
    assert_eq!(gamepreparations.announce_game(EPI0, None, &ruleset), Ok(None));
    assert_eq!(gamepreparations.which_player_can_do_something(), None);
    let round = unwrap!(unwrap!(gamepreparations.finish()));
    assert_eq!(round.announcement, SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Blatt));
    assert_eq!(round.oepi_decider, Some(EPI2));
    assert_eq!(round.which_player_can_do_something(), Some(EPI1));
    assert_eq!(round.playergroups.group_of(EPI2), &[EPI2]);
}

#[test]
fn test_bidding_wenz_ends_immediately() {
    use EPlayerIndex::*;
    let ruleset = SRuleSet::default();
    let mut gamepreparations = SGamePreparations::new(ahand_sorted(), EPI0);
    assert_eq!(
        gamepreparations.announce_game(EPI0, Some(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Eichel)), &ruleset),
        Ok(Some(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz))),
    );
    assert_eq!(gamepreparations.which_player_can_do_something(), None);
    assert_eq!(gamepreparations.announce_game(EPI1, None, &ruleset), Err(EEngineError::NotPlayersTurn{epi: EPI1}));
    let round = unwrap!(unwrap!(gamepreparations.finish()));
    assert_eq!(round.trumpfdecider.trumpfs_in_ascending_order().len(), 4);
}

#[test]
fn test_bidding_disabled_mode() {
    use EPlayerIndex::*;
    let mut ruleset = SRuleSet::default();
    ruleset.maperoundmodeb_allowed[ERoundMode::Wenz] = false;
    let mut gamepreparations = SGamePreparations::new(ahand_sorted(), EPI0);
    assert!(matches!(
        gamepreparations.announce_game(EPI0, Some(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz)), &ruleset),
        Err(EEngineError::IllegalBid{..}),
    ));
    assert_eq!(gamepreparations.gameannouncements.size(), 0);
}

#[test]
fn test_bidding_all_pass_is_ramsch() {
    let ruleset = SRuleSet::default();
    let mut gamepreparations = SGamePreparations::new(ahand_sorted(), EPlayerIndex::EPI3);
    while let Some(epi) = gamepreparations.which_player_can_do_something() {
        assert_eq!(gamepreparations.announce_game(epi, None, &ruleset), Ok(None));
    }
    let round = unwrap!(unwrap!(gamepreparations.finish()));
    assert_eq!(round.announcement, SGameAnnouncement::ramsch());
    assert_eq!(round.oepi_decider, None);
    assert_eq!(round.playergroups.groups().len(), 4);
}

#[test]
fn test_round_pause_and_lead() {
    use crate::primitives::card::card_values::*;
    use EPlayerIndex::*;
    let mut round = unwrap!(SRound::new(ahand_sorted(), SGameAnnouncement::ramsch(), None, EPI0));
    assert_eq!(round.zugeben(EPI1, H7), Err(EEngineError::NotPlayersTurn{epi: EPI1}));
    assert_eq!(round.zugeben(EPI0, H7), Err(EEngineError::CardNotInHand{epi: EPI0, card: H7}));
    assert_eq!(round.zugeben(EPI0, S7), Ok(None));
    assert!(!round.ahand[EPI0].contains(S7));
    assert_eq!(round.zugeben(EPI1, H7), Ok(None));
    assert_eq!(round.zugeben(EPI2, B7), Ok(None));
    let stichcompleted = unwrap!(unwrap!(round.zugeben(EPI3, E7)));
    assert_eq!(stichcompleted.epi_winner, EPI1); // H7 is trump in Ramsch
    assert!(round.is_paused());
    assert_eq!(round.which_player_can_do_something(), None);
    assert_eq!(
        round.zugeben(EPI1, H8),
        Err(EEngineError::InvalidActionForState{str_action: "play_card", egamestate: EGameState::Round}),
    );
    assert_eq!(round.begin_next_stich(), Ok(EPI1));
    assert!(round.begin_next_stich().is_err());
    assert_eq!(round.which_player_can_do_something(), Some(EPI1));
    assert!(round.clone().finish().is_err());
}
