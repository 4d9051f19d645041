use crate::error::EEngineError;
use crate::game::{event::*, scoreboard::*, view::*, *};
use crate::primitives::*;
use crate::rules::{card_points::*, ruleset::*, *};
use crate::util::*;
use arrayvec::ArrayVec;
use rand::{rngs::StdRng, SeedableRng};
use std::{fmt, mem};

#[derive(Debug, Clone)]
pub enum VGamePhase {
    Waiting,
    GameRunning,
    PreRound(SGamePreparations),
    Round(SRound),
    RoundFinished(SRoundResult),
}

impl VGamePhase {
    pub fn egamestate(&self) -> EGameState {
        match self {
            VGamePhase::Waiting => EGameState::Waiting,
            VGamePhase::GameRunning => EGameState::GameRunning,
            VGamePhase::PreRound(_) => EGameState::PreRound,
            VGamePhase::Round(_) => EGameState::Round,
            VGamePhase::RoundFinished(_) => EGameState::RoundFinished,
        }
    }
}

pub type SGameEvents<PlayerId> = Vec<VGameEvent<PlayerId>>;

/// The single authority over one table: seats, phase, scoreboard and the shuffling generator.
/// Every action either applies completely and reports its events, or fails and changes nothing.
#[derive(Debug, Clone)]
pub struct SGameTable<PlayerId> {
    ruleset: SRuleSet,
    vecplayerid: ArrayVec<PlayerId, {EPlayerIndex::SIZE}>,
    gamephase: VGamePhase,
    epi_starter: EPlayerIndex, // starter of the current (or most recent) round
    scoreboard: SScoreBoard,
    rng: StdRng,
}

impl<PlayerId: Clone + Eq + fmt::Debug> SGameTable<PlayerId> {
    pub fn new(ruleset: SRuleSet) -> Self {
        let rng = match ruleset.on_seed {
            Some(n_seed) => {
                info!("SGameTable: Shuffling with seed {}", n_seed);
                StdRng::seed_from_u64(n_seed)
            },
            None => StdRng::from_os_rng(),
        };
        SGameTable {
            ruleset,
            vecplayerid: ArrayVec::new(),
            gamephase: VGamePhase::Waiting,
            epi_starter: EPlayerIndex::EPI0,
            scoreboard: SScoreBoard::default(),
            rng,
        }
    }

    fn transact(
        &mut self,
        str_action: &'static str,
        fn_action: impl FnOnce(&mut Self, &mut SGameEvents<PlayerId>) -> Result<(), EEngineError>,
    ) -> Result<SGameEvents<PlayerId>, EEngineError> {
        let mut table = self.clone();
        let mut vecevent = SGameEvents::new();
        match fn_action(&mut table, &mut vecevent) {
            Ok(()) => {
                debug!("{} accepted: {:?}", str_action, vecevent);
                *self = table;
                Ok(vecevent)
            },
            Err(err) => {
                if let EEngineError::InvariantViolation{..} = err {
                    error!("{} failed: {}", str_action, err);
                } else {
                    warn!("{} rejected: {}", str_action, err);
                }
                Err(err)
            },
        }
    }

    fn invalid_action(&self, str_action: &'static str) -> EEngineError {
        EEngineError::InvalidActionForState {
            str_action,
            egamestate: self.state(),
        }
    }

    fn require_seat(&self, playerid: &PlayerId) -> Result<EPlayerIndex, EEngineError> {
        self.seat_of(playerid).ok_or_else(|| EEngineError::UnknownPlayer{str_player: format!("{:?}", playerid)})
    }

    fn set_phase(&mut self, gamephase: VGamePhase, vecevent: &mut SGameEvents<PlayerId>) {
        let egamestate = gamephase.egamestate();
        info!("SGameTable: {} -> {}", self.state(), egamestate);
        self.gamephase = gamephase;
        vecevent.push(VGameEvent::StateChanged{egamestate});
    }

    fn start_pre_round(&mut self, vecevent: &mut SGameEvents<PlayerId>) {
        let ahand = deal_cards(&mut self.rng);
        self.epi_starter = self.epi_starter.wrapping_add(1);
        let vecevent_hand = EPlayerIndex::values()
            .map(|epi| VGameEvent::HandChanged{epi, hand: ahand[epi].clone()})
            .collect::<Vec<_>>();
        self.set_phase(VGamePhase::PreRound(SGamePreparations::new(ahand, self.epi_starter)), vecevent);
        info!("SGameTable: Round started by {}", self.epi_starter);
        vecevent.extend(vecevent_hand);
        vecevent.push(VGameEvent::TurnChanged{epi: self.epi_starter});
    }

    fn start_round(&mut self, vecevent: &mut SGameEvents<PlayerId>) -> Result<(), EEngineError> {
        let round = match mem::replace(&mut self.gamephase, VGamePhase::Waiting) {
            VGamePhase::PreRound(gamepreparations) => match gamepreparations.finish() {
                Ok(resround) => resround?,
                Err(_gamepreparations) => return Err(EEngineError::invariant_violation("bidding has not ended")),
            },
            gamephase => return Err(EEngineError::invariant_violation(format!("start_round in {}", gamephase.egamestate()))),
        };
        let epi_first = unwrap!(round.current_stich()).first_playerindex();
        info!("SGameTable: Playing {} (decider {:?})", round.announcement, round.oepi_decider);
        vecevent.push(VGameEvent::RoundModeFixed{
            announcement: round.announcement,
            oepi_decider: round.oepi_decider,
        });
        self.set_phase(VGamePhase::Round(round), vecevent);
        vecevent.push(VGameEvent::TrickStarted{epi_first});
        vecevent.push(VGameEvent::TurnChanged{epi: epi_first});
        Ok(())
    }

    fn begin_next_stich(&mut self, vecevent: &mut SGameEvents<PlayerId>) -> Result<(), EEngineError> {
        let epi_first = match &mut self.gamephase {
            VGamePhase::Round(round) => round.begin_next_stich()?,
            _ => return Err(self.invalid_action("end_trick_pause")),
        };
        vecevent.push(VGameEvent::TrickStarted{epi_first});
        vecevent.push(VGameEvent::TurnChanged{epi: epi_first});
        Ok(())
    }

    fn finish_round(&mut self, vecevent: &mut SGameEvents<PlayerId>) -> Result<(), EEngineError> {
        let roundresult = match mem::replace(&mut self.gamephase, VGamePhase::Waiting) {
            VGamePhase::Round(round) => match round.finish() {
                Ok(resroundresult) => resroundresult?,
                Err(_round) => return Err(EEngineError::invariant_violation("round has not ended")),
            },
            gamephase => return Err(EEngineError::invariant_violation(format!("finish_round in {}", gamephase.egamestate()))),
        };
        info!("SGameTable: Round finished: {:?}", roundresult.scoreboardrow.an_points);
        self.scoreboard.push_row(roundresult.scoreboardrow.clone());
        vecevent.push(VGameEvent::ScoreBoardRowAppended{scoreboardrow: roundresult.scoreboardrow.clone()});
        self.set_phase(VGamePhase::RoundFinished(roundresult), vecevent);
        Ok(())
    }

    /// Seats `playerid` at the next free seat. The fourth player starts the game.
    pub fn join(&mut self, playerid: PlayerId) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("join", move |table, vecevent| {
            if EGameState::Waiting!=table.state() {
                return Err(table.invalid_action("join"));
            }
            if table.seat_of(&playerid).is_some() {
                return Err(EEngineError::PlayerAlreadySeated{str_player: format!("{:?}", playerid)});
            }
            let epi = EPlayerIndex::wrapped_from_usize(table.vecplayerid.len());
            info!("SGameTable: {:?} takes seat {}", playerid, epi);
            table.vecplayerid.push(playerid.clone());
            vecevent.push(VGameEvent::PlayerSeated{playerid, epi});
            if table.vecplayerid.is_full() {
                table.epi_starter = EPlayerIndex::EPI3; // first round is started by seat 0
                table.set_phase(VGamePhase::GameRunning, vecevent);
            }
            Ok(())
        })
    }

    pub fn advance_to_pre_round(&mut self) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("advance_to_pre_round", |table, vecevent| {
            if EGameState::GameRunning!=table.state() {
                return Err(table.invalid_action("advance_to_pre_round"));
            }
            table.start_pre_round(vecevent);
            Ok(())
        })
    }

    pub fn advance_to_next_round(&mut self) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("advance_to_next_round", |table, vecevent| {
            if EGameState::RoundFinished!=table.state() {
                return Err(table.invalid_action("advance_to_next_round"));
            }
            table.start_pre_round(vecevent);
            Ok(())
        })
    }

    /// `oannouncement==None` means Weiter.
    pub fn submit_bid(&mut self, playerid: &PlayerId, oannouncement: Option<SGameAnnouncement>) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("submit_bid", |table, vecevent| {
            let epi = table.require_seat(playerid)?;
            let egamestate = table.state();
            let gamepreparations = match &mut table.gamephase {
                VGamePhase::PreRound(gamepreparations) => gamepreparations,
                _ => return Err(EEngineError::InvalidActionForState{str_action: "submit_bid", egamestate}),
            };
            let oannouncement = gamepreparations.announce_game(epi, oannouncement, &table.ruleset)?;
            match oannouncement {
                None => info!("SGameTable: {} says Weiter", epi),
                Some(announcement) => info!("SGameTable: {} bids {}", epi, announcement),
            }
            vecevent.push(VGameEvent::BidSubmitted{epi, oannouncement});
            if let Some(epi_next) = gamepreparations.which_player_can_do_something() {
                vecevent.push(VGameEvent::TurnChanged{epi: epi_next});
                Ok(())
            } else {
                table.start_round(vecevent)
            }
        })
    }

    pub fn play_card(&mut self, playerid: &PlayerId, card: SCard) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("play_card", |table, vecevent| {
            let epi = table.require_seat(playerid)?;
            let egamestate = table.state();
            let round = match &mut table.gamephase {
                VGamePhase::Round(round) => round,
                _ => return Err(EEngineError::InvalidActionForState{str_action: "play_card", egamestate}),
            };
            let ostichcompleted = round.zugeben(epi, card)?;
            vecevent.push(VGameEvent::CardPlayed{epi, card});
            vecevent.push(VGameEvent::HandChanged{epi, hand: round.ahand[epi].clone()});
            match ostichcompleted {
                None => {
                    vecevent.push(VGameEvent::TurnChanged{epi: unwrap!(round.which_player_can_do_something())});
                },
                Some(stichcompleted) => {
                    let n_points = points_stich(&stichcompleted.stich)?;
                    info!("SGameTable: {} wins {} ({} points)", stichcompleted.epi_winner, stichcompleted.stich, n_points);
                    vecevent.push(VGameEvent::TrickCompleted{stichcompleted, n_points});
                    if round.is_finished() {
                        table.finish_round(vecevent)?;
                    } else if table.ruleset.trick_pause().is_zero() {
                        table.begin_next_stich(vecevent)?;
                    } else {
                        debug!("SGameTable: Pausing for {:?}", table.ruleset.trick_pause());
                    }
                },
            }
            Ok(())
        })
    }

    /// Called by the collaborator once `ruleset().trick_pause()` has elapsed after a trick.
    pub fn end_trick_pause(&mut self) -> Result<SGameEvents<PlayerId>, EEngineError> {
        self.transact("end_trick_pause", |table, vecevent| {
            table.begin_next_stich(vecevent)
        })
    }

    pub fn ruleset(&self) -> &SRuleSet {
        &self.ruleset
    }

    pub fn state(&self) -> EGameState {
        self.gamephase.egamestate()
    }

    pub fn phase(&self) -> &VGamePhase {
        &self.gamephase
    }

    pub fn seat_of(&self, playerid: &PlayerId) -> Option<EPlayerIndex> {
        self.vecplayerid.iter()
            .position(|playerid_seated| playerid_seated==playerid)
            .and_then(EPlayerIndex::checked_from_usize)
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.vecplayerid
    }

    pub fn which_player_can_do_something(&self) -> Option<EPlayerIndex> {
        match &self.gamephase {
            VGamePhase::PreRound(gamepreparations) => gamepreparations.which_player_can_do_something(),
            VGamePhase::Round(round) => round.which_player_can_do_something(),
            VGamePhase::Waiting | VGamePhase::GameRunning | VGamePhase::RoundFinished(_) => None,
        }
    }

    /// `None` outside trick play and during the pause between two tricks.
    pub fn current_stich(&self) -> Option<&SStich> {
        match &self.gamephase {
            VGamePhase::Round(round) => round.current_stich(),
            _ => None,
        }
    }

    pub fn completed_stichs(&self) -> &[SCompletedStich] {
        match &self.gamephase {
            VGamePhase::Round(round) => round.completed_stichs(),
            VGamePhase::RoundFinished(roundresult) => &roundresult.vecstichcompleted,
            VGamePhase::Waiting | VGamePhase::GameRunning | VGamePhase::PreRound(_) => &[],
        }
    }

    pub fn bids(&self) -> Option<&SGameAnnouncements> {
        if_then_some!(let VGamePhase::PreRound(gamepreparations)=&self.gamephase, &gamepreparations.gameannouncements)
    }

    /// Leading bid (Ramsch if none yet) while bidding, the fixed mode afterwards, with its decider.
    pub fn announcement(&self) -> Option<(SGameAnnouncement, Option<EPlayerIndex>)> {
        match &self.gamephase {
            VGamePhase::Waiting | VGamePhase::GameRunning => None,
            VGamePhase::PreRound(gamepreparations) => Some(match gamepreparations.leading_bid() {
                Some((epi, announcement)) => (announcement, Some(epi)),
                None => (SGameAnnouncement::ramsch(), None),
            }),
            VGamePhase::Round(round) => Some((round.announcement, round.oepi_decider)),
            VGamePhase::RoundFinished(roundresult) => Some((
                roundresult.scoreboardrow.announcement,
                roundresult.scoreboardrow.oepi_decider,
            )),
        }
    }

    pub fn round_starter(&self) -> Option<EPlayerIndex> {
        match self.state() {
            EGameState::Waiting | EGameState::GameRunning => None,
            EGameState::PreRound | EGameState::Round | EGameState::RoundFinished => Some(self.epi_starter),
        }
    }

    pub fn round_result(&self) -> Option<&SRoundResult> {
        if_then_some!(let VGamePhase::RoundFinished(roundresult)=&self.gamephase, roundresult)
    }

    pub fn scoreboard(&self) -> &SScoreBoard {
        &self.scoreboard
    }

    /// Server-side access to any hand. Hands only exist while bidding and playing.
    pub fn hand(&self, epi: EPlayerIndex) -> Option<&SHand> {
        match &self.gamephase {
            VGamePhase::PreRound(gamepreparations) => Some(&gamepreparations.ahand[epi]),
            VGamePhase::Round(round) => Some(&round.ahand[epi]),
            VGamePhase::Waiting | VGamePhase::GameRunning | VGamePhase::RoundFinished(_) => None,
        }
    }

    pub fn view_for(&self, playerid: &PlayerId) -> Result<SPlayerView<PlayerId>, EEngineError> {
        let epi = self.require_seat(playerid)?;
        let oannouncement = self.announcement();
        Ok(SPlayerView {
            epi,
            egamestate: self.state(),
            vecplayerid: self.vecplayerid.to_vec(),
            hand: self.hand(epi).cloned().unwrap_or_default(),
            an_cards_in_hand: EPlayerIndex::map_from_fn(|epi_other|
                self.hand(epi_other).map_or(0, |hand| hand.cards().len())
            ),
            oepi_turn: self.which_player_can_do_something(),
            oepi_round_starter: self.round_starter(),
            vectplepioannouncement: self.bids()
                .map(|gameannouncements| gameannouncements.iter()
                    .map(|(epi_bid, oannouncement)| (epi_bid, *oannouncement))
                    .collect()
                )
                .unwrap_or_default(),
            oannouncement: oannouncement.map(|(announcement, _oepi_decider)| announcement),
            oepi_decider: oannouncement.and_then(|(_announcement, oepi_decider)| oepi_decider),
            ostich_current: self.current_stich().cloned(),
            vecstichcompleted: self.completed_stichs().to_vec(),
            scoreboard: self.scoreboard.clone(),
        })
    }
}

#[cfg(test)]
fn seated_table(ruleset: SRuleSet) -> SGameTable<&'static str> {
    let mut table = SGameTable::new(ruleset);
    for str_player in ["anna", "bert", "carl", "dora"] {
        unwrap!(table.join(str_player));
    }
    table
}

#[cfg(test)]
fn ruleset_test(n_trick_pause_ms: u64) -> SRuleSet {
    SRuleSet {
        n_trick_pause_ms,
        on_seed: Some(1234),
        ..SRuleSet::default()
    }
}

#[cfg(test)]
fn player_at(table: &SGameTable<&'static str>, epi: EPlayerIndex) -> &'static str {
    table.players()[epi.to_usize()]
}

#[cfg(test)]
fn play_first_card_of_current_player(table: &mut SGameTable<&'static str>) -> Result<SGameEvents<&'static str>, EEngineError> {
    let epi = unwrap!(table.which_player_can_do_something());
    let card = unwrap!(table.hand(epi)).cards()[0];
    let playerid = player_at(table, epi);
    table.play_card(&playerid, card)
}

#[test]
fn test_seating() {
    let mut table = SGameTable::new(ruleset_test(0));
    assert_eq!(table.state(), EGameState::Waiting);
    assert_eq!(
        unwrap!(table.join("anna")),
        vec![VGameEvent::PlayerSeated{playerid: "anna", epi: EPlayerIndex::EPI0}],
    );
    assert_eq!(table.join("anna"), Err(EEngineError::PlayerAlreadySeated{str_player: "\"anna\"".to_owned()}));
    unwrap!(table.join("bert"));
    unwrap!(table.join("carl"));
    assert_eq!(table.advance_to_pre_round(), Err(EEngineError::InvalidActionForState{str_action: "advance_to_pre_round", egamestate: EGameState::Waiting}));
    assert_eq!(
        unwrap!(table.join("dora")),
        vec![
            VGameEvent::PlayerSeated{playerid: "dora", epi: EPlayerIndex::EPI3},
            VGameEvent::StateChanged{egamestate: EGameState::GameRunning},
        ],
    );
    assert_eq!(table.seat_of(&"carl"), Some(EPlayerIndex::EPI2));
    assert_eq!(table.seat_of(&"erna"), None);
    assert!(matches!(table.join("erna"), Err(EEngineError::InvalidActionForState{..})));
    assert_eq!(table.players(), &["anna", "bert", "carl", "dora"]);
    assert_eq!(table.round_starter(), None);
    assert!(matches!(table.submit_bid(&"erna", None), Err(EEngineError::UnknownPlayer{..})));
    assert!(matches!(table.submit_bid(&"anna", None), Err(EEngineError::InvalidActionForState{..})));
}

#[test]
fn test_full_round_without_pause() {
    let mut table = seated_table(ruleset_test(0));
    let vecevent = unwrap!(table.advance_to_pre_round());
    assert_eq!(vecevent[0], VGameEvent::StateChanged{egamestate: EGameState::PreRound});
    assert_eq!(vecevent.iter().filter(|event| !event.is_public()).count(), EPlayerIndex::SIZE);
    assert_eq!(vecevent.last(), Some(&VGameEvent::TurnChanged{epi: EPlayerIndex::EPI0}));
    assert_eq!(table.round_starter(), Some(EPlayerIndex::EPI0));
    assert_eq!(table.announcement(), Some((SGameAnnouncement::ramsch(), None)));
    for epi in EPlayerIndex::values() {
        assert_eq!(table.which_player_can_do_something(), Some(epi));
        unwrap!(table.submit_bid(&player_at(&table, epi), None));
    }
    assert_eq!(table.state(), EGameState::Round);
    assert_eq!(table.announcement(), Some((SGameAnnouncement::ramsch(), None)));
    assert_eq!(table.which_player_can_do_something(), Some(EPlayerIndex::EPI0));
    let mut n_tricks = 0;
    let mut vecevent_last = Vec::new();
    while EGameState::Round==table.state() {
        vecevent_last = unwrap!(play_first_card_of_current_player(&mut table));
        if let Some(VGameEvent::TrickCompleted{stichcompleted, ..}) = vecevent_last.iter().find(|event| matches!(event, VGameEvent::TrickCompleted{..})) {
            n_tricks += 1;
            if EGameState::Round==table.state() {
                // winner leads immediately
                assert_eq!(table.which_player_can_do_something(), Some(stichcompleted.epi_winner));
                assert_eq!(unwrap!(table.current_stich()).first_playerindex(), stichcompleted.epi_winner);
            }
        }
    }
    assert_eq!(n_tricks, N_CARDS_PER_PLAYER);
    assert_eq!(table.state(), EGameState::RoundFinished);
    assert_eq!(vecevent_last.last(), Some(&VGameEvent::StateChanged{egamestate: EGameState::RoundFinished}));
    assert_eq!(table.completed_stichs().len(), N_CARDS_PER_PLAYER);
    assert_eq!(table.scoreboard().rows().len(), 1);
    // Ramsch: nobody shares points
    assert_eq!(table.scoreboard().rows()[0].an_points.iter().sum::<isize>(), N_POINTS_TOTAL);
    assert_eq!(table.which_player_can_do_something(), None);
    assert!(table.hand(EPlayerIndex::EPI0).is_none());
    assert!(matches!(table.play_card(&"anna", card_values::EA), Err(EEngineError::InvalidActionForState{..})));

    let scoreboardrow_first = table.scoreboard().rows()[0].clone();
    unwrap!(table.advance_to_next_round());
    assert_eq!(table.state(), EGameState::PreRound);
    assert_eq!(table.round_starter(), Some(EPlayerIndex::EPI1));
    assert_eq!(table.which_player_can_do_something(), Some(EPlayerIndex::EPI1));
    assert!(table.completed_stichs().is_empty());
    assert_eq!(table.scoreboard().rows(), &[scoreboardrow_first]);
}

#[test]
fn test_round_starter_rotates() {
    use EPlayerIndex::*;
    let mut table = seated_table(ruleset_test(0));
    let vecepi_starter_expected = [EPI0, EPI1, EPI2, EPI3, EPI0, EPI1];
    for (i_round, epi_starter) in vecepi_starter_expected.iter().copied().enumerate() {
        if 0==i_round {
            unwrap!(table.advance_to_pre_round());
        } else {
            unwrap!(table.advance_to_next_round());
        }
        assert_eq!(table.round_starter(), Some(epi_starter));
        while let Some(epi) = table.which_player_can_do_something().filter(|_epi| EGameState::PreRound==table.state()) {
            unwrap!(table.submit_bid(&player_at(&table, epi), None));
        }
        assert_eq!(table.which_player_can_do_something(), Some(epi_starter)); // starter leads
        while EGameState::Round==table.state() {
            unwrap!(play_first_card_of_current_player(&mut table));
        }
        assert_eq!(table.scoreboard().rows().len(), i_round+1);
    }
    assert_eq!(
        table.scoreboard().totals().iter().sum::<isize>(),
        vecepi_starter_expected.iter().map(|_epi| N_POINTS_TOTAL).sum::<isize>(),
    );
}

#[test]
fn test_trick_pause() {
    let mut table = seated_table(ruleset_test(1500));
    unwrap!(table.advance_to_pre_round());
    for epi in EPlayerIndex::values() {
        unwrap!(table.submit_bid(&player_at(&table, epi), None));
    }
    assert!(matches!(table.end_trick_pause(), Err(EEngineError::InvalidActionForState{..})));
    for _ in 0..3 {
        let vecevent = unwrap!(play_first_card_of_current_player(&mut table));
        assert!(matches!(vecevent.last(), Some(VGameEvent::TurnChanged{..})));
    }
    let vecevent = unwrap!(play_first_card_of_current_player(&mut table));
    let epi_winner = match vecevent.last() {
        Some(VGameEvent::TrickCompleted{stichcompleted, n_points}) => {
            assert_eq!(Ok(*n_points), points_stich(&stichcompleted.stich));
            stichcompleted.epi_winner
        },
        event => panic!("unexpected {:?}", event),
    };
    assert_eq!(table.state(), EGameState::Round);
    assert_eq!(table.current_stich(), None);
    assert_eq!(table.which_player_can_do_something(), None);
    let card = unwrap!(table.hand(epi_winner)).cards()[0];
    let str_before = format!("{:?}", table);
    assert_eq!(
        table.play_card(&player_at(&table, epi_winner), card),
        Err(EEngineError::InvalidActionForState{str_action: "play_card", egamestate: EGameState::Round}),
    );
    assert_eq!(format!("{:?}", table), str_before);
    assert_eq!(
        unwrap!(table.end_trick_pause()),
        vec![
            VGameEvent::TrickStarted{epi_first: epi_winner},
            VGameEvent::TurnChanged{epi: epi_winner},
        ],
    );
    assert!(table.end_trick_pause().is_err());
    unwrap!(table.play_card(&player_at(&table, epi_winner), card));
}

#[test]
fn test_rejected_actions_leave_table_unchanged() {
    let mut table = seated_table(ruleset_test(0));
    unwrap!(table.advance_to_pre_round());
    let str_before = format!("{:?}", table);
    assert_eq!(table.submit_bid(&"bert", None), Err(EEngineError::NotPlayersTurn{epi: EPlayerIndex::EPI1}));
    assert!(matches!(table.play_card(&"anna", card_values::EA), Err(EEngineError::InvalidActionForState{..})));
    assert!(matches!(
        table.submit_bid(&"anna", Some(SGameAnnouncement::ramsch())),
        Err(EEngineError::IllegalBid{..}),
    ));
    assert_eq!(format!("{:?}", table), str_before);
    for epi in EPlayerIndex::values() {
        unwrap!(table.submit_bid(&player_at(&table, epi), None));
    }
    let str_before = format!("{:?}", table);
    let card_foreign = unwrap!(table.hand(EPlayerIndex::EPI1)).cards()[0];
    assert_eq!(
        table.play_card(&"anna", card_foreign),
        Err(EEngineError::CardNotInHand{epi: EPlayerIndex::EPI0, card: card_foreign}),
    );
    assert_eq!(table.play_card(&"bert", card_foreign), Err(EEngineError::NotPlayersTurn{epi: EPlayerIndex::EPI1}));
    assert_eq!(format!("{:?}", table), str_before);
}

#[test]
fn test_wenz_ends_bidding() {
    use EPlayerIndex::*;
    let mut table = seated_table(ruleset_test(0));
    unwrap!(table.advance_to_pre_round());
    unwrap!(table.submit_bid(&"anna", Some(SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Eichel))));
    assert_eq!(table.announcement(), Some((SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Eichel), Some(EPI0))));
    let vecevent = unwrap!(table.submit_bid(&"bert", Some(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Schelln))));
    assert_eq!(
        vecevent,
        vec![
            VGameEvent::BidSubmitted{epi: EPI1, oannouncement: Some(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz))},
            VGameEvent::RoundModeFixed{announcement: SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz), oepi_decider: Some(EPI1)},
            VGameEvent::StateChanged{egamestate: EGameState::Round},
            VGameEvent::TrickStarted{epi_first: EPI0},
            VGameEvent::TurnChanged{epi: EPI0},
        ],
    );
    assert_eq!(table.state(), EGameState::Round);
    while EGameState::Round==table.state() {
        unwrap!(play_first_card_of_current_player(&mut table));
    }
    let roundresult = unwrap!(table.round_result());
    assert_eq!(roundresult.playergroups.group_of(EPI1), &[EPI1]);
    let an_points = &table.scoreboard().rows()[0].an_points;
    assert_eq!(an_points[EPI0], an_points[EPI2]);
    assert_eq!(an_points[EPI0], an_points[EPI3]);
    assert_eq!(an_points[EPI0] + an_points[EPI1], N_POINTS_TOTAL);
}

#[test]
fn test_view() {
    let mut table = seated_table(ruleset_test(0));
    unwrap!(table.advance_to_pre_round());
    unwrap!(table.submit_bid(&"anna", None));
    let view = unwrap!(table.view_for(&"carl"));
    assert_eq!(view.epi, EPlayerIndex::EPI2);
    assert_eq!(&view.hand, unwrap!(table.hand(EPlayerIndex::EPI2)));
    assert_eq!(view.an_cards_in_hand, EPlayerIndex::map_from_fn(|_epi| N_CARDS_PER_PLAYER));
    assert_eq!(view.oepi_turn, Some(EPlayerIndex::EPI1));
    assert_eq!(view.vectplepioannouncement, vec![(EPlayerIndex::EPI0, None)]);
    let jsonval = unwrap!(serde_json::to_value(&view));
    assert_eq!(jsonval["egamestate"], serde_json::json!("PreRound"));
    assert_eq!(jsonval["vecplayerid"], serde_json::json!(["anna", "bert", "carl", "dora"]));
    assert_eq!(unwrap!(jsonval["hand"].as_array()).len(), N_CARDS_PER_PLAYER);
    assert!(matches!(table.view_for(&"erna"), Err(EEngineError::UnknownPlayer{..})));
}

#[test]
fn test_seeded_tables_deal_alike() {
    let mut table_a = seated_table(ruleset_test(0));
    let mut table_b = seated_table(ruleset_test(0));
    assert_eq!(unwrap!(table_a.advance_to_pre_round()), unwrap!(table_b.advance_to_pre_round()));
}
