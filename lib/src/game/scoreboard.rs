use crate::error::EEngineError;
use crate::primitives::*;
use crate::rules::{card_points::*, playerparties::*, *};
use crate::util::*;
use serde::Serialize;

/// Points per seat for one round: each seat gets the trick points won by any member of its group.
pub fn compute_round_scores(slcstichcompleted: &[SCompletedStich], playergroups: &SPlayerGroups) -> Result<EnumMap<EPlayerIndex, isize>, EEngineError> {
    let an_points_won = slcstichcompleted.iter()
        .map(|stichcompleted| Ok((stichcompleted.epi_winner, points_stich(&stichcompleted.stich)?)))
        .collect::<Result<Vec<_>, EEngineError>>()?
        .into_iter()
        .fold(
            EPlayerIndex::map_from_fn(|_epi| 0),
            mutate_return!(|an_points: &mut EnumMap<EPlayerIndex, isize>, (epi_winner, n_points): (EPlayerIndex, isize)| {
                an_points[epi_winner] += n_points;
            }),
        );
    if slcstichcompleted.len()==N_CARDS_PER_PLAYER {
        debug_assert_eq!(an_points_won.iter().sum::<isize>(), N_POINTS_TOTAL);
    }
    Ok(EPlayerIndex::map_from_fn(|epi|
        playergroups.group_of(epi).iter()
            .map(|&epi_member| an_points_won[epi_member])
            .sum()
    ))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, new)]
pub struct SScoreBoardRow {
    pub announcement: SGameAnnouncement,
    pub oepi_decider: Option<EPlayerIndex>,
    #[serde(serialize_with = "serialize_enummap")]
    pub an_points: EnumMap<EPlayerIndex, isize>,
}

/// One row per finished round. Rows cannot be altered once pushed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SScoreBoard {
    vecscoreboardrow: Vec<SScoreBoardRow>,
}

impl SScoreBoard {
    pub fn push_row(&mut self, scoreboardrow: SScoreBoardRow) {
        self.vecscoreboardrow.push(scoreboardrow);
    }
    pub fn rows(&self) -> &[SScoreBoardRow] {
        &self.vecscoreboardrow
    }
    pub fn totals(&self) -> EnumMap<EPlayerIndex, isize> {
        EPlayerIndex::map_from_fn(|epi|
            self.vecscoreboardrow.iter()
                .map(|scoreboardrow| scoreboardrow.an_points[epi])
                .sum()
        )
    }
}

#[cfg(test)]
fn stichcompleted(str_cards: &str, epi_winner: EPlayerIndex) -> SCompletedStich {
    use crate::primitives::cardvector::parse_cards;
    SCompletedStich::new(
        unwrap!(SStich::new_from_cards(EPlayerIndex::EPI0, unwrap!(parse_cards::<Vec<_>>(str_cards)))),
        epi_winner,
    )
}

#[test]
fn test_compute_round_scores() {
    use EPlayerIndex::*;
    let vecstichcompleted = vec![
        stichcompleted("EK BZ HA SU", EPI3), // 27
        stichcompleted("S7 BA H9 EO", EPI3), // 14
        stichcompleted("B9 B8 SA SK", EPI0), // 15
        stichcompleted("H7 H8 HK HZ", EPI1), // 14
    ];
    let playergroups_sauspiel = unwrap!(SPlayerGroups::new(vec![vec![EPI0, EPI3], vec![EPI1, EPI2]]));
    assert_eq!(
        unwrap!(compute_round_scores(&vecstichcompleted, &playergroups_sauspiel)),
        EPlayerIndex::map_from_raw([56, 14, 14, 56]),
    );
    let playergroups_ramsch = unwrap!(SPlayerGroups::new(EPlayerIndex::values().map(|epi| vec![epi]).collect()));
    assert_eq!(
        unwrap!(compute_round_scores(&vecstichcompleted, &playergroups_ramsch)),
        EPlayerIndex::map_from_raw([15, 14, 0, 41]),
    );
    let playergroups_solo = unwrap!(SPlayerGroups::new(vec![vec![EPI2], vec![EPI0, EPI1, EPI3]]));
    assert_eq!(
        unwrap!(compute_round_scores(&vecstichcompleted, &playergroups_solo)),
        EPlayerIndex::map_from_raw([70, 70, 0, 70]),
    );
}

#[test]
fn test_compute_round_scores_incomplete() {
    let stich = unwrap!(SStich::new_from_cards(EPlayerIndex::EPI0, [card_values::EK]));
    let playergroups = unwrap!(SPlayerGroups::new(vec![EPlayerIndex::values().collect()]));
    assert_eq!(
        compute_round_scores(&[SCompletedStich::new(stich, EPlayerIndex::EPI0)], &playergroups),
        Err(EEngineError::IncompleteTrick),
    );
}

#[test]
fn test_scoreboard() {
    let mut scoreboard = SScoreBoard::default();
    assert_eq!(scoreboard.totals(), EPlayerIndex::map_from_fn(|_epi| 0));
    scoreboard.push_row(SScoreBoardRow::new(SGameAnnouncement::ramsch(), None, EPlayerIndex::map_from_raw([30, 20, 40, 30])));
    let scoreboardrow_first = scoreboard.rows()[0].clone();
    scoreboard.push_row(SScoreBoardRow::new(
        SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz),
        Some(EPlayerIndex::EPI1),
        EPlayerIndex::map_from_raw([50, 70, 50, 50]),
    ));
    assert_eq!(scoreboard.rows().len(), 2);
    assert_eq!(scoreboard.rows()[0], scoreboardrow_first);
    assert_eq!(scoreboard.totals(), EPlayerIndex::map_from_raw([80, 90, 90, 80]));
    assert_eq!(
        unwrap!(serde_json::to_value(&scoreboard.rows()[0])),
        serde_json::json!({
            "announcement": {"eroundmode": "Ramsch", "efarbe": "Herz"},
            "oepi_decider": null,
            "an_points": [30, 20, 40, 30],
        }),
    );
}
