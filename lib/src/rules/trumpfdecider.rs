use crate::error::EEngineError;
use crate::primitives::*;
use crate::rules::*;
use crate::util::*;
use arrayvec::ArrayVec;
use itertools::Itertools;

/// Longest possible trump list: six suit cards, four Unter, four Ober.
pub const N_TRUMPF_MAX : usize = 14;

pub type STrumpfVector = ArrayVec<SCard, N_TRUMPF_MAX>;

/// Trumps of a round, weakest first.
pub fn trump_list(announcement: &SGameAnnouncement) -> Result<STrumpfVector, EEngineError> {
    let itcard_schlag = |eschlag| EFarbe::values().map(move |efarbe| SCard::new(efarbe, eschlag));
    let mut veccard_trumpf = STrumpfVector::new();
    if let Some(efarbe_trumpf) = announcement.trumpf_farbe() {
        let b_ober_elevated = ERoundMode::FarbWenz!=announcement.eroundmode;
        veccard_trumpf.extend(
            ESchlag::values()
                .filter(|&eschlag| eschlag!=ESchlag::Unter && !(b_ober_elevated && eschlag==ESchlag::Ober))
                .map(|eschlag| SCard::new(efarbe_trumpf, eschlag))
        );
        veccard_trumpf.extend(itcard_schlag(ESchlag::Unter));
        if b_ober_elevated {
            veccard_trumpf.extend(itcard_schlag(ESchlag::Ober));
        }
    } else {
        veccard_trumpf.extend(itcard_schlag(ESchlag::Unter));
    }
    if !veccard_trumpf.iter().all_unique() {
        return Err(EEngineError::invariant_violation(format!("duplicate trump in {:?}", veccard_trumpf)));
    }
    Ok(veccard_trumpf)
}

/// Decides trump membership and card precedence for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct STrumpfDecider {
    veccard_trumpf: STrumpfVector,
}

impl STrumpfDecider {
    pub fn new(announcement: &SGameAnnouncement) -> Result<Self, EEngineError> {
        Ok(STrumpfDecider {
            veccard_trumpf: trump_list(announcement)?,
        })
    }

    pub fn trumpfs_in_ascending_order(&self) -> &[SCard] {
        &self.veccard_trumpf
    }

    /// Position in the trump list, higher is stronger.
    pub fn trumpf_index(&self, card: SCard) -> Option<usize> {
        self.veccard_trumpf.iter().position(|&card_trumpf| card_trumpf==card)
    }

    pub fn is_trumpf(&self, card: SCard) -> bool {
        self.trumpf_index(card).is_some()
    }

    /// Returns whichever card wins if `card_top` is played onto the provisional winner `card_bottom`.
    pub fn compare_cards(&self, card_bottom: SCard, card_top: SCard) -> Result<SCard, EEngineError> {
        Ok(match (self.trumpf_index(card_bottom), self.trumpf_index(card_top)) {
            (None, None) => {
                if card_top.farbe()==card_bottom.farbe() && card_bottom.schlag() < card_top.schlag() {
                    card_top
                } else {
                    card_bottom
                }
            },
            (Some(_), None) => card_bottom,
            (None, Some(_)) => card_top,
            (Some(i_bottom), Some(i_top)) => {
                if i_bottom==i_top {
                    return Err(EEngineError::invariant_violation(format!("{} and {} share trump precedence {}", card_bottom, card_top, i_bottom)));
                }
                if i_bottom < i_top {card_top} else {card_bottom}
            },
        })
    }

    /// Folds all cards played so far into the provisional winner.
    pub fn winner_card(&self, stich: &SStich) -> Result<SCard, EEngineError> {
        let mut itcard = stich.cards();
        let card_first = itcard.next().ok_or(EEngineError::IncompleteTrick)?;
        itcard.try_fold(card_first, |card_bottom, card_top| self.compare_cards(card_bottom, card_top))
    }

    /// Winner after the second, third, ... card, in play order.
    pub fn provisional_winners(&self, stich: &SStich) -> Result<Vec<SCard>, EEngineError> {
        let mut itcard = stich.cards();
        let mut card_winner = itcard.next().ok_or(EEngineError::IncompleteTrick)?;
        let mut veccard_winner = Vec::new();
        for card in itcard {
            card_winner = self.compare_cards(card_winner, card)?;
            veccard_winner.push(card_winner);
        }
        Ok(veccard_winner)
    }

    pub fn winner_index(&self, stich: &SStich) -> Result<EPlayerIndex, EEngineError> {
        let card_winner = self.winner_card(stich)?;
        stich.iter()
            .find(|&(_epi, card)| *card==card_winner)
            .map(|(epi, _card)| epi)
            .ok_or_else(|| EEngineError::invariant_violation(format!("winner {} not in {}", card_winner, stich)))
    }
}

pub fn winning_card(stich: &SStich, announcement: &SGameAnnouncement) -> Result<SCard, EEngineError> {
    STrumpfDecider::new(announcement)?.winner_card(stich)
}

#[cfg(test)]
fn assert_trump_list(eroundmode: ERoundMode, efarbe: EFarbe, str_trumpf: &str) {
    use crate::primitives::cardvector::parse_cards;
    assert_eq!(
        unwrap!(trump_list(&SGameAnnouncement::new(eroundmode, efarbe))).as_slice(),
        unwrap!(parse_cards::<Vec<_>>(str_trumpf)).as_slice(),
        "{:?} {:?}", eroundmode, efarbe,
    );
}

#[test]
fn test_trump_list() {
    const STR_TRUMPF_HERZ : &str = "H7 H8 H9 HK HZ HA SU HU BU EU SO HO BO EO";
    for efarbe in EFarbe::values() {
        assert_trump_list(ERoundMode::Sauspiel, efarbe, STR_TRUMPF_HERZ);
        assert_trump_list(ERoundMode::Ramsch, efarbe, STR_TRUMPF_HERZ);
        assert_trump_list(ERoundMode::Wenz, efarbe, "SU HU BU EU");
    }
    assert_trump_list(ERoundMode::FarbSolo, EFarbe::Herz, STR_TRUMPF_HERZ);
    assert_trump_list(ERoundMode::FarbSolo, EFarbe::Schelln, "S7 S8 S9 SK SZ SA SU HU BU EU SO HO BO EO");
    assert_trump_list(ERoundMode::FarbWenz, EFarbe::Blatt, "B7 B8 B9 BO BK BZ BA SU HU BU EU");
}

#[test]
fn test_trump_list_lengths() {
    for (eroundmode, efarbe) in itertools::iproduct!(ERoundMode::values(), EFarbe::values()) {
        let veccard_trumpf = unwrap!(trump_list(&SGameAnnouncement::new(eroundmode, efarbe)));
        assert!(veccard_trumpf.iter().all_unique());
        assert_eq!(
            veccard_trumpf.len(),
            match eroundmode {
                ERoundMode::Ramsch | ERoundMode::Sauspiel | ERoundMode::FarbSolo => 14,
                ERoundMode::FarbWenz => 11,
                ERoundMode::Wenz => 4,
            },
        );
    }
}

#[cfg(test)]
fn assert_stich_scenario(eroundmode: ERoundMode, efarbe: EFarbe, str_stich: &str, str_winners: &str) {
    use crate::primitives::cardvector::parse_cards;
    let stich = unwrap!(SStich::new_from_cards(EPlayerIndex::EPI0, unwrap!(parse_cards::<Vec<_>>(str_stich))));
    let trumpfdecider = unwrap!(STrumpfDecider::new(&SGameAnnouncement::new(eroundmode, efarbe)));
    let veccard_winner = unwrap!(trumpfdecider.provisional_winners(&stich));
    assert_eq!(veccard_winner, unwrap!(parse_cards::<Vec<_>>(str_winners)), "{} in {:?} {:?}", str_stich, eroundmode, efarbe);
    assert_eq!(Some(&unwrap!(trumpfdecider.winner_card(&stich))), veccard_winner.last());
}

#[test]
fn test_stich_sauspiel() {
    let test = |str_stich, str_winners| assert_stich_scenario(ERoundMode::Sauspiel, EFarbe::Herz, str_stich, str_winners);
    test("EK BZ HA SU", "EK HA SU");
    test("S7 BZ H9 EO", "S7 H9 EO");
    test("B9 B8 SA EK", "B9 B9 B9");
    test("B9 BZ SA EK", "BZ BZ BZ");
    test("EA EK EU BA", "EA EU EU");
    test("H7 SU BZ H9", "SU SU SU");
    test("H7 SU EO H9", "SU EO EO");
    test("B8 B9 BZ BK", "B9 BZ BZ");
}

#[test]
fn test_stich_solo() {
    let test = |efarbe, str_stich, str_winners| assert_stich_scenario(ERoundMode::FarbSolo, efarbe, str_stich, str_winners);
    test(EFarbe::Blatt, "S7 BZ H9 EO", "BZ BZ EO");
    test(EFarbe::Blatt, "B9 B8 SA EK", "B9 B9 B9");
    test(EFarbe::Eichel, "B9 B8 SA EK", "B9 B9 EK");
    test(EFarbe::Eichel, "E9 EU EA BA", "EU EU EU");
    test(EFarbe::Schelln, "B9 BZ SA EK", "BZ SA SA");
    test(EFarbe::Schelln, "H7 BZ H9 SU", "H7 H9 SU");
    test(EFarbe::Schelln, "E7 BZ H9 SU", "E7 E7 SU");
}

#[test]
fn test_stich_wenz() {
    let test = |str_stich, str_winners| assert_stich_scenario(ERoundMode::Wenz, EFarbe::Herz, str_stich, str_winners);
    test("S7 BZ H9 EO", "S7 S7 S7");
    test("BZ BK SO HU", "BZ BZ HU");
    test("B9 BZ SA EK", "BZ BZ BZ");
    test("EA EK EU HO", "EA EU EU");
    // Ober is a plain suit card below Koenig.
    test("S9 HZ SO SK", "S9 SO SK");
    test("S9 SK SO SZ", "SK SK SZ");
    test("S9 SA SO SZ", "SA SA SA");
    test("S9 EO SO SZ", "S9 SO SZ");
}

#[test]
fn test_stich_farbwenz() {
    let test = |str_stich, str_winners| assert_stich_scenario(ERoundMode::FarbWenz, EFarbe::Eichel, str_stich, str_winners);
    test("EO SU E7 HA", "SU SU SU");
    test("HA EO HO EA", "EO EO EA");
    test("S7 SO SK HU", "SO SK HU");
}

#[test]
fn test_play_order_matters() {
    use crate::primitives::cardvector::parse_cards;
    let trumpfdecider = unwrap!(STrumpfDecider::new(&SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Herz)));
    let veccard = unwrap!(parse_cards::<Vec<_>>("B9 B8 SA EK"));
    let stich = unwrap!(SStich::new_from_cards(EPlayerIndex::EPI0, veccard.iter().copied()));
    let stich_reversed = unwrap!(SStich::new_from_cards(EPlayerIndex::EPI0, veccard.iter().rev().copied()));
    assert_eq!(trumpfdecider.winner_card(&stich), Ok(card_values::B9));
    assert_eq!(trumpfdecider.winner_card(&stich_reversed), Ok(card_values::EK));
    assert_eq!(trumpfdecider.winner_index(&stich), Ok(EPlayerIndex::EPI0));
    assert_eq!(trumpfdecider.winner_index(&stich_reversed), Ok(EPlayerIndex::EPI0));
}

#[test]
fn test_incomplete_and_partial() {
    use crate::primitives::card::card_values::*;
    let trumpfdecider = unwrap!(STrumpfDecider::new(&SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Eichel)));
    let mut stich = SStich::new(EPlayerIndex::EPI1);
    assert_eq!(trumpfdecider.winner_card(&stich), Err(EEngineError::IncompleteTrick));
    unwrap!(stich.add_card(EA));
    assert_eq!(trumpfdecider.winner_card(&stich), Ok(EA));
    assert_eq!(trumpfdecider.provisional_winners(&stich), Ok(Vec::new()));
    unwrap!(stich.add_card(H7));
    assert_eq!(trumpfdecider.winner_index(&stich), Ok(EPlayerIndex::EPI2));
    assert!(matches!(trumpfdecider.compare_cards(HO, HO), Err(EEngineError::InvariantViolation{..})));
    assert_eq!(winning_card(&stich, &SGameAnnouncement::ramsch()), Ok(H7));
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::subsequence;

    fn announcement_strategy() -> impl Strategy<Value=SGameAnnouncement> {
        (0..ERoundMode::SIZE, 0..EFarbe::SIZE).prop_map(|(i_eroundmode, i_efarbe)| SGameAnnouncement::new(
            ERoundMode::wrapped_from_usize(i_eroundmode),
            EFarbe::wrapped_from_usize(i_efarbe),
        ))
    }

    proptest! {
        #[test]
        fn winner_is_member_of_stich(
            announcement in announcement_strategy(),
            veccard in subsequence(SCard::values().collect::<Vec<_>>(), 4).prop_shuffle(),
            i_epi_first in 0..EPlayerIndex::SIZE,
        ) {
            let stich = unwrap!(SStich::new_from_cards(EPlayerIndex::wrapped_from_usize(i_epi_first), veccard.iter().copied()));
            let trumpfdecider = unwrap!(STrumpfDecider::new(&announcement));
            let card_winner = unwrap!(trumpfdecider.winner_card(&stich));
            prop_assert!(veccard.contains(&card_winner));
            let epi_winner = unwrap!(trumpfdecider.winner_index(&stich));
            prop_assert_eq!(stich.get(epi_winner), Some(&card_winner));
            if veccard.iter().any(|&card| trumpfdecider.is_trumpf(card)) {
                prop_assert!(trumpfdecider.is_trumpf(card_winner));
            } else {
                prop_assert_eq!(card_winner.farbe(), veccard[0].farbe());
            }
        }
    }
}
