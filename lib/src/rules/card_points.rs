use crate::error::EEngineError;
use crate::primitives::*;

pub fn points_card(card: SCard) -> isize {
    match card.schlag() {
        ESchlag::S7 | ESchlag::S8 | ESchlag::S9 => 0,
        ESchlag::Unter => 2,
        ESchlag::Ober => 3,
        ESchlag::Koenig => 4,
        ESchlag::Zehn => 10,
        ESchlag::Ass => 11,
    }
}

/// Worth of a complete trick.
pub fn points_stich(stich: &SStich) -> Result<isize, EEngineError> {
    if !stich.is_complete() {
        return Err(EEngineError::IncompleteTrick);
    }
    Ok(stich.cards().map(points_card).sum())
}

pub const N_POINTS_TOTAL : isize = 120;

#[test]
fn test_points_deck() {
    assert_eq!(SCard::values().map(points_card).sum::<isize>(), N_POINTS_TOTAL);
}

#[test]
fn test_points_stich() {
    use crate::primitives::card::card_values::*;
    let mut stich = SStich::new(EPlayerIndex::EPI0);
    for card in [EK, BZ, HA] {
        assert!(stich.add_card(card).is_ok());
        assert_eq!(points_stich(&stich), Err(EEngineError::IncompleteTrick));
    }
    assert!(stich.add_card(SU).is_ok());
    assert_eq!(points_stich(&stich), Ok(4+10+11+2));
}
