use crate::error::EEngineError;
use crate::primitives::{card::*, eplayerindex::*};
use crate::util::*;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Cards of one trick in play order, each attributed to the seat that played it.
pub type SStich = SPlayersInRound<SCard>;

impl SStich {
    pub fn add_card(&mut self, card: SCard) -> Result<(), EEngineError> {
        if self.is_full() {
            return Err(EEngineError::TrickFull);
        }
        self.push(card);
        Ok(())
    }
    pub fn is_complete(&self) -> bool {
        self.is_full()
    }
    pub fn cards(&self) -> impl Iterator<Item=SCard>+'_ {
        self.iter().map(|(_epi, card)| *card)
    }
    pub fn new_from_cards(epi_first: EPlayerIndex, itcard: impl IntoIterator<Item=SCard>) -> Result<SStich, EEngineError> {
        let mut stich = SStich::new(epi_first);
        for card in itcard {
            stich.add_card(card)?;
        }
        Ok(stich)
    }
}

impl fmt::Display for SStich {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iter().map(|(epi, card)| format!("{}:{}", epi, card)).join(" "))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, new)]
pub struct SCompletedStich {
    pub stich: SStich,
    pub epi_winner: EPlayerIndex,
}

#[test]
fn test_add_card() {
    use crate::primitives::card::card_values::*;
    let mut stich = SStich::new(EPlayerIndex::EPI3);
    for card in [EK, BZ, HA] {
        unwrap!(stich.add_card(card));
        assert!(!stich.is_complete());
    }
    assert_eq!(stich.current_playerindex(), Some(EPlayerIndex::EPI2));
    unwrap!(stich.add_card(SU));
    assert!(stich.is_complete());
    assert_eq!(stich.add_card(S7), Err(EEngineError::TrickFull));
    assert_eq!(stich.size(), 4);
    assert_eq!(stich.get(EPlayerIndex::EPI0), Some(&BZ));
    assert_eq!(stich.to_string(), "3:EK 0:BZ 1:HA 2:SU");
}
