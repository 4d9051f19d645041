use crate::primitives::card::*;
use crate::util::*;
use arrayvec::ArrayVec;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

pub type SHandVector = ArrayVec<SCard, N_CARDS_PER_PLAYER>;

/// Cards held by one player. Cards keep the order in which they were dealt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
#[serde(transparent)]
pub struct SHand {
    veccard: SHandVector,
}

impl SHand {
    fn assert_invariant(&self) {
        debug_assert!(self.veccard.iter().all_unique(), "{:?}", self.veccard);
    }

    pub fn new_from_iter(itcard: impl IntoIterator<Item=SCard>) -> SHand {
        let hand = SHand {
            veccard: itcard.into_iter().collect(),
        };
        hand.assert_invariant();
        hand
    }
    pub fn contains(&self, card_check: SCard) -> bool {
        self.contains_pred(|&card| card==card_check)
    }
    pub fn contains_pred(&self, pred: impl Fn(&SCard)->bool) -> bool {
        self.veccard
            .iter()
            .any(pred)
    }
    /// Removes `card`, which must be in the hand.
    pub fn play_card(&mut self, card: SCard) {
        let i_card = unwrap!(self.veccard.iter().position(|&card_hand| card_hand==card));
        self.veccard.remove(i_card);
        self.assert_invariant();
    }
    pub fn cards(&self) -> &SHandVector {
        &self.veccard
    }
    pub fn is_empty(&self) -> bool {
        self.veccard.is_empty()
    }
}

impl fmt::Display for SHand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.veccard.iter().join(" "))
    }
}

#[test]
fn test_hand() {
    use super::card::card_values::*;
    let hand = SHand::new_from_iter([EU, HK, S7]);
    let hand2 = {
        let mut hand2 = hand.clone();
        hand2.play_card(SCard::new(EFarbe::Herz, ESchlag::Koenig));
        hand2
    };
    assert_eq!(hand.cards().len()-1, hand2.cards().len());
    assert!(hand2.contains(EU));
    assert!(hand2.contains(S7));
    assert!(!hand2.contains(HK));
    assert_eq!(hand2.to_string(), "EU S7");
    assert!(SHand::default().is_empty());
}

#[test]
#[should_panic]
fn test_play_card_not_in_hand() {
    use super::card::card_values::*;
    let mut hand = SHand::new_from_iter([EU, HK, S7]);
    hand.play_card(EA);
}
