use crate::util::*;
use arrayvec::{self, ArrayVec};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use serde_repr::Serialize_repr;
use std::{fmt, slice, str::FromStr};

plain_enum_mod!(modepi, derive(Serialize_repr, Hash,), map_derive(), EPlayerIndex {
    EPI0, EPI1, EPI2, EPI3,
});
impl fmt::Display for EPlayerIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_usize())
    }
}
impl FromStr for EPlayerIndex {
    type Err = &'static str;
    fn from_str(str_epi: &str) -> Result<Self, Self::Err> {
        usize::from_str(str_epi).ok()
            .and_then(|n_epi| {
                EPlayerIndex::checked_from_usize(n_epi)
            })
            .ok_or("Could not convert to EPlayerIndex")
    }
}

/// Serializes an `EnumMap` keyed by seat as a plain sequence in seat order.
/// Intended for `#[serde(serialize_with = "...")]`.
pub fn serialize_enummap<T: Serialize, S: Serializer>(mapepit: &EnumMap<EPlayerIndex, T>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(EPlayerIndex::values().map(|epi| &mapepit[epi]))
}

/// Up to one item per seat, in play order starting at `epi_first`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SPlayersInRound<T> {
    epi_first: EPlayerIndex,
    vect: ArrayVec<T, {EPlayerIndex::SIZE}>,
}

impl<T: fmt::Debug> fmt::Debug for SPlayersInRound<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for epi in EPlayerIndex::values() {
            if epi==self.epi_first {
                write!(f, ">")?;
            } else {
                write!(f, " ")?;
            }
            match self.get(epi) {
                None => {write!(f, "__")?;}
                Some(t) => {write!(f, "{t:?}")?;}
            }
        }
        Ok(())
    }
}

impl<T: Serialize> Serialize for SPlayersInRound<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut serializestruct = serializer.serialize_struct("SPlayersInRound", 2)?;
        serializestruct.serialize_field("epi_first", &self.epi_first)?;
        serializestruct.serialize_field("items", self.vect.as_slice())?;
        serializestruct.end()
    }
}

pub struct SPlayersInRoundIterator<InternalIter> {
    iter: InternalIter,
    n_epi: usize,
}

impl<InternalIter: Iterator> Iterator for SPlayersInRoundIterator<InternalIter> {
    type Item = (EPlayerIndex, InternalIter::Item);
    fn next(&mut self) -> Option<(EPlayerIndex, InternalIter::Item)> {
        let item_next = self.iter.next()
            .map(|t| (EPlayerIndex::wrapped_from_usize(self.n_epi), t));
        self.n_epi += 1;
        item_next
    }
}

impl<T> SPlayersInRound<T> {
    pub fn new(epi_first: EPlayerIndex) -> Self {
        SPlayersInRound {
            epi_first,
            vect: ArrayVec::new(),
        }
    }
    pub fn first_playerindex(&self) -> EPlayerIndex {
        self.epi_first
    }
    /// Seat whose item comes next, `None` once every seat contributed.
    pub fn current_playerindex(&self) -> Option<EPlayerIndex> {
        if_then_some!(
            !self.is_full(),
            self.first_playerindex().wrapping_add(self.size())
        )
    }
    pub fn size(&self) -> usize {
        self.vect.len()
    }
    pub fn is_full(&self) -> bool {
        self.size()==EPlayerIndex::SIZE
    }
    pub fn is_empty(&self) -> bool {
        self.size()==0
    }
    pub fn push(&mut self, t: T) {
        assert!(!self.is_full());
        self.vect.push(t);
    }
    pub fn iter(&self) -> SPlayersInRoundIterator<slice::Iter<T>> {
        SPlayersInRoundIterator {
            iter: self.vect.iter(),
            n_epi: self.epi_first.to_usize(),
        }
    }
    fn position(&self, epi: EPlayerIndex) -> usize {
        epi.wrapped_difference_usize(self.epi_first)
    }
    pub fn get(&self, epi: EPlayerIndex) -> Option<&T> {
        self.vect.get(self.position(epi))
    }
}

impl<T> IntoIterator for SPlayersInRound<T> {
    type Item = (EPlayerIndex, T);
    type IntoIter = SPlayersInRoundIterator<arrayvec::IntoIter<T, {EPlayerIndex::SIZE}>>;
    fn into_iter(self) -> Self::IntoIter {
        SPlayersInRoundIterator {
            iter: self.vect.into_iter(),
            n_epi: self.epi_first.to_usize(),
        }
    }
}

#[test]
fn test_playersinround() {
    let mut playersinround = SPlayersInRound::new(EPlayerIndex::EPI2);
    assert!(playersinround.is_empty());
    assert_eq!(playersinround.current_playerindex(), Some(EPlayerIndex::EPI2));
    for n in 0..EPlayerIndex::SIZE {
        playersinround.push(n);
    }
    assert!(playersinround.is_full());
    assert_eq!(playersinround.current_playerindex(), None);
    assert_eq!(playersinround.get(EPlayerIndex::EPI2), Some(&0));
    assert_eq!(playersinround.get(EPlayerIndex::EPI1), Some(&3));
    assert_eq!(
        playersinround.iter().map(|(epi, _n)| epi).collect::<Vec<_>>(),
        vec![EPlayerIndex::EPI2, EPlayerIndex::EPI3, EPlayerIndex::EPI0, EPlayerIndex::EPI1],
    );
    assert_eq!(format!("{:?}", playersinround), " 2 3>0 1");
}

#[test]
fn test_epi_from_str() {
    assert_eq!("3".parse::<EPlayerIndex>(), Ok(EPlayerIndex::EPI3));
    assert!("4".parse::<EPlayerIndex>().is_err());
}
