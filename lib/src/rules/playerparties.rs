use crate::error::EEngineError;
use crate::primitives::*;
use crate::rules::*;
use crate::util::*;
use itertools::Itertools;
use serde::Serialize;

/// Partition of the four seats into scoring groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SPlayerGroups {
    vecvecepi: Vec<Vec<EPlayerIndex>>,
}

impl SPlayerGroups {
    pub fn new(vecvecepi: Vec<Vec<EPlayerIndex>>) -> Result<Self, EEngineError> {
        let mut mapepin_group = EPlayerIndex::map_from_fn(|_epi| 0usize);
        for vecepi in vecvecepi.iter() {
            if vecepi.is_empty() {
                return Err(EEngineError::invariant_violation(format!("empty group in {:?}", vecvecepi)));
            }
            for &epi in vecepi.iter() {
                mapepin_group[epi] += 1;
            }
        }
        if !mapepin_group.iter().all(|&n_group| n_group==1) {
            return Err(EEngineError::invariant_violation(format!("{:?} does not partition the players", vecvecepi)));
        }
        Ok(SPlayerGroups{vecvecepi})
    }

    pub fn groups(&self) -> &[Vec<EPlayerIndex>] {
        &self.vecvecepi
    }

    pub fn group_of(&self, epi: EPlayerIndex) -> &[EPlayerIndex] {
        unwrap!(self.vecvecepi.iter().find(|vecepi| vecepi.contains(&epi)))
    }

    pub fn same_group(&self, epi_lhs: EPlayerIndex, epi_rhs: EPlayerIndex) -> bool {
        self.group_of(epi_lhs).contains(&epi_rhs)
    }
}

/// Forms the scoring groups once the round mode is fixed.
/// `ahand` must be the hands as dealt, before any card was played.
pub fn calculate_round_groups(
    ahand: &EnumMap<EPlayerIndex, SHand>,
    oepi_decider: Option<EPlayerIndex>,
    announcement: &SGameAnnouncement,
) -> Result<SPlayerGroups, EEngineError> {
    let decider = || oepi_decider.ok_or_else(|| EEngineError::invariant_violation(format!("{} without decider", announcement)));
    let others = |slcepi: &[EPlayerIndex]| EPlayerIndex::values()
        .filter(|epi| !slcepi.contains(epi))
        .collect::<Vec<_>>();
    let vecvecepi = match announcement.eroundmode {
        ERoundMode::Ramsch => EPlayerIndex::values().map(|epi| vec![epi]).collect(),
        ERoundMode::Sauspiel => {
            let epi_decider = decider()?;
            let card_sau = SCard::new(announcement.efarbe, ESchlag::Ass);
            let epi_sau = EPlayerIndex::values()
                .filter(|&epi| ahand[epi].contains(card_sau))
                .exactly_one()
                .map_err(|_| EEngineError::invariant_violation(format!("no unique owner of {}", card_sau)))?;
            if epi_sau==epi_decider {
                return Err(EEngineError::invariant_violation(format!("{} seeks own {}", epi_decider, card_sau)));
            }
            let vecepi_primary = vec![epi_decider, epi_sau];
            let vecepi_secondary = others(&vecepi_primary);
            vec![vecepi_primary, vecepi_secondary]
        },
        ERoundMode::FarbSolo | ERoundMode::FarbWenz | ERoundMode::Wenz => {
            let epi_decider = decider()?;
            vec![vec![epi_decider], others(&[epi_decider])]
        },
    };
    SPlayerGroups::new(vecvecepi)
}

#[cfg(test)]
fn ahand_by_suit() -> EnumMap<EPlayerIndex, SHand> {
    // seat 0: Schelln, seat 1: Herz, seat 2: Blatt, seat 3: Eichel
    EPlayerIndex::map_from_fn(|epi| SHand::new_from_iter(
        ESchlag::values().map(|eschlag| SCard::new(EFarbe::wrapped_from_usize(epi.to_usize()), eschlag))
    ))
}

#[test]
fn test_groups_ramsch() {
    let playergroups = unwrap!(calculate_round_groups(&ahand_by_suit(), None, &SGameAnnouncement::ramsch()));
    assert_eq!(playergroups.groups().len(), 4);
    for epi in EPlayerIndex::values() {
        assert_eq!(playergroups.group_of(epi), &[epi]);
    }
}

#[test]
fn test_groups_sauspiel() {
    use EPlayerIndex::*;
    let ahand = ahand_by_suit();
    let playergroups = unwrap!(calculate_round_groups(
        &ahand,
        Some(EPI2),
        &SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Schelln),
    ));
    assert!(playergroups.same_group(EPI2, EPI0));
    assert!(playergroups.same_group(EPI1, EPI3));
    assert!(!playergroups.same_group(EPI0, EPI1));
    assert!(matches!(
        calculate_round_groups(&ahand, Some(EPI0), &SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Schelln)),
        Err(EEngineError::InvariantViolation{..})
    ));
    assert!(matches!(
        calculate_round_groups(&ahand, None, &SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Eichel)),
        Err(EEngineError::InvariantViolation{..})
    ));
}

#[test]
fn test_groups_solo() {
    use EPlayerIndex::*;
    for eroundmode in [ERoundMode::FarbSolo, ERoundMode::FarbWenz, ERoundMode::Wenz] {
        let playergroups = unwrap!(calculate_round_groups(
            &ahand_by_suit(),
            Some(EPI1),
            &SGameAnnouncement::new(eroundmode, EFarbe::Blatt),
        ));
        assert_eq!(playergroups.group_of(EPI1), &[EPI1]);
        assert_eq!(playergroups.group_of(EPI3), &[EPI0, EPI2, EPI3]);
    }
}

#[test]
fn test_groups_partition_check() {
    use EPlayerIndex::*;
    assert!(SPlayerGroups::new(vec![vec![EPI0, EPI1], vec![EPI2]]).is_err());
    assert!(SPlayerGroups::new(vec![vec![EPI0, EPI1], vec![EPI1, EPI2, EPI3]]).is_err());
    assert!(SPlayerGroups::new(vec![vec![EPI0, EPI1, EPI2, EPI3], vec![]]).is_err());
    assert!(SPlayerGroups::new(vec![vec![EPI3, EPI1], vec![EPI2, EPI0]]).is_ok());
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::game::deal_cards;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    proptest! {
        #[test]
        fn sauspiel_pairs_decider_with_sau_owner(n_seed in any::<u64>(), i_efarbe in 0..EFarbe::SIZE) {
            let ahand = deal_cards(&mut StdRng::seed_from_u64(n_seed));
            let efarbe = EFarbe::wrapped_from_usize(i_efarbe);
            let card_sau = SCard::new(efarbe, ESchlag::Ass);
            let epi_sau = unwrap!(EPlayerIndex::values().find(|&epi| ahand[epi].contains(card_sau)));
            for epi_decider in EPlayerIndex::values().filter(|&epi| epi!=epi_sau) {
                let playergroups = unwrap!(calculate_round_groups(
                    &ahand,
                    Some(epi_decider),
                    &SGameAnnouncement::new(ERoundMode::Sauspiel, efarbe),
                ));
                prop_assert_eq!(playergroups.groups().len(), 2);
                prop_assert!(playergroups.same_group(epi_decider, epi_sau));
                for epi in EPlayerIndex::values().filter(|&epi| epi!=epi_sau && epi!=epi_decider) {
                    prop_assert!(!playergroups.same_group(epi, epi_decider));
                    prop_assert_eq!(playergroups.group_of(epi).len(), 2);
                }
            }
        }
    }
}
