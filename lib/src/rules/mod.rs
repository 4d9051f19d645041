pub mod card_points;
pub mod playerparties;
pub mod ruleset;
pub mod trumpfdecider;

use crate::error::EEngineError;
use crate::primitives::*;
use crate::util::*;
use serde::{Deserialize, Serialize};
use std::fmt;

plain_enum_mod!(moderoundmode, derive(Hash, Serialize, Deserialize,), map_derive(), ERoundMode {
    Ramsch,
    Sauspiel,
    FarbSolo,
    FarbWenz,
    Wenz,
});

impl ERoundMode {
    /// Bidding tier. A bid must strictly exceed the leading tier.
    pub fn priority(self) -> usize {
        match self {
            ERoundMode::Ramsch => 0,
            ERoundMode::Sauspiel => 1,
            ERoundMode::FarbSolo => 2,
            ERoundMode::FarbWenz | ERoundMode::Wenz => 3,
        }
    }
    pub fn is_wenz_tier(self) -> bool {
        self.priority()==ERoundMode::Wenz.priority()
    }
}

impl fmt::Display for ERoundMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            ERoundMode::Ramsch => "Ramsch",
            ERoundMode::Sauspiel => "Sauspiel",
            ERoundMode::FarbSolo => "FarbSolo",
            ERoundMode::FarbWenz => "FarbWenz",
            ERoundMode::Wenz => "Wenz",
        })
    }
}

/// Round mode together with its round suit.
/// The suit is the sought Sau for `Sauspiel`, the extra trump suit for `FarbSolo`/`FarbWenz`,
/// and conventionally `Herz` for `Ramsch`/`Wenz`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct SGameAnnouncement {
    pub eroundmode: ERoundMode,
    pub efarbe: EFarbe,
}

impl SGameAnnouncement {
    pub fn ramsch() -> Self {
        SGameAnnouncement::new(ERoundMode::Ramsch, EFarbe::Herz)
    }
    /// Suit whose cards (apart from Ober/Unter) are trumps, if any.
    pub fn trumpf_farbe(&self) -> Option<EFarbe> {
        match self.eroundmode {
            ERoundMode::Ramsch | ERoundMode::Sauspiel => Some(EFarbe::Herz),
            ERoundMode::FarbSolo | ERoundMode::FarbWenz => Some(self.efarbe),
            ERoundMode::Wenz => None,
        }
    }
    /// Ramsch and Wenz ignore the suit; they always carry `Herz`.
    pub fn normalized(self) -> Self {
        match self.eroundmode {
            ERoundMode::Ramsch | ERoundMode::Wenz => SGameAnnouncement::new(self.eroundmode, EFarbe::Herz),
            ERoundMode::Sauspiel | ERoundMode::FarbSolo | ERoundMode::FarbWenz => self,
        }
    }
    /// Hand-dependent preconditions of a bid.
    /// A Sauspiel seeks a non-trump Ace the bidder does not hold.
    pub fn can_be_played(&self, hand: &SHand) -> Result<(), EEngineError> {
        if ERoundMode::Sauspiel==self.eroundmode {
            let card_sau = SCard::new(self.efarbe, ESchlag::Ass);
            let veccard_trumpf = trumpfdecider::trump_list(self)?;
            if veccard_trumpf.contains(&card_sau) {
                return Err(EEngineError::illegal_bid(format!("{} is trump", card_sau)));
            }
            if hand.contains(card_sau) {
                return Err(EEngineError::illegal_bid(format!("{} is on the bidder's own hand", card_sau)));
            }
        }
        Ok(())
    }
}

impl fmt::Display for SGameAnnouncement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.eroundmode {
            ERoundMode::Ramsch => write!(f, "Ramsch"),
            ERoundMode::Sauspiel => write!(f, "Sauspiel mit der {}-Sau", self.efarbe),
            ERoundMode::FarbSolo => write!(f, "{}-Solo", self.efarbe),
            ERoundMode::FarbWenz => write!(f, "{}-Wenz", self.efarbe),
            ERoundMode::Wenz => write!(f, "Wenz"),
        }
    }
}

#[test]
fn test_priority() {
    assert!(ERoundMode::Ramsch.priority() < ERoundMode::Sauspiel.priority());
    assert!(ERoundMode::Sauspiel.priority() < ERoundMode::FarbSolo.priority());
    assert!(ERoundMode::FarbSolo.priority() < ERoundMode::Wenz.priority());
    assert_eq!(ERoundMode::FarbWenz.priority(), ERoundMode::Wenz.priority());
    assert_eq!(
        ERoundMode::values().filter(|eroundmode| eroundmode.is_wenz_tier()).collect::<Vec<_>>(),
        vec![ERoundMode::FarbWenz, ERoundMode::Wenz],
    );
}

#[test]
fn test_announcement_display() {
    assert_eq!(SGameAnnouncement::new(ERoundMode::Sauspiel, EFarbe::Blatt).to_string(), "Sauspiel mit der Blatt-Sau");
    assert_eq!(SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Eichel).to_string(), "Eichel-Solo");
    assert_eq!(SGameAnnouncement::new(ERoundMode::FarbWenz, EFarbe::Schelln).to_string(), "Schelln-Wenz");
    assert_eq!(SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Blatt).normalized(), SGameAnnouncement::new(ERoundMode::Wenz, EFarbe::Herz));
    assert_eq!(SGameAnnouncement::ramsch().trumpf_farbe(), Some(EFarbe::Herz));
}

#[test]
fn test_can_be_played() {
    use crate::primitives::{cardvector::parse_cards, card::card_values::*};
    let hand = SHand::new_from_iter(unwrap!(parse_cards::<Vec<_>>("EO EU SA S7 BK HA H7 EZ")));
    let sauspiel = |efarbe| SGameAnnouncement::new(ERoundMode::Sauspiel, efarbe);
    assert!(sauspiel(EFarbe::Eichel).can_be_played(&hand).is_ok());
    assert!(sauspiel(EFarbe::Blatt).can_be_played(&hand).is_ok());
    assert!(sauspiel(EFarbe::Herz).can_be_played(&hand).is_err()); // Herz is trump
    assert!(sauspiel(EFarbe::Schelln).can_be_played(&hand).is_err()); // own Sau
    // holding no card of the sought suit is fine
    let hand_no_blatt = SHand::new_from_iter([EO, BO, BU, SA, S7, HA, H7, EZ]);
    assert!(sauspiel(EFarbe::Blatt).can_be_played(&hand_no_blatt).is_ok());
    let hand_schelln = SHand::new_from_iter(unwrap!(parse_cards::<Vec<_>>("S7 S8 S9 SK SZ SA HA HO")));
    assert!(sauspiel(EFarbe::Blatt).can_be_played(&hand_schelln).is_ok());
    assert!(sauspiel(EFarbe::Eichel).can_be_played(&hand_schelln).is_ok());
    for eroundmode in [ERoundMode::FarbSolo, ERoundMode::FarbWenz, ERoundMode::Wenz] {
        assert!(SGameAnnouncement::new(eroundmode, EFarbe::Schelln).can_be_played(&hand_no_blatt).is_ok());
    }
}

#[test]
fn test_announcement_serialization() {
    use serde_test::{assert_tokens, Token};
    assert_tokens(
        &SGameAnnouncement::new(ERoundMode::FarbSolo, EFarbe::Schelln),
        &[
            Token::Struct{name: "SGameAnnouncement", len: 2},
            Token::Str("eroundmode"),
            Token::UnitVariant{name: "ERoundMode", variant: "FarbSolo"},
            Token::Str("efarbe"),
            Token::UnitVariant{name: "EFarbe", variant: "Schelln"},
            Token::StructEnd,
        ],
    );
}
