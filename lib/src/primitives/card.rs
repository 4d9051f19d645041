use crate::util::*;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

plain_enum_mod!(modefarbe, derive(Hash, Serialize, Deserialize,), map_derive(), EFarbe {
    Schelln,
    Herz,
    Blatt,
    Eichel,
});

impl fmt::Display for EFarbe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            Self::Schelln => "Schelln",
            Self::Herz => "Herz",
            Self::Blatt => "Blatt",
            Self::Eichel => "Eichel",
        })
    }
}

// Declaration order is the default (non-trump) precedence, weakest first.
plain_enum_mod!(modeschlag, derive(Hash, Serialize, Deserialize,), map_derive(), ESchlag {
    S7,
    S8,
    S9,
    Unter,
    Ober,
    Koenig,
    Zehn,
    Ass,
});

impl fmt::Display for ESchlag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            Self::S7 => "Sieben",
            Self::S8 => "Acht",
            Self::S9 => "Neun",
            Self::Unter => "Unter",
            Self::Ober => "Ober",
            Self::Koenig => "Koenig",
            Self::Zehn => "Zehn",
            Self::Ass => "Ass",
        })
    }
}

pub const N_CARDS_PER_PLAYER : usize = 8;
pub const N_CARDS_IN_DECK : usize = EFarbe::SIZE * ESchlag::SIZE;

#[derive(PartialEq, Eq, Clone, Copy, Hash)]
pub struct SCard {
    efarbe: EFarbe,
    eschlag: ESchlag,
}

impl SCard {
    pub const fn new(efarbe: EFarbe, eschlag: ESchlag) -> SCard {
        SCard {efarbe, eschlag}
    }
    pub const fn farbe(self) -> EFarbe {
        self.efarbe
    }
    pub const fn schlag(self) -> ESchlag {
        self.eschlag
    }
    /// The full deck, suit by suit.
    pub fn values() -> impl Iterator<Item=SCard>+Clone {
        use itertools::iproduct;
        iproduct!(
            EFarbe::values(),
            ESchlag::values()
        )
            .map(|(efarbe, eschlag)| SCard::new(efarbe, eschlag))
    }
}

impl fmt::Debug for SCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for SCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}",
            match self.farbe() {
                EFarbe::Schelln => "S",
                EFarbe::Herz => "H",
                EFarbe::Blatt => "B",
                EFarbe::Eichel => "E",
            },
            match self.schlag() {
                ESchlag::S7 => "7",
                ESchlag::S8 => "8",
                ESchlag::S9 => "9",
                ESchlag::Unter => "U",
                ESchlag::Ober => "O",
                ESchlag::Koenig => "K",
                ESchlag::Zehn => "Z",
                ESchlag::Ass => "A",
            }
        )
    }
}

impl Serialize for SCard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SCard {
    fn deserialize<D>(deserializer: D) -> Result<SCard, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        parse_trimmed(
            &String::deserialize(deserializer)?,
            crate::primitives::cardvector::card_parser(),
        ).map_err(serde::de::Error::custom)
    }
}

pub mod card_values {
    use super::*;
    macro_rules! define_card_values {($($card:ident $efarbe:ident $eschlag:ident,)*) => {
        $(pub const $card : SCard = SCard::new(EFarbe::$efarbe, ESchlag::$eschlag);)*
    }}
    define_card_values!(
        S7 Schelln S7, S8 Schelln S8, S9 Schelln S9, SU Schelln Unter, SO Schelln Ober, SK Schelln Koenig, SZ Schelln Zehn, SA Schelln Ass,
        H7 Herz S7, H8 Herz S8, H9 Herz S9, HU Herz Unter, HO Herz Ober, HK Herz Koenig, HZ Herz Zehn, HA Herz Ass,
        B7 Blatt S7, B8 Blatt S8, B9 Blatt S9, BU Blatt Unter, BO Blatt Ober, BK Blatt Koenig, BZ Blatt Zehn, BA Blatt Ass,
        E7 Eichel S7, E8 Eichel S8, E9 Eichel S9, EU Eichel Unter, EO Eichel Ober, EK Eichel Koenig, EZ Eichel Zehn, EA Eichel Ass,
    );
}

#[test]
fn test_farbe_schlag_enumerators() {
    assert_eq!(EFarbe::values().count(), 4);
    assert_eq!(ESchlag::values().count(), 8);
    assert!(EFarbe::Schelln < EFarbe::Herz && EFarbe::Herz < EFarbe::Blatt && EFarbe::Blatt < EFarbe::Eichel);
    assert!(ESchlag::S9 < ESchlag::Unter && ESchlag::Ober < ESchlag::Koenig && ESchlag::Koenig < ESchlag::Zehn);
}

#[test]
fn test_deck() {
    use itertools::Itertools;
    let veccard = SCard::values().collect::<Vec<_>>();
    assert_eq!(veccard.len(), N_CARDS_IN_DECK);
    assert!(veccard.iter().all_unique());
    for efarbe in EFarbe::values() {
        assert_eq!(veccard.iter().filter(|card| card.farbe()==efarbe).count(), ESchlag::SIZE);
    }
}

#[test]
fn test_display() {
    use card_values::*;
    assert_eq!(
        [S7, HU, BZ, EA, BO].iter().map(SCard::to_string).collect::<Vec<_>>(),
        ["S7", "HU", "BZ", "EA", "BO"],
    );
    assert_eq!(format!("{:?}", EK), "EK");
}

#[test]
fn test_serialization() {
    macro_rules! test_card(($($card:ident)*) => {
        $(
            serde_test::assert_tokens(&card_values::$card, &[
                serde_test::Token::Str(stringify!($card)),
            ]);
        )*
    });
    test_card!(
        S7 S8 S9 SU SO SK SZ SA
        H7 H8 H9 HU HO HK HZ HA
        B7 B8 B9 BU BO BK BZ BA
        E7 E8 E9 EU EO EK EZ EA
    );
}
