pub mod replay;
pub mod trumps;
pub mod winner;

use failure::{format_err, Error};
use schafrunde_lib::primitives::*;
use schafrunde_lib::rules::*;
use schafrunde_util::*;

const ASTR_MODE : [&str; 5] = ["sauspiel", "farbsolo", "farbwenz", "wenz", "ramsch"];
const ASTR_SUIT : [&str; 4] = ["schelln", "herz", "blatt", "eichel"];

/// Adds `--mode` and `--suit`, read back by `get_announcement`.
pub fn with_announcement_args(cmd: clap::Command<'static>) -> clap::Command<'static> {
    cmd
        .arg(clap::Arg::new("mode")
            .long("mode")
            .takes_value(true)
            .required(true)
            .possible_values(ASTR_MODE)
            .ignore_case(true)
        )
        .arg(clap::Arg::new("suit")
            .long("suit")
            .takes_value(true)
            .possible_values(ASTR_SUIT)
            .ignore_case(true)
            .help("Sought Sau for sauspiel, trump suit for farbsolo and farbwenz")
        )
}

pub fn get_announcement(clapmatches: &clap::ArgMatches) -> Result<SGameAnnouncement, Error> {
    let eroundmode = match unwrap!(clapmatches.value_of("mode")).to_lowercase().as_str() {
        "sauspiel" => ERoundMode::Sauspiel,
        "farbsolo" => ERoundMode::FarbSolo,
        "farbwenz" => ERoundMode::FarbWenz,
        "wenz" => ERoundMode::Wenz,
        "ramsch" => ERoundMode::Ramsch,
        str_mode => return Err(format_err!("Unknown mode: {}", str_mode)),
    };
    let oefarbe = clapmatches.value_of("suit")
        .map(|str_suit| match str_suit.to_lowercase().as_str() {
            "schelln" => Ok(EFarbe::Schelln),
            "herz" => Ok(EFarbe::Herz),
            "blatt" => Ok(EFarbe::Blatt),
            "eichel" => Ok(EFarbe::Eichel),
            _ => Err(format_err!("Unknown suit: {}", str_suit)),
        })
        .transpose()?;
    match (eroundmode, oefarbe) {
        (ERoundMode::Wenz | ERoundMode::Ramsch, _) => Ok(SGameAnnouncement::new(eroundmode, EFarbe::Herz)),
        (_, Some(efarbe)) => Ok(SGameAnnouncement::new(eroundmode, efarbe)),
        (_, None) => Err(format_err!("{} requires --suit", eroundmode)),
    }
}
