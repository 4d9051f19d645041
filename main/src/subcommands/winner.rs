use failure::{bail, format_err, Error};
use itertools::Itertools;
use schafrunde_lib::primitives::{cardvector::parse_cards, *};
use schafrunde_lib::rules::trumpfdecider::*;

use super::*;

pub fn subcommand(str_subcommand: &'static str) -> clap::Command<'static> {
    with_announcement_args(clap::Command::new(str_subcommand)
        .about("Determines the winner of a (partial) trick")
        .arg(clap::Arg::new("cards")
            .required(true)
            .index(1)
            .help("Cards in play order, e.g. \"EO HA HU H7\"")
        )
    )
}

pub fn run(clapmatches: &clap::ArgMatches) -> Result<(), Error> {
    let announcement = get_announcement(clapmatches)?;
    let str_cards = unwrap!(clapmatches.value_of("cards"));
    let veccard = parse_cards::<Vec<_>>(str_cards)
        .ok_or_else(|| format_err!("Could not parse cards: {}", str_cards))?;
    if veccard.is_empty() {
        bail!("No cards given");
    }
    let stich = SStich::new_from_cards(EPlayerIndex::EPI0, veccard)?;
    let trumpfdecider = STrumpfDecider::new(&announcement)?;
    println!("{}: {}", announcement, stich);
    println!("Provisional winners: {}", trumpfdecider.provisional_winners(&stich)?.iter().join(" "));
    let card_winner = trumpfdecider.winner_card(&stich)?;
    if stich.is_complete() {
        println!("Winner: {} (player {})", card_winner, trumpfdecider.winner_index(&stich)?);
    } else {
        println!("Winner so far: {}", card_winner);
    }
    Ok(())
}
