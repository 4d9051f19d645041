use failure::Error;
use itertools::Itertools;
use schafrunde_lib::rules::trumpfdecider::*;

use super::*;

pub fn subcommand(str_subcommand: &'static str) -> clap::Command<'static> {
    with_announcement_args(clap::Command::new(str_subcommand)
        .about("Lists the trumps of a round mode, weakest first")
    )
}

pub fn run(clapmatches: &clap::ArgMatches) -> Result<(), Error> {
    let announcement = get_announcement(clapmatches)?;
    let veccard_trumpf = trump_list(&announcement)?;
    println!("{}: {}", announcement, veccard_trumpf.iter().join(" "));
    Ok(())
}
