use failure::{format_err, Error};
use plain_enum::*;
use schafrunde_lib::game::table::*;
use schafrunde_lib::primitives::*;
use schafrunde_lib::rules::{ruleset::SRuleSet, *};
use schafrunde_logging::info;
use serde::Deserialize;
use std::path::Path;

use super::*;

/// One line of a replay file.
/// `{"join": "a"}`, `"deal"`, `{"bid": ["a", null]}`, `{"play": ["a", "EO"]}`, `"pause"`, `"next"`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum VReplayAction {
    Join(String),
    Deal,
    Bid(String, Option<SGameAnnouncement>),
    Play(String, SCard),
    Pause,
    Next,
}

pub fn subcommand(str_subcommand: &'static str) -> clap::Command<'static> {
    clap::Command::new(str_subcommand)
        .about("Drives a table through a list of actions and prints every event")
        .arg(clap::Arg::new("ruleset")
            .long("ruleset")
            .takes_value(true)
            .help("TOML file with trick-pause-ms, seed and [modes]")
        )
        .arg(clap::Arg::new("actions")
            .required(true)
            .index(1)
            .help("JSON file holding a list of actions")
        )
}

fn apply_action(table: &mut SGameTable<String>, action: VReplayAction) -> Result<SGameEvents<String>, Error> {
    Ok(match action {
        VReplayAction::Join(str_player) => table.join(str_player)?,
        VReplayAction::Deal => table.advance_to_pre_round()?,
        VReplayAction::Bid(str_player, oannouncement) => table.submit_bid(&str_player, oannouncement)?,
        VReplayAction::Play(str_player, card) => table.play_card(&str_player, card)?,
        VReplayAction::Pause => table.end_trick_pause()?,
        VReplayAction::Next => table.advance_to_next_round()?,
    })
}

pub fn run(clapmatches: &clap::ArgMatches) -> Result<(), Error> {
    let ruleset = match clapmatches.value_of("ruleset") {
        Some(str_ruleset) => SRuleSet::from_file(Path::new(str_ruleset))?,
        None => SRuleSet::default(),
    };
    let str_actions = unwrap!(clapmatches.value_of("actions"));
    let vecaction : Vec<VReplayAction> = serde_json::from_str(&std::fs::read_to_string(str_actions)?)?;
    info!("Replaying {} actions from {}", vecaction.len(), str_actions);
    let mut table = SGameTable::<String>::new(ruleset);
    for (i_action, action) in vecaction.into_iter().enumerate() {
        let str_action = format!("{:?}", action);
        let vecevent = apply_action(&mut table, action)
            .map_err(|err| format_err!("Action {} ({}) failed in {}: {}", i_action, str_action, table.state(), err))?;
        for event in vecevent {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(table.scoreboard())?);
    let an_total = table.scoreboard().totals();
    for (epi, str_player) in EPlayerIndex::values().zip(table.players()) {
        println!("{} {}: {}", epi, str_player, an_total[epi]);
    }
    Ok(())
}
