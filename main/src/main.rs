#![cfg_attr(feature = "cargo-clippy", allow(
    clippy::upper_case_acronyms,
))]
#![deny(bare_trait_objects)]

mod subcommands;

use failure::Error;

fn main() -> Result<(), Error> {
    schafrunde_logging::init_logging(/*opath_log*/None)?;
    macro_rules! subcommands{($(($mod:ident, $str_cmd:expr))*) => {
        let clapmatches = clap::Command::new("schafrunde")
            .subcommand_required(true)
            $(.subcommand(subcommands::$mod::subcommand($str_cmd)))*
            .get_matches();
        $(
            if let Some(clapmatches_subcommand)=clapmatches.subcommand_matches($str_cmd) {
                return subcommands::$mod::run(clapmatches_subcommand);
            }
        )*
    }}
    subcommands!(
        (trumps, "trumps")
        (winner, "winner")
        (replay, "replay")
    );
    Ok(())
}
