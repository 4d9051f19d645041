use crate::rules::*;
use crate::util::*;
use std::{fs::File, io::prelude::*, path::Path, time::Duration};

/// Table-level settings read from a TOML file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SRuleSet {
    pub n_trick_pause_ms: u64,
    pub on_seed: Option<u64>,
    pub maperoundmodeb_allowed: EnumMap<ERoundMode, bool>,
}

impl Default for SRuleSet {
    fn default() -> Self {
        SRuleSet {
            n_trick_pause_ms: 1500,
            on_seed: None,
            maperoundmodeb_allowed: ERoundMode::map_from_fn(|_eroundmode| true),
        }
    }
}

fn str_mode_key(eroundmode: ERoundMode) -> Option<&'static str> {
    match eroundmode {
        ERoundMode::Ramsch => None, // not biddable
        ERoundMode::Sauspiel => Some("sauspiel"),
        ERoundMode::FarbSolo => Some("farbsolo"),
        ERoundMode::FarbWenz => Some("farbwenz"),
        ERoundMode::Wenz => Some("wenz"),
    }
}

impl SRuleSet {
    pub fn from_string(str_toml: &str) -> Result<SRuleSet, Error> {
        let tomltbl = toml::from_str::<toml::Table>(str_toml)?;
        let read_int = |tomlval: &toml::Value, str_key: &str| -> Result<u64, Error> {
            match tomlval.as_integer() {
                Some(n) if 0<=n => Ok(n as u64),
                Some(n) => bail!("Found {} with invalid value {}. Must be at least 0.", str_key, n),
                None => bail!("{} must be an integer.", str_key),
            }
        };
        let mut ruleset = SRuleSet::default();
        for (str_key, tomlval) in tomltbl.iter() {
            match str_key.as_str() {
                "trick-pause-ms" => {
                    ruleset.n_trick_pause_ms = read_int(tomlval, str_key)?;
                },
                "seed" => {
                    ruleset.on_seed = Some(read_int(tomlval, str_key)?);
                },
                "modes" => {
                    let tomltbl_modes = tomlval.as_table()
                        .ok_or_else(|| format_err!("modes must be a table."))?;
                    for (str_mode, tomlval_mode) in tomltbl_modes.iter() {
                        let eroundmode = ERoundMode::values()
                            .find(|&eroundmode| Some(str_mode.as_str())==str_mode_key(eroundmode))
                            .ok_or_else(|| format_err!("Unknown round mode modes.{}.", str_mode))?;
                        ruleset.maperoundmodeb_allowed[eroundmode] = tomlval_mode.as_bool()
                            .ok_or_else(|| format_err!("modes.{} must be true or false.", str_mode))?;
                    }
                },
                _ => bail!("Unknown key {} in ruleset.", str_key),
            }
        }
        if tomltbl.get("trick-pause-ms").is_none() {
            info!("SRuleSet: trick-pause-ms not specified; falling back to {}.", ruleset.n_trick_pause_ms);
        }
        Ok(ruleset)
    }

    pub fn from_file(path: &Path) -> Result<SRuleSet, Error> {
        let mut file = File::open(path)?;
        let mut str_toml = String::new();
        file.read_to_string(&mut str_toml)?;
        SRuleSet::from_string(&str_toml)
    }

    pub fn trick_pause(&self) -> Duration {
        Duration::from_millis(self.n_trick_pause_ms)
    }

    pub fn is_mode_allowed(&self, eroundmode: ERoundMode) -> bool {
        self.maperoundmodeb_allowed[eroundmode]
    }
}

#[test]
fn test_ruleset_defaults() {
    let ruleset = unwrap!(SRuleSet::from_string(""));
    assert_eq!(ruleset, SRuleSet::default());
    assert_eq!(ruleset.trick_pause(), Duration::from_millis(1500));
    assert!(ERoundMode::values().all(|eroundmode| ruleset.is_mode_allowed(eroundmode)));
}

#[test]
fn test_ruleset_from_string() {
    let ruleset = unwrap!(SRuleSet::from_string(r#"
        trick-pause-ms = 0
        seed = 42
        [modes]
        farbwenz = false
        wenz = true
    "#));
    assert_eq!(ruleset.trick_pause(), Duration::ZERO);
    assert_eq!(ruleset.on_seed, Some(42));
    assert!(!ruleset.is_mode_allowed(ERoundMode::FarbWenz));
    assert!(ruleset.is_mode_allowed(ERoundMode::Wenz));
    assert!(ruleset.is_mode_allowed(ERoundMode::Sauspiel));
}

#[test]
fn test_ruleset_rejects_invalid() {
    for str_toml in [
        "trick-pause-ms = -1",
        "trick-pause-ms = \"long\"",
        "stock = 10",
        "[modes]\nramsch = false",
        "[modes]\nbettel = true",
        "[modes]\nwenz = 1",
        "modes = 3",
        "seed = ",
    ] {
        assert!(SRuleSet::from_string(str_toml).is_err(), "{}", str_toml);
    }
}
