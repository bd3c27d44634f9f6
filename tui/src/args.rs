//! Parsing command-line arguments.

use clap::{
    crate_description, crate_name, crate_version, error::ErrorKind, Arg, ArgMatches, Command,
    error::Result as ClapResult,
};
use rlife_lib::Config;
use std::{error::Error, ffi::OsString, fs, path::Path};

/// Options that map one to one onto [`Config::set_option`] keys.
///
/// The order matters: a `--survival` or `--birth` overrides the
/// corresponding half of `--rule`.
const OPTIONS: [&str; 11] = [
    "height",
    "width",
    "density",
    "delay",
    "view-height",
    "view-width",
    "rule",
    "survival",
    "birth",
    "generations",
    "seed",
];

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        Self::parse_from(std::env::args_os())
    }

    pub(crate) fn parse_from<I, T>(args: I) -> ClapResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut command = command();
        let matches = command.try_get_matches_from_mut(args)?;
        let config =
            config(&matches).map_err(|e| command.error(ErrorKind::ValueValidation, e))?;
        Ok(Args {
            config,
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("no-tui"),
        })
    }
}

fn command() -> Command {
    let command = Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .long_about(
            "Conway's Game of Life on an unbounded grid\n\
             \n\
             A random rectangle of cells is seeded, and then one generation \
             is shown after another.\n\
             * Living cells are represented by `o`;\n\
             * Dead cells are represented by spaces.\n\
             \n\
             Options given on the command line override those in the \
             configuration file.\n",
        )
        .arg(
            Arg::new("height")
                .help("Height of the seeded rectangle")
                .value_name("HEIGHT")
                .allow_negative_numbers(true)
                .index(1),
        )
        .arg(
            Arg::new("width")
                .help("Width of the seeded rectangle")
                .value_name("WIDTH")
                .allow_negative_numbers(true)
                .index(2),
        )
        .arg(
            Arg::new("config")
                .help("Reads options from a configuration file")
                .long_help(
                    "Reads options from a configuration file\n\
                     The format is chosen by the extension: \
                     `.json`, `.yaml`, `.yml` or `.toml`.\n",
                )
                .short('c')
                .long("config")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("density")
                .help("Probability that a seeded cell is alive")
                .short('d')
                .long("density")
                .value_name("P"),
        )
        .arg(
            Arg::new("delay")
                .help("Pause between two generations, in milliseconds")
                .long("delay")
                .value_name("MS"),
        )
        .arg(
            Arg::new("view-height")
                .help("Only shows rows in [0, N)")
                .long("view-height")
                .value_name("N"),
        )
        .arg(
            Arg::new("view-width")
                .help("Only shows columns in [0, N)")
                .long("view-width")
                .value_name("N"),
        )
        .arg(
            Arg::new("rule")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     A Life-like rule string such as `B3/S23`, where the birth \
                     counts and the survival counts are each contiguous.\n",
                )
                .short('r')
                .long("rule")
                .value_name("RULE"),
        )
        .arg(
            Arg::new("survival")
                .help("Neighbor counts for which a living cell survives, e.g. `2..4`")
                .long("survival")
                .value_name("RANGE"),
        )
        .arg(
            Arg::new("birth")
                .help("Neighbor counts for which a dead cell is born, e.g. `3..4`")
                .long("birth")
                .value_name("RANGE"),
        )
        .arg(
            Arg::new("generations")
                .help("Stops after showing this many generations")
                .short('g')
                .long("generations")
                .value_name("N"),
        )
        .arg(
            Arg::new("seed")
                .help("Seed of the random number generator")
                .short('s')
                .long("seed")
                .value_name("SEED"),
        );

    #[cfg(feature = "tui")]
    let command = command.arg(
        Arg::new("no-tui")
            .help("Prints every generation to stdout, without entering the TUI")
            .short('n')
            .long("no-tui")
            .action(clap::ArgAction::SetTrue),
    );

    command
}

/// The configuration file, if any, with the command-line options applied on top.
fn config(matches: &ArgMatches) -> Result<Config, Box<dyn Error>> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => load_config(Path::new(path))?,
        None => Config::default(),
    };
    for &key in OPTIONS.iter() {
        if let Some(value) = matches.get_one::<String>(key) {
            config.set_option(key, value)?;
        }
    }
    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<Config, Box<dyn Error>> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let text = fs::read_to_string(path)?;
    parse_config(&text, format)
}

fn parse_config(text: &str, format: &str) -> Result<Config, Box<dyn Error>> {
    let config: Config = match format {
        "json" => serde_json::from_str(text)?,
        "yaml" | "yml" => serde_yaml::from_str(text)?,
        "toml" => toml::from_str(text)?,
        _ => return Err(format!("unknown configuration format {:?}", format).into()),
    };
    Ok(config)
}
