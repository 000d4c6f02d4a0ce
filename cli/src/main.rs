mod get;
mod link;
mod list;
mod resolve;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

use accounts::tracing::Level;
use accounts::{config, Config, Registry};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &'static str = env!("CARGO_PKG_AUTHORS");

fn main() -> Result<()> {
    let matches = cmd().get_matches();

    let config = configure(&matches, config::CONFIG_FILE)?;
    accounts::tracing::init(&config)?;

    let registry = Registry::from_config(&config)?;

    let out = match matches.subcommand() {
        Some(("list", m)) => list::run(m, &registry)?,
        Some(("get", m)) => get::run(m, &registry)?,
        Some(("resolve", m)) => resolve::run(m, &registry)?,
        Some(("link", m)) => link::run(m, &registry, &config)?,
        _ => unreachable!("subcommand is required"),
    };
    print!("{out}");

    Ok(())
}

/// Builds the effective configuration.
///
/// An explicit `--config` file must exist. Otherwise the default config file
/// is used if present, falling back to quieter-than-library defaults so that
/// plain invocations only print their result. Flags given on the command
/// line override whatever was loaded.
fn configure(matches: &ArgMatches, default_file: &str) -> Result<Config> {
    let loaded = match matches.get_one::<String>("config") {
        Some(path) => Some(config::load_from(path)?),
        None => config::try_load_from(default_file)?,
    };
    let mut config = loaded.unwrap_or_else(|| {
        let mut config = Config::default();
        config.tracing.level = Level::Support;
        config
    });

    if let Some(base) = matches.get_one::<String>("base") {
        config.pages.base = base.clone();
    }
    if let Some(level) = matches.get_one::<String>("verbosity") {
        config.tracing.level = level.parse()?;
    }
    if let Some(mode) = matches.get_one::<String>("log_mode") {
        config.tracing.mode = mode.parse()?;
    }

    Ok(config)
}

pub fn cmd() -> Command {
    Command::new("accounts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .infer_subcommands(true)
        .version(VERSION)
        .author(AUTHORS)
        .about("Inspect the paths of the account pages")
        .subcommand(list::cmd())
        .subcommand(get::cmd())
        .subcommand(resolve::cmd())
        .subcommand(link::cmd())
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .global(true)
                .help("Load configuration from the given file"),
        )
        .arg(
            Arg::new("base")
                .long("base")
                .short('b')
                .value_name("BASE")
                .global(true)
                .help("Mount point of the account pages, overrides configuration"),
        )
        .arg(
            Arg::new("verbosity")
                .long("verbosity")
                .short('v')
                .display_order(100)
                .value_name("level")
                .value_parser(["trace", "debug", "info", "warn", "error", "none"])
                .global(true)
                .help("Set the verbosity of the log output [default: warn]"),
        )
        .arg(
            Arg::new("log_mode")
                .long("log-mode")
                .display_order(101)
                .value_name("mode")
                .value_parser(["formatted", "json"])
                .global(true)
                .help("Set the format of the log output, written to stderr"),
        )
}
