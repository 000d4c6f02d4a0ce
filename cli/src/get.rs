use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

use accounts::Registry;

pub fn cmd() -> Command {
    Command::new("get")
        .about("Print the path of a page")
        .display_order(20)
        .arg(
            Arg::new("name")
                .value_name("NAME")
                .help("Symbolic page name, e.g. TWO_FACTOR_SETUP")
                .required(true),
        )
}

pub fn run(matches: &ArgMatches, registry: &Registry) -> Result<String> {
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or_default();
    Ok(format!("{}\n", registry.lookup(name)?))
}
