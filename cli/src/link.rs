use anyhow::{Error, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use accounts::{Config, Page, Registry};

pub fn cmd() -> Command {
    Command::new("link")
        .about("Build a link to a page")
        .display_order(40)
        .arg(
            Arg::new("name")
                .value_name("NAME")
                .help("Symbolic page name, e.g. LOGIN")
                .required(true),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .value_name("KEY=VALUE")
                .action(ArgAction::Append)
                .help("Query parameter to append, can be repeated"),
        )
        .arg(
            Arg::new("absolute")
                .long("absolute")
                .short('a')
                .action(ArgAction::SetTrue)
                .help("Prefix the link with the configured origin"),
        )
}

pub fn run(matches: &ArgMatches, registry: &Registry, config: &Config) -> Result<String> {
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or_default();
    let page = Page::from_name(name)?;

    let query = matches
        .get_many::<String>("query")
        .into_iter()
        .flatten()
        .map(|q| parse_query(q))
        .collect::<Result<Vec<_>>>()?;
    let link = registry.link(page, &query);

    if matches.get_flag("absolute") {
        Ok(format!("{}\n", config.origin_url()?.join(&link)?))
    } else {
        Ok(format!("{link}\n"))
    }
}

fn parse_query(input: &str) -> Result<(&str, &str)> {
    input
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| Error::msg(format!("expected KEY=VALUE, got `{input}`")))
}
