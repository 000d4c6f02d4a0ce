use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

use accounts::Registry;

pub fn cmd() -> Command {
    Command::new("list")
        .about("List all account pages with their paths")
        .display_order(10)
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_name("FORMAT")
                .default_value("plain")
                .value_parser(["plain", "json", "toml"])
                .help("Output format"),
        )
}

pub fn run(matches: &ArgMatches, registry: &Registry) -> Result<String> {
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("plain");
    render(registry, format)
}

fn render(registry: &Registry, format: &str) -> Result<String> {
    let out = match format {
        "json" => serde_json::to_string_pretty(registry)? + "\n",
        "toml" => toml::to_string(registry)?,
        _ => {
            let width = registry
                .iter()
                .map(|(page, _)| page.name().len())
                .max()
                .unwrap_or_default();
            registry
                .iter()
                .map(|(page, path)| format!("{:width$}  {}\n", page.name(), path))
                .collect()
        }
    };
    Ok(out)
}
