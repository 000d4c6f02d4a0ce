use anyhow::Result;
use clap::{Arg, ArgMatches, Command};

use accounts::Registry;

pub fn cmd() -> Command {
    Command::new("resolve")
        .about("Print the name of the page served at a path")
        .display_order(30)
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .help("Request path, query string and fragment are ignored")
                .required(true),
        )
}

pub fn run(matches: &ArgMatches, registry: &Registry) -> Result<String> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or_default();
    Ok(format!("{}\n", registry.resolve(path)?.name()))
}

#[cfg(test)]
mod tests {
    use accounts::{Error, ErrorKind};

    use super::*;

    fn resolve(args: &[&str], registry: &Registry) -> Result<String> {
        let matches = crate::tests::matches(args);
        let (_, m) = matches.subcommand().unwrap();
        run(m, registry)
    }

    #[test]
    fn test_prints_name() {
        let registry = Registry::with_base("/acc").unwrap();
        assert_eq!(
            resolve(&["resolve", "/acc/recover?next=%2F"], &registry).unwrap(),
            "RECOVER\n"
        );
    }

    #[test]
    fn test_unknown_path() {
        let registry = Registry::with_base("/acc").unwrap();
        let err = resolve(&["resolve", "/recover"], &registry).unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert!(matches!(err.kind, ErrorKind::PathNotFound(_)));
    }
}
