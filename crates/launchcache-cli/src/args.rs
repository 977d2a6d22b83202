//! Command-line arguments.

use clap::Parser;

#[derive(Parser, Debug, Default, PartialEq)]
#[command(
    name = "launchcache",
    version,
    about = "Show the next upcoming launches, served from cache when possible"
)]
pub struct Args {
    /// Skip the caches and fetch from the API
    #[arg(long)]
    pub refresh: bool,

    /// Filter the cached list by launch name (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Never touch the network for this run
    #[arg(long)]
    pub offline: bool,

    /// Delete the cached list and exit
    #[arg(long, conflicts_with_all = ["refresh", "search"])]
    pub clear: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("launchcache").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).expect("empty args parse"), Args::default());
    }

    #[test]
    fn test_flags_and_search() {
        let args = parse(&["--refresh", "--search", "Glo", "--offline"]).expect("args parse");
        assert!(args.refresh);
        assert!(args.offline);
        assert!(!args.clear);
        assert_eq!(args.search.as_deref(), Some("Glo"));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--search"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--clear", "--refresh"]).is_err());
    }

    #[test]
    fn test_help_is_reported_as_display_help() {
        let err = parse(&["--help"]).expect_err("help short-circuits parsing");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
