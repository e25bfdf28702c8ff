use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "medallog-clip",
    version,
    about = "Copy Neon White best times to the clipboard",
    long_about = "Reads medallog.txt, keeps the best time of every level and copies one M:SS.mmm line per level, in campaign order, to the clipboard.",
    after_help = "Without PATH the file is looked up in settings.json, then in the game's save folder. Pass PATH when several Steam accounts have a save folder."
)]
pub struct Cli {
    /// medallog.txt to read
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Print the times to stdout instead of copying them
    #[arg(long)]
    pub print: bool,

    /// List the catalog levels in output order and exit
    #[arg(long)]
    pub list_levels: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_path_is_optional() {
        let cli = Cli::try_parse_from(["medallog-clip"]).unwrap();
        assert!(cli.path.is_none());
        assert!(!cli.print);

        let cli = Cli::try_parse_from(["medallog-clip", "--print", "-v", "C:/medallog.txt"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("C:/medallog.txt")));
        assert!(cli.print);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_second_path() {
        assert!(Cli::try_parse_from(["medallog-clip", "a.txt", "b.txt"]).is_err());
    }
}
