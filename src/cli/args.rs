//! CLI argument parsing using clap.

use clap::{
    Parser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Keep a horizontal strip of every image in a directory up to date
#[derive(Parser, Debug)]
#[command(
    name = "stripwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep a horizontal strip of every image in a directory up to date",
    long_about = "Watches DIRECTORY (non-recursively) and rewrites horizontal.png inside it \
                  whenever an image is added, changed, renamed or removed. Runs until interrupted.",
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Directory to watch [default: current directory]
    pub directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_directory_is_optional() {
        let cli = Cli::try_parse_from(["stripwatch"]).unwrap();
        assert!(cli.directory.is_none());

        let cli = Cli::try_parse_from(["stripwatch", "shots"]).unwrap();
        assert_eq!(cli.directory, Some(PathBuf::from("shots")));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["stripwatch", "a", "b"]).is_err());
        assert!(Cli::try_parse_from(["stripwatch", "--recursive"]).is_err());
    }
}
