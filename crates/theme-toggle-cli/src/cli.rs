//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "theme-toggle", version, about = "Persisted light/dark theme toggle")]
pub struct Cli {
    /// JSON file holding the stored preference [default: <config dir>/theme-toggle/storage.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// YAML or JSON controller configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output mode
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Auto)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Styled when the terminal supports colors
    Auto,
    /// Always styled
    Term,
    /// Never styled
    Text,
    /// Machine-readable report
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the applied theme, the stored preference and the toggle glyph
    Show,
    /// Toggle the theme and let the animation steps run
    Toggle,
    /// Deliver an OS color-scheme change notification
    System {
        #[arg(value_enum, default_value_t = SchemeArg::Detect)]
        scheme: SchemeArg,
    },
    /// Forget the stored preference so the OS scheme is followed again
    Clear,
    /// Print the page markup
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Light,
    Dark,
    /// Ask the operating system
    Detect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["theme-toggle", "show"]).unwrap();
        assert_eq!(cli.output, OutputMode::Auto);
        assert!(cli.store.is_none());
        assert!(matches!(cli.command, Command::Show));
    }

    #[test]
    fn test_cli_system_defaults_to_detect() {
        let cli = Cli::try_parse_from(["theme-toggle", "system"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::System {
                scheme: SchemeArg::Detect
            }
        ));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["theme-toggle", "toggle", "--store", "s.json", "--output", "json"])
                .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("s.json")));
        assert_eq!(cli.output, OutputMode::Json);
    }

    #[test]
    fn test_cli_rejects_unknown_scheme() {
        assert!(Cli::try_parse_from(["theme-toggle", "system", "sepia"]).is_err());
    }
}
