use crate::commands::{
    browsers::BrowsersCommand,
    export::ExportCommand,
    message::{CountCommand, SendCommand},
    tree::TreeCommand,
    CommandEnum,
};
use clap::{Parser, Subcommand};
use markport::config::Config;
use std::path::PathBuf;
use std::sync::OnceLock;

pub fn get_exe_name() -> &'static str {
    static EXE_NAME: OnceLock<String> = OnceLock::new();
    EXE_NAME.get_or_init(|| {
        std::env::args()
            .next()
            .as_ref()
            .map(std::path::Path::new)
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "markport".to_string())
    })
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Read bookmarks from this file (Chromium `Bookmarks` or Firefox `places.sqlite`)
    #[arg(long)]
    pub bookmarks: Option<PathBuf>,

    /// Browser to read from when detecting profiles (chrome, firefox, edge)
    #[arg(short, long)]
    pub browser: Option<String>,

    /// Profile name to read from when detecting profiles
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Seconds to wait for the bookmark tree (0 waits forever)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Export the bookmark tree to a JSON file (default)
    Export {
        /// Directory to save into
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,

        /// File name to save as
        #[arg(short, long)]
        filename: Option<String>,

        /// Replace an existing file instead of saving a numbered copy
        #[arg(long)]
        overwrite: bool,

        /// Open the saved file afterwards
        #[arg(short, long)]
        open: bool,
    },

    /// Send a COUNT notification to the responder
    Count {
        /// Value to report
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },

    /// Send a raw JSON message and print any reply
    Send {
        /// Message body, e.g. '{"action":"exportBookmarks"}'
        json: String,
    },

    /// Print the bookmark tree as an outline
    Tree,

    /// List detected browser profiles
    Browsers,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(path) = &self.bookmarks {
            config.bookmarks_path = Some(path.clone());
        }
        if let Some(browser) = &self.browser {
            config.browser = Some(browser.clone());
        }
        if let Some(profile) = &self.profile {
            config.profile = Some(profile.clone());
        }
        if let Some(timeout) = self.timeout {
            config.reply_timeout_secs = timeout;
        }
    }
}

/// Turn the parsed subcommand into something runnable. No subcommand means export.
pub fn build_command(command: Option<Commands>) -> CommandEnum {
    match command.unwrap_or(Commands::Export {
        out_dir: None,
        filename: None,
        overwrite: false,
        open: false,
    }) {
        Commands::Export {
            out_dir,
            filename,
            overwrite,
            open,
        } => CommandEnum::Export(ExportCommand {
            out_dir,
            filename,
            overwrite,
            open,
        }),
        Commands::Count { count } => CommandEnum::Count(CountCommand { count }),
        Commands::Send { json } => CommandEnum::Send(SendCommand { json }),
        Commands::Tree => CommandEnum::Tree(TreeCommand),
        Commands::Browsers => CommandEnum::Browsers(BrowsersCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Helper to parse CLI arguments from a string
    fn parse_args(args: &str) -> Result<Cli, clap::Error> {
        let args_vec: Vec<&str> = args.split_whitespace().collect();
        Cli::try_parse_from(std::iter::once("markport").chain(args_vec))
    }

    // Helper to expect successful parsing
    fn parse_args_ok(args: &str) -> Cli {
        parse_args(args).expect("Failed to parse valid arguments")
    }

    #[test]
    fn test_no_args() {
        let cli = parse_args_ok("");
        assert!(!cli.version);
        assert_eq!(cli.config, None);
        assert_eq!(cli.bookmarks, None);
        assert!(!cli.nc);
        assert!(!cli.debug);
        assert!(cli.command.is_none());
    }

    #[rstest]
    #[case("-v", true)]
    #[case("--version", true)]
    #[case("", false)]
    fn test_version_flag(#[case] args: &str, #[case] expected: bool) {
        assert_eq!(parse_args_ok(args).version, expected);
    }

    #[test]
    fn test_export_options() {
        let cli = parse_args_ok("export -d /tmp/out -f backup.json --overwrite --open");
        assert_eq!(
            cli.command,
            Some(Commands::Export {
                out_dir: Some(PathBuf::from("/tmp/out")),
                filename: Some("backup.json".to_string()),
                overwrite: true,
                open: true,
            })
        );
    }

    #[rstest]
    #[case("count 7", 7)]
    #[case("count -3", -3)]
    fn test_count(#[case] args: &str, #[case] expected: i64) {
        let cli = parse_args_ok(args);
        assert_eq!(cli.command, Some(Commands::Count { count: expected }));
    }

    #[test]
    fn test_count_requires_number() {
        assert!(parse_args("count seven").is_err());
        assert!(parse_args("count").is_err());
    }

    #[test]
    fn test_send_takes_one_argument() {
        let cli = parse_args_ok(r#"send {"type":"PING"}"#);
        assert_eq!(
            cli.command,
            Some(Commands::Send {
                json: r#"{"type":"PING"}"#.to_string()
            })
        );
    }

    #[test]
    fn test_global_options_override_config() {
        let cli = parse_args_ok("--bookmarks /tmp/Bookmarks -b edge -p Default --timeout 0 tree");
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.bookmarks_path, Some(PathBuf::from("/tmp/Bookmarks")));
        assert_eq!(config.browser.as_deref(), Some("edge"));
        assert_eq!(config.profile.as_deref(), Some("Default"));
        assert_eq!(config.reply_timeout(), None);
        assert_eq!(cli.command, Some(Commands::Tree));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = parse_args_ok("");
        let mut config = Config::default();
        config.browser = Some("firefox".to_string());
        cli.apply_overrides(&mut config);

        assert_eq!(config.browser.as_deref(), Some("firefox"));
        assert_eq!(config.reply_timeout_secs, 30);
    }

    #[test]
    fn test_missing_subcommand_builds_export() {
        assert!(matches!(build_command(None), CommandEnum::Export(_)));
        assert!(matches!(
            build_command(Some(Commands::Browsers)),
            CommandEnum::Browsers(_)
        ));
    }
}
