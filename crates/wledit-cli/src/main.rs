// wledit: command-line front end for the WLEditor text engine
//
// Runs the same editing core as the Android library against files on disk.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use wledit_editor::SearchOptions;

use wledit_cli::commands;

#[derive(Parser)]
#[command(name = "wledit", about = "WordStar-style text editing from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SearchFlags {
    /// Match case exactly
    #[arg(short = 'c', long)]
    case_sensitive: bool,

    /// Only match whole words
    #[arg(short = 'w', long)]
    whole_word: bool,
}

impl From<&SearchFlags> for SearchOptions {
    fn from(flags: &SearchFlags) -> Self {
        SearchOptions {
            case_sensitive: flags.case_sensitive,
            whole_word: flags.whole_word,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the position of every match
    Find {
        file: PathBuf,
        pattern: String,
        #[command(flatten)]
        flags: SearchFlags,
    },
    /// Replace every match and save the file
    Replace {
        file: PathBuf,
        pattern: String,
        replacement: String,
        #[command(flatten)]
        flags: SearchFlags,

        /// Report the count without writing the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Replay WordStar keystrokes (^X = Ctrl+X, \n = Enter, \b = Backspace)
    Keys {
        file: PathBuf,
        script: String,

        /// Write the result back to the file
        #[arg(short, long)]
        save: bool,
    },
    /// Print the file as wrapped display rows
    Wrap {
        file: PathBuf,

        /// Characters per row (0 = no wrap); defaults to the saved setting
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Show or change saved preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current settings
    Show,
    /// Change one setting
    Set { key: String, value: String },
    /// Restore defaults
    Reset,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            file,
            pattern,
            flags,
        } => {
            let matches = commands::find(&file, &pattern, (&flags).into())?;
            if matches.is_empty() {
                println!("Text not found");
            }
            for position in matches {
                println!("{}", position);
            }
        }
        Commands::Replace {
            file,
            pattern,
            replacement,
            flags,
            dry_run,
        } => {
            let count =
                commands::replace(&file, &pattern, &replacement, (&flags).into(), dry_run)?;
            println!("Replaced {} occurrences", count);
        }
        Commands::Keys { file, script, save } => {
            let text = commands::run_keys(&file, &script, save)?;
            if !save {
                print!("{}", text);
            }
        }
        Commands::Wrap { file, width } => {
            let width = match width {
                Some(width) => width,
                None => wledit_settings::load()?.wrap_width,
            };
            tracing::info!("wrapping {} at {}", file.display(), width);
            for row in commands::wrap(&file, width)? {
                println!("{}", row);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let settings = wledit_settings::load()?;
                println!("# {}", wledit_settings::settings_path()?.display());
                println!("{}", serde_json::to_string_pretty(&settings)?);
            }
            ConfigAction::Set { key, value } => {
                let mut settings = wledit_settings::load()?;
                settings.set(&key, &value)?;
                wledit_settings::save(&settings)?;
                println!("{} updated.", key);
            }
            ConfigAction::Reset => {
                wledit_settings::save(&wledit_settings::Settings::default())?;
                println!("Settings reset to defaults.");
            }
        },
    }

    Ok(())
}
