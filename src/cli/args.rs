use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kiwi")]
#[command(about = "Localization resource CLI: import, export and translate message files")]
#[command(version)]
pub struct Args {
    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the resource directory with a default configuration
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
    /// Import translations from a TSV file into a locale
    Import {
        /// TSV file with `key<TAB>value` rows
        file: PathBuf,

        /// Destination locale code (e.g., en-US)
        lang: String,
    },
    /// Export untranslated messages to TSV files
    Export {
        /// Destination locale code (defaults to every configured locale)
        lang: Option<String>,

        /// Output file (defaults to export-<lang>.tsv)
        #[arg(short, long, requires = "lang")]
        output: Option<PathBuf>,
    },
    /// Translate messages missing from destination locales
    Sync {
        /// Destination locale code (defaults to every configured locale)
        #[arg(short, long)]
        lang: Option<String>,

        /// Attempts per message, including the first
        #[arg(short, long, default_value_t = 3)]
        retries: usize,

        /// Translation API key, used when the config has none
        #[arg(long)]
        api_key: Option<String>,
    },
    /// List source messages no project file references
    Unused {
        /// Directory to scan
        #[arg(default_value = "src")]
        dir: PathBuf,
    },
}
